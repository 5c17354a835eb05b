//! Immutable version snapshots of mutable clinical records.
//!
//! Every create, update and restore of a versioned entity appends one
//! snapshot to that entity's chain. Snapshots are never edited or deleted;
//! the chain is ordered by append time, so the full edit history of a
//! record can always be replayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::measurement::{ApgarScore, ExternalParameters};
use super::mother::Mother;
use super::newborn::Newborn;

/// The kinds of entity whose edit history is versioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Mother,
    Newborn,
    ExternalParameters,
    ApgarScore,
}

impl EntityKind {
    /// Label shown in the audit timeline.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Mother => "Mother",
            EntityKind::Newborn => "Newborn",
            EntityKind::ExternalParameters => "External parameters",
            EntityKind::ApgarScore => "APGAR score",
        }
    }
}

/// Full copy of an entity's fields the moment it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VersionedState {
    Mother(Mother),
    Newborn(Newborn),
    ExternalParameters(ExternalParameters),
    ApgarScore(ApgarScore),
}

impl VersionedState {
    pub fn kind(&self) -> EntityKind {
        match self {
            VersionedState::Mother(_) => EntityKind::Mother,
            VersionedState::Newborn(_) => EntityKind::Newborn,
            VersionedState::ExternalParameters(_) => EntityKind::ExternalParameters,
            VersionedState::ApgarScore(_) => EntityKind::ApgarScore,
        }
    }

    /// ID of the entity this state was captured from.
    pub fn entity_id(&self) -> &str {
        match self {
            VersionedState::Mother(m) => &m.id,
            VersionedState::Newborn(n) => &n.id,
            VersionedState::ExternalParameters(p) => &p.id,
            VersionedState::ApgarScore(a) => &a.id,
        }
    }
}

/// One immutable entry in an entity's version chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionSnapshot {
    pub id: String,
    /// The entity's field values at save time.
    pub state: VersionedState,
    pub recorded_at: DateTime<Utc>,
    /// Clinician who performed the save, when known.
    pub recorded_by: Option<String>,
    /// The immediately preceding snapshot in the chain; `None` for the
    /// first snapshot of an entity.
    pub previous_id: Option<String>,
}

impl VersionSnapshot {
    /// Generate a unique ID for a snapshot
    pub fn generate_id() -> String {
        format!("version::{}", uuid::Uuid::new_v4())
    }
}

/// Errors surfaced by audit operations.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),
}
