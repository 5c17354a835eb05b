//! Append-only version log shared by every entity service.
//!
//! All writes — create, update and restore — go through [`record`], which
//! appends an immutable snapshot of the entity to its chain. Nothing in
//! this crate edits or deletes a snapshot once appended.

use anyhow::Result;
use chrono::Utc;
use log::debug;

use crate::storage::memory::MemoryStore;
use crate::storage::traits::VersionStorage;
use super::models::version::{VersionSnapshot, VersionedState};

/// Append a snapshot of `state` to its entity's version chain, linking it
/// to the chain's current head.
pub(crate) fn record(
    store: &MemoryStore,
    state: VersionedState,
    recorded_by: Option<&str>,
) -> Result<VersionSnapshot> {
    let previous = store.latest_snapshot(state.kind(), state.entity_id())?;
    let snapshot = VersionSnapshot {
        id: VersionSnapshot::generate_id(),
        recorded_at: Utc::now(),
        recorded_by: recorded_by.map(str::to_string),
        previous_id: previous.map(|p| p.id),
        state,
    };
    store.append_snapshot(&snapshot)?;
    debug!(
        "Appended snapshot {} for {} {}",
        snapshot.id,
        snapshot.state.kind().label(),
        snapshot.state.entity_id()
    );
    Ok(snapshot)
}
