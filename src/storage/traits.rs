//! # Storage Traits
//!
//! This module defines the storage abstraction traits the domain layer
//! consumes. The ward core treats persistence as an external collaborator:
//! it only assumes create/read/update/list operations plus the ordered
//! queries declared here, and works with any backend that provides them.

use anyhow::Result;

use crate::domain::models::measurement::{ApgarScore, ExternalParameters};
use crate::domain::models::mother::Mother;
use crate::domain::models::newborn::Newborn;
use crate::domain::models::version::{EntityKind, VersionSnapshot};

/// Trait defining the interface for mother storage operations
pub trait MotherStorage: Send + Sync {
    /// Store a new mother
    fn store_mother(&self, mother: &Mother) -> Result<()>;

    /// Retrieve a specific mother by ID
    fn get_mother(&self, mother_id: &str) -> Result<Option<Mother>>;

    /// Retrieve a mother by her national identity number
    fn get_mother_by_national_id(&self, national_id: &str) -> Result<Option<Mother>>;

    /// List all mothers
    fn list_mothers(&self) -> Result<Vec<Mother>>;

    /// Update an existing mother
    fn update_mother(&self, mother: &Mother) -> Result<()>;
}

/// Trait defining the interface for newborn storage operations
pub trait NewbornStorage: Send + Sync {
    /// Store a new newborn
    fn store_newborn(&self, newborn: &Newborn) -> Result<()>;

    /// Retrieve a specific newborn by ID
    fn get_newborn(&self, newborn_id: &str) -> Result<Option<Newborn>>;

    /// List all newborns
    fn list_newborns(&self) -> Result<Vec<Newborn>>;

    /// Update an existing newborn
    fn update_newborn(&self, newborn: &Newborn) -> Result<()>;
}

/// Trait defining the interface for measurement storage operations
///
/// "Latest" lookups are an ordered-query capability of the storage side;
/// the domain never scans for the maximum timestamp itself.
pub trait MeasurementStorage: Send + Sync {
    /// Store a new external-parameters record
    fn store_parameters(&self, parameters: &ExternalParameters) -> Result<()>;

    /// Retrieve a specific parameters record by ID
    fn get_parameters(&self, parameters_id: &str) -> Result<Option<ExternalParameters>>;

    /// List all parameters records for a newborn, oldest first
    fn list_parameters(&self, newborn_id: &str) -> Result<Vec<ExternalParameters>>;

    /// Get the most recent parameters record for a newborn
    fn latest_parameters(&self, newborn_id: &str) -> Result<Option<ExternalParameters>>;

    /// Update an existing parameters record
    fn update_parameters(&self, parameters: &ExternalParameters) -> Result<()>;

    /// Store a new APGAR record
    fn store_apgar(&self, apgar: &ApgarScore) -> Result<()>;

    /// Retrieve a specific APGAR record by ID
    fn get_apgar(&self, apgar_id: &str) -> Result<Option<ApgarScore>>;

    /// List all APGAR records for a newborn, oldest first
    fn list_apgar_scores(&self, newborn_id: &str) -> Result<Vec<ApgarScore>>;

    /// Get the most recent APGAR record for a newborn
    fn latest_apgar(&self, newborn_id: &str) -> Result<Option<ApgarScore>>;

    /// Update an existing APGAR record
    fn update_apgar(&self, apgar: &ApgarScore) -> Result<()>;
}

/// Trait defining the interface for version-chain storage operations
///
/// Chains are append-only: snapshots are never edited or removed once
/// written, and a chain's order is its append order.
pub trait VersionStorage: Send + Sync {
    /// Append a snapshot to its entity's chain
    fn append_snapshot(&self, snapshot: &VersionSnapshot) -> Result<()>;

    /// Retrieve a specific snapshot by ID
    fn get_snapshot(&self, snapshot_id: &str) -> Result<Option<VersionSnapshot>>;

    /// Ordered version chain for one entity, oldest first
    fn version_chain(&self, kind: EntityKind, entity_id: &str) -> Result<Vec<VersionSnapshot>>;

    /// The newest snapshot for one entity, if any exists
    fn latest_snapshot(&self, kind: EntityKind, entity_id: &str) -> Result<Option<VersionSnapshot>>;
}

/// Trait defining the identity/display interface for clinician references
pub trait ClinicianDirectory: Send + Sync {
    /// Resolve a clinician ID to a display name
    fn clinician_display_name(&self, clinician_id: &str) -> Result<Option<String>>;
}
