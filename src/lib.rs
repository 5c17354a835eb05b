//! # Neonatal Ward Tracker
//!
//! Core backend for tracking newborns, their mothers and clinical
//! measurements in a maternity ward. This crate provides:
//! - Synchronous domain services over a pluggable storage boundary
//! - A clinical risk classifier turning the latest measurements into a
//!   triage status and recommendation text
//! - A serological-incompatibility screen between mother and newborn
//! - An append-only audit/version log with a per-newborn timeline and
//!   restore-as-new-record
//!
//! Authentication, rendering, HTTP routing and durable persistence are
//! external collaborators; the crate exposes plain records and the
//! storage traits those collaborators implement.

pub mod domain;
pub mod storage;

// Re-export commonly used types
pub use storage::memory::MemoryStore;

/// Main backend struct that orchestrates all ward services
pub struct Backend {
    pub mother_service: domain::MotherService,
    pub newborn_service: domain::NewbornService,
    pub measurement_service: domain::MeasurementService,
    pub report_service: domain::ReportService,
    pub audit_service: domain::AuditService,
}

impl Backend {
    /// Create a backend over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Create a backend over an existing store
    pub fn with_store(store: MemoryStore) -> Self {
        Backend {
            mother_service: domain::MotherService::new(store.clone()),
            newborn_service: domain::NewbornService::new(store.clone()),
            measurement_service: domain::MeasurementService::new(store.clone()),
            report_service: domain::ReportService::new(store.clone()),
            audit_service: domain::AuditService::new(store),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}
