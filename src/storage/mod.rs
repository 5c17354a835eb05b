//! Storage layer: the persistence boundary the domain layer consumes.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{
    ClinicianDirectory, MeasurementStorage, MotherStorage, NewbornStorage, VersionStorage,
};
