//! # In-Memory Storage
//!
//! In-process implementation of the storage traits. Durable persistence is
//! an external concern for the ward core; this store backs `Backend::new()`
//! and the test suite with the same trait surface a database-backed
//! implementation would provide.
//!
//! ## Features
//!
//! - Full CRUD for mothers, newborns and measurement records
//! - Append-only version chains kept in append order
//! - Latest-record queries with insertion-order tie-breaking
//! - A small clinician directory for display-name resolution

use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::models::measurement::{ApgarScore, ExternalParameters};
use crate::domain::models::mother::Mother;
use crate::domain::models::newborn::Newborn;
use crate::domain::models::version::{EntityKind, VersionSnapshot};
use super::traits::{
    ClinicianDirectory, MeasurementStorage, MotherStorage, NewbornStorage, VersionStorage,
};

#[derive(Default)]
struct StoreInner {
    mothers: Vec<Mother>,
    newborns: Vec<Newborn>,
    parameters: Vec<ExternalParameters>,
    apgar_scores: Vec<ApgarScore>,
    snapshots: Vec<VersionSnapshot>,
    clinicians: HashMap<String, String>,
}

/// Shared in-memory store implementing every storage trait.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clinician so references to them resolve to a display name
    pub fn register_clinician(&self, clinician_id: &str, display_name: &str) -> Result<()> {
        let mut inner = self.lock()?;
        inner
            .clinicians
            .insert(clinician_id.to_string(), display_name.to_string());
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("Storage lock poisoned"))
    }
}

impl MotherStorage for MemoryStore {
    fn store_mother(&self, mother: &Mother) -> Result<()> {
        self.lock()?.mothers.push(mother.clone());
        Ok(())
    }

    fn get_mother(&self, mother_id: &str) -> Result<Option<Mother>> {
        Ok(self.lock()?.mothers.iter().find(|m| m.id == mother_id).cloned())
    }

    fn get_mother_by_national_id(&self, national_id: &str) -> Result<Option<Mother>> {
        Ok(self
            .lock()?
            .mothers
            .iter()
            .find(|m| m.national_id == national_id)
            .cloned())
    }

    fn list_mothers(&self) -> Result<Vec<Mother>> {
        Ok(self.lock()?.mothers.clone())
    }

    fn update_mother(&self, mother: &Mother) -> Result<()> {
        let mut inner = self.lock()?;
        match inner.mothers.iter_mut().find(|m| m.id == mother.id) {
            Some(existing) => {
                *existing = mother.clone();
                Ok(())
            }
            None => Err(anyhow::anyhow!("Mother not found: {}", mother.id)),
        }
    }
}

impl NewbornStorage for MemoryStore {
    fn store_newborn(&self, newborn: &Newborn) -> Result<()> {
        self.lock()?.newborns.push(newborn.clone());
        Ok(())
    }

    fn get_newborn(&self, newborn_id: &str) -> Result<Option<Newborn>> {
        Ok(self
            .lock()?
            .newborns
            .iter()
            .find(|n| n.id == newborn_id)
            .cloned())
    }

    fn list_newborns(&self) -> Result<Vec<Newborn>> {
        Ok(self.lock()?.newborns.clone())
    }

    fn update_newborn(&self, newborn: &Newborn) -> Result<()> {
        let mut inner = self.lock()?;
        match inner.newborns.iter_mut().find(|n| n.id == newborn.id) {
            Some(existing) => {
                *existing = newborn.clone();
                Ok(())
            }
            None => Err(anyhow::anyhow!("Newborn not found: {}", newborn.id)),
        }
    }
}

impl MeasurementStorage for MemoryStore {
    fn store_parameters(&self, parameters: &ExternalParameters) -> Result<()> {
        self.lock()?.parameters.push(parameters.clone());
        Ok(())
    }

    fn get_parameters(&self, parameters_id: &str) -> Result<Option<ExternalParameters>> {
        Ok(self
            .lock()?
            .parameters
            .iter()
            .find(|p| p.id == parameters_id)
            .cloned())
    }

    fn list_parameters(&self, newborn_id: &str) -> Result<Vec<ExternalParameters>> {
        Ok(self
            .lock()?
            .parameters
            .iter()
            .filter(|p| p.newborn_id == newborn_id)
            .cloned()
            .collect())
    }

    fn latest_parameters(&self, newborn_id: &str) -> Result<Option<ExternalParameters>> {
        let inner = self.lock()?;
        let mut latest: Option<&ExternalParameters> = None;
        for parameters in inner.parameters.iter().filter(|p| p.newborn_id == newborn_id) {
            // >= so equal timestamps resolve to the later-inserted record
            if latest.map_or(true, |best| parameters.measured_at >= best.measured_at) {
                latest = Some(parameters);
            }
        }
        Ok(latest.cloned())
    }

    fn update_parameters(&self, parameters: &ExternalParameters) -> Result<()> {
        let mut inner = self.lock()?;
        match inner.parameters.iter_mut().find(|p| p.id == parameters.id) {
            Some(existing) => {
                *existing = parameters.clone();
                Ok(())
            }
            None => Err(anyhow::anyhow!("Parameters record not found: {}", parameters.id)),
        }
    }

    fn store_apgar(&self, apgar: &ApgarScore) -> Result<()> {
        self.lock()?.apgar_scores.push(apgar.clone());
        Ok(())
    }

    fn get_apgar(&self, apgar_id: &str) -> Result<Option<ApgarScore>> {
        Ok(self
            .lock()?
            .apgar_scores
            .iter()
            .find(|a| a.id == apgar_id)
            .cloned())
    }

    fn list_apgar_scores(&self, newborn_id: &str) -> Result<Vec<ApgarScore>> {
        Ok(self
            .lock()?
            .apgar_scores
            .iter()
            .filter(|a| a.newborn_id == newborn_id)
            .cloned()
            .collect())
    }

    fn latest_apgar(&self, newborn_id: &str) -> Result<Option<ApgarScore>> {
        let inner = self.lock()?;
        let mut latest: Option<&ApgarScore> = None;
        for apgar in inner.apgar_scores.iter().filter(|a| a.newborn_id == newborn_id) {
            if latest.map_or(true, |best| apgar.measured_at >= best.measured_at) {
                latest = Some(apgar);
            }
        }
        Ok(latest.cloned())
    }

    fn update_apgar(&self, apgar: &ApgarScore) -> Result<()> {
        let mut inner = self.lock()?;
        match inner.apgar_scores.iter_mut().find(|a| a.id == apgar.id) {
            Some(existing) => {
                *existing = apgar.clone();
                Ok(())
            }
            None => Err(anyhow::anyhow!("APGAR record not found: {}", apgar.id)),
        }
    }
}

impl VersionStorage for MemoryStore {
    fn append_snapshot(&self, snapshot: &VersionSnapshot) -> Result<()> {
        self.lock()?.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn get_snapshot(&self, snapshot_id: &str) -> Result<Option<VersionSnapshot>> {
        Ok(self
            .lock()?
            .snapshots
            .iter()
            .find(|s| s.id == snapshot_id)
            .cloned())
    }

    fn version_chain(&self, kind: EntityKind, entity_id: &str) -> Result<Vec<VersionSnapshot>> {
        Ok(self
            .lock()?
            .snapshots
            .iter()
            .filter(|s| s.state.kind() == kind && s.state.entity_id() == entity_id)
            .cloned()
            .collect())
    }

    fn latest_snapshot(&self, kind: EntityKind, entity_id: &str) -> Result<Option<VersionSnapshot>> {
        Ok(self
            .lock()?
            .snapshots
            .iter()
            .filter(|s| s.state.kind() == kind && s.state.entity_id() == entity_id)
            .last()
            .cloned())
    }
}

impl ClinicianDirectory for MemoryStore {
    fn clinician_display_name(&self, clinician_id: &str) -> Result<Option<String>> {
        Ok(self.lock()?.clinicians.get(clinician_id).cloned())
    }
}
