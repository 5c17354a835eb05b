use anyhow::Result;
use chrono::Utc;
use log::{info, warn};

use crate::domain::commands::mother::{CreateMotherCommand, UpdateMotherCommand};
use crate::domain::models::mother::Mother;
use crate::domain::models::version::VersionedState;
use crate::domain::version_log;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::MotherStorage;

/// Service for managing mother records in the ward tracker.
#[derive(Clone)]
pub struct MotherService {
    store: MemoryStore,
}

impl MotherService {
    /// Create a new MotherService
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Admit a new mother
    pub fn create_mother(&self, command: CreateMotherCommand) -> Result<Mother> {
        info!(
            "Creating mother: national_id={}, name={} {}",
            command.national_id, command.first_name, command.last_name
        );

        self.validate_identity(&command.national_id, &command.first_name, &command.last_name)?;
        if self
            .store
            .get_mother_by_national_id(command.national_id.trim())?
            .is_some()
        {
            return Err(anyhow::anyhow!(
                "A mother with national ID {} already exists",
                command.national_id.trim()
            ));
        }

        let now = Utc::now();
        let mother = Mother {
            id: Mother::generate_id(),
            national_id: command.national_id.trim().to_string(),
            first_name: command.first_name.trim().to_string(),
            last_name: command.last_name.trim().to_string(),
            blood_group: command.blood_group.trim().to_string(),
            serological_conflict: command.serological_conflict,
            created_at: now,
            updated_at: now,
        };

        self.store.store_mother(&mother)?;
        version_log::record(
            &self.store,
            VersionedState::Mother(mother.clone()),
            command.recorded_by.as_deref(),
        )?;

        info!("Created mother: {} with ID: {}", mother.display_name(), mother.id);
        Ok(mother)
    }

    /// Get a mother by ID
    pub fn get_mother(&self, mother_id: &str) -> Result<Option<Mother>> {
        let mother = self.store.get_mother(mother_id)?;
        if mother.is_none() {
            warn!("Mother not found: {}", mother_id);
        }
        Ok(mother)
    }

    /// List all mothers
    pub fn list_mothers(&self) -> Result<Vec<Mother>> {
        let mothers = self.store.list_mothers()?;
        info!("Found {} mothers", mothers.len());
        Ok(mothers)
    }

    /// Update an existing mother
    pub fn update_mother(&self, command: UpdateMotherCommand) -> Result<Mother> {
        info!("Updating mother: {}", command.mother_id);

        let mut mother = self
            .store
            .get_mother(&command.mother_id)?
            .ok_or_else(|| anyhow::anyhow!("Mother not found: {}", command.mother_id))?;

        if let Some(first_name) = command.first_name {
            if first_name.trim().is_empty() {
                return Err(anyhow::anyhow!("First name cannot be empty"));
            }
            mother.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = command.last_name {
            if last_name.trim().is_empty() {
                return Err(anyhow::anyhow!("Last name cannot be empty"));
            }
            mother.last_name = last_name.trim().to_string();
        }
        if let Some(blood_group) = command.blood_group {
            mother.blood_group = blood_group.trim().to_string();
        }
        if let Some(serological_conflict) = command.serological_conflict {
            mother.serological_conflict = serological_conflict;
        }
        mother.updated_at = Utc::now();

        self.store.update_mother(&mother)?;
        version_log::record(
            &self.store,
            VersionedState::Mother(mother.clone()),
            command.recorded_by.as_deref(),
        )?;

        info!("Updated mother: {} with ID: {}", mother.display_name(), mother.id);
        Ok(mother)
    }

    fn validate_identity(&self, national_id: &str, first_name: &str, last_name: &str) -> Result<()> {
        if national_id.trim().is_empty() {
            return Err(anyhow::anyhow!("National ID cannot be empty"));
        }
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(anyhow::anyhow!("Mother name cannot be empty"));
        }
        Ok(())
    }
}
