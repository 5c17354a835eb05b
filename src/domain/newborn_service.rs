use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{info, warn};

use crate::domain::commands::newborn::{CreateNewbornCommand, UpdateNewbornCommand};
use crate::domain::models::newborn::Newborn;
use crate::domain::models::version::VersionedState;
use crate::domain::version_log;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::{MotherStorage, NewbornStorage};

/// Service for managing newborn records in the ward tracker.
#[derive(Clone)]
pub struct NewbornService {
    store: MemoryStore,
}

impl NewbornService {
    /// Create a new NewbornService
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Register a newborn
    pub fn create_newborn(&self, command: CreateNewbornCommand) -> Result<Newborn> {
        info!(
            "Creating newborn: name={}, birth_date={}",
            command.name, command.birth_date
        );

        self.validate_name(&command.name)?;
        let birth_date = NaiveDate::parse_from_str(&command.birth_date, "%Y-%m-%d")
            .context("Invalid birth date format in create_newborn command")?;
        if let Some(mother_id) = &command.mother_id {
            self.store
                .get_mother(mother_id)?
                .ok_or_else(|| anyhow::anyhow!("Mother not found: {}", mother_id))?;
        }

        let now = Utc::now();
        let newborn = Newborn {
            id: Newborn::generate_id(),
            name: command.name.trim().to_string(),
            birth_date,
            sex: command.sex,
            mother_id: command.mother_id,
            blood_group: normalize_blood_group(command.blood_group),
            created_at: now,
            updated_at: now,
        };

        self.store.store_newborn(&newborn)?;
        version_log::record(
            &self.store,
            VersionedState::Newborn(newborn.clone()),
            command.recorded_by.as_deref(),
        )?;

        info!("Created newborn: {} with ID: {}", newborn.name, newborn.id);
        Ok(newborn)
    }

    /// Get a newborn by ID
    pub fn get_newborn(&self, newborn_id: &str) -> Result<Option<Newborn>> {
        let newborn = self.store.get_newborn(newborn_id)?;
        if newborn.is_none() {
            warn!("Newborn not found: {}", newborn_id);
        }
        Ok(newborn)
    }

    /// List all newborns
    pub fn list_newborns(&self) -> Result<Vec<Newborn>> {
        let newborns = self.store.list_newborns()?;
        info!("Found {} newborns", newborns.len());
        Ok(newborns)
    }

    /// Update an existing newborn
    pub fn update_newborn(&self, command: UpdateNewbornCommand) -> Result<Newborn> {
        info!("Updating newborn: {}", command.newborn_id);

        let mut newborn = self
            .store
            .get_newborn(&command.newborn_id)?
            .ok_or_else(|| anyhow::anyhow!("Newborn not found: {}", command.newborn_id))?;

        if let Some(name) = command.name {
            self.validate_name(&name)?;
            newborn.name = name.trim().to_string();
        }
        if let Some(birth_date) = command.birth_date {
            newborn.birth_date = NaiveDate::parse_from_str(&birth_date, "%Y-%m-%d")
                .context("Invalid birth date format in update_newborn command")?;
        }
        if let Some(sex) = command.sex {
            newborn.sex = sex;
        }
        if let Some(mother_id) = command.mother_id {
            self.store
                .get_mother(&mother_id)?
                .ok_or_else(|| anyhow::anyhow!("Mother not found: {}", mother_id))?;
            newborn.mother_id = Some(mother_id);
        }
        if let Some(blood_group) = command.blood_group {
            newborn.blood_group = normalize_blood_group(Some(blood_group));
        }
        newborn.updated_at = Utc::now();

        self.store.update_newborn(&newborn)?;
        version_log::record(
            &self.store,
            VersionedState::Newborn(newborn.clone()),
            command.recorded_by.as_deref(),
        )?;

        info!("Updated newborn: {} with ID: {}", newborn.name, newborn.id);
        Ok(newborn)
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Newborn name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(anyhow::anyhow!("Newborn name cannot exceed 100 characters"));
        }
        Ok(())
    }
}

fn normalize_blood_group(blood_group: Option<String>) -> Option<String> {
    blood_group
        .map(|group| group.trim().to_string())
        .filter(|group| !group.is_empty())
}
