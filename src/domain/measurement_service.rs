use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::domain::commands::measurement::{
    RecordApgarCommand, RecordParametersCommand, UpdateApgarCommand, UpdateParametersCommand,
};
use crate::domain::models::measurement::{ApgarScore, ExternalParameters};
use crate::domain::models::version::VersionedState;
use crate::domain::version_log;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::{MeasurementStorage, NewbornStorage};

/// Service for recording clinical measurements for newborns.
#[derive(Clone)]
pub struct MeasurementService {
    store: MemoryStore,
}

impl MeasurementService {
    /// Create a new MeasurementService
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Record a set of external physical parameters for a newborn
    pub fn record_parameters(&self, command: RecordParametersCommand) -> Result<ExternalParameters> {
        info!(
            "Recording parameters for newborn {}: weight={} kg, spO2={}%",
            command.newborn_id, command.weight_kg, command.oxygen_saturation
        );

        self.require_newborn(&command.newborn_id)?;
        if !(0..=100).contains(&command.oxygen_saturation) {
            return Err(anyhow::anyhow!(
                "Oxygen saturation must be between 0 and 100, got {}",
                command.oxygen_saturation
            ));
        }
        if command.respiratory_rate < 0 {
            return Err(anyhow::anyhow!("Respiratory rate cannot be negative"));
        }

        let now = Utc::now();
        let parameters = ExternalParameters {
            id: ExternalParameters::generate_id(),
            newborn_id: command.newborn_id,
            measured_at: now,
            height_cm: command.height_cm,
            weight_kg: command.weight_kg,
            premature: command.premature,
            head_circumference_cm: command.head_circumference_cm,
            respiratory_rate: command.respiratory_rate,
            oxygen_saturation: command.oxygen_saturation,
            recorded_by: command.recorded_by.clone(),
            created_at: now,
            updated_at: now,
        };

        self.store.store_parameters(&parameters)?;
        version_log::record(
            &self.store,
            VersionedState::ExternalParameters(parameters.clone()),
            command.recorded_by.as_deref(),
        )?;

        info!("Recorded parameters: {}", parameters.id);
        Ok(parameters)
    }

    /// Record an APGAR score for a newborn
    pub fn record_apgar(&self, command: RecordApgarCommand) -> Result<ApgarScore> {
        info!(
            "Recording APGAR for newborn {}: 1min={}, 5min={}",
            command.newborn_id, command.score_1min, command.score_5min
        );

        self.require_newborn(&command.newborn_id)?;
        for score in [Some(command.score_1min), Some(command.score_5min), command.score_10min]
            .into_iter()
            .flatten()
        {
            if !(0..=10).contains(&score) {
                return Err(anyhow::anyhow!(
                    "APGAR scores must be between 0 and 10, got {}",
                    score
                ));
            }
        }

        let now = Utc::now();
        let apgar = ApgarScore {
            id: ApgarScore::generate_id(),
            newborn_id: command.newborn_id,
            measured_at: now,
            score_1min: command.score_1min,
            score_5min: command.score_5min,
            score_10min: command.score_10min,
            recorded_by: command.recorded_by.clone(),
            created_at: now,
            updated_at: now,
        };

        self.store.store_apgar(&apgar)?;
        version_log::record(
            &self.store,
            VersionedState::ApgarScore(apgar.clone()),
            command.recorded_by.as_deref(),
        )?;

        info!("Recorded APGAR: {}", apgar.id);
        Ok(apgar)
    }

    /// Correct an existing parameters record
    pub fn update_parameters(&self, command: UpdateParametersCommand) -> Result<ExternalParameters> {
        info!("Updating parameters record: {}", command.parameters_id);

        let mut parameters = self
            .store
            .get_parameters(&command.parameters_id)?
            .ok_or_else(|| {
                anyhow::anyhow!("Parameters record not found: {}", command.parameters_id)
            })?;

        if let Some(height_cm) = command.height_cm {
            parameters.height_cm = height_cm;
        }
        if let Some(weight_kg) = command.weight_kg {
            parameters.weight_kg = weight_kg;
        }
        if let Some(premature) = command.premature {
            parameters.premature = premature;
        }
        if let Some(head_circumference_cm) = command.head_circumference_cm {
            parameters.head_circumference_cm = head_circumference_cm;
        }
        if let Some(respiratory_rate) = command.respiratory_rate {
            if respiratory_rate < 0 {
                return Err(anyhow::anyhow!("Respiratory rate cannot be negative"));
            }
            parameters.respiratory_rate = respiratory_rate;
        }
        if let Some(oxygen_saturation) = command.oxygen_saturation {
            if !(0..=100).contains(&oxygen_saturation) {
                return Err(anyhow::anyhow!(
                    "Oxygen saturation must be between 0 and 100, got {}",
                    oxygen_saturation
                ));
            }
            parameters.oxygen_saturation = oxygen_saturation;
        }
        if command.recorded_by.is_some() {
            parameters.recorded_by = command.recorded_by.clone();
        }
        parameters.updated_at = Utc::now();

        self.store.update_parameters(&parameters)?;
        version_log::record(
            &self.store,
            VersionedState::ExternalParameters(parameters.clone()),
            command.recorded_by.as_deref(),
        )?;

        Ok(parameters)
    }

    /// Correct an existing APGAR record
    pub fn update_apgar(&self, command: UpdateApgarCommand) -> Result<ApgarScore> {
        info!("Updating APGAR record: {}", command.apgar_id);

        let mut apgar = self
            .store
            .get_apgar(&command.apgar_id)?
            .ok_or_else(|| anyhow::anyhow!("APGAR record not found: {}", command.apgar_id))?;

        if let Some(score_1min) = command.score_1min {
            apgar.score_1min = score_1min;
        }
        if let Some(score_5min) = command.score_5min {
            apgar.score_5min = score_5min;
        }
        if command.score_10min.is_some() {
            apgar.score_10min = command.score_10min;
        }
        for score in [Some(apgar.score_1min), Some(apgar.score_5min), apgar.score_10min]
            .into_iter()
            .flatten()
        {
            if !(0..=10).contains(&score) {
                return Err(anyhow::anyhow!(
                    "APGAR scores must be between 0 and 10, got {}",
                    score
                ));
            }
        }
        if command.recorded_by.is_some() {
            apgar.recorded_by = command.recorded_by.clone();
        }
        apgar.updated_at = Utc::now();

        self.store.update_apgar(&apgar)?;
        version_log::record(
            &self.store,
            VersionedState::ApgarScore(apgar.clone()),
            command.recorded_by.as_deref(),
        )?;

        Ok(apgar)
    }

    /// List all parameters records for a newborn, oldest first
    pub fn list_parameters(&self, newborn_id: &str) -> Result<Vec<ExternalParameters>> {
        self.store.list_parameters(newborn_id)
    }

    /// The most recent parameters record for a newborn
    pub fn latest_parameters(&self, newborn_id: &str) -> Result<Option<ExternalParameters>> {
        self.store.latest_parameters(newborn_id)
    }

    /// List all APGAR records for a newborn, oldest first
    pub fn list_apgar_scores(&self, newborn_id: &str) -> Result<Vec<ApgarScore>> {
        self.store.list_apgar_scores(newborn_id)
    }

    /// The most recent APGAR record for a newborn
    pub fn latest_apgar(&self, newborn_id: &str) -> Result<Option<ApgarScore>> {
        self.store.latest_apgar(newborn_id)
    }

    fn require_newborn(&self, newborn_id: &str) -> Result<()> {
        self.store
            .get_newborn(newborn_id)?
            .ok_or_else(|| anyhow::anyhow!("Newborn not found: {}", newborn_id))?;
        Ok(())
    }
}
