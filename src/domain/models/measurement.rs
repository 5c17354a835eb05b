//! Timestamped clinical measurement records taken for a newborn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot of a newborn's external physical parameters.
///
/// Newborns may have zero or many; the "latest" record is the one with the
/// highest measurement timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalParameters {
    pub id: String,
    pub newborn_id: String,
    pub measured_at: DateTime<Utc>,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub premature: bool,
    pub head_circumference_cm: f64,
    /// Breaths per minute.
    pub respiratory_rate: i32,
    /// SpO2 percentage.
    pub oxygen_saturation: i32,
    /// Clinician who recorded the measurement, when known.
    pub recorded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExternalParameters {
    /// Generate a unique ID for a parameters record
    pub fn generate_id() -> String {
        format!("parameters::{}", uuid::Uuid::new_v4())
    }
}

/// APGAR vitality scores taken at 1, 5 and optionally 10 minutes after
/// birth. Each score ranges 0-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApgarScore {
    pub id: String,
    pub newborn_id: String,
    pub measured_at: DateTime<Utc>,
    pub score_1min: i32,
    pub score_5min: i32,
    pub score_10min: Option<i32>,
    /// Clinician who recorded the score, when known.
    pub recorded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApgarScore {
    /// Generate a unique ID for an APGAR record
    pub fn generate_id() -> String {
        format!("apgar::{}", uuid::Uuid::new_v4())
    }
}
