use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a mother admitted to the ward.
/// This model contains the identity and serological data referenced by
/// newborn records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mother {
    pub id: String,
    /// National identity number; unique per mother.
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Blood group as entered at admission; empty when not yet determined.
    pub blood_group: String,
    /// Set when the admitting clinician flagged a serological risk.
    pub serological_conflict: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mother {
    /// Generate a unique ID for a mother
    pub fn generate_id() -> String {
        format!("mother::{}", uuid::Uuid::new_v4())
    }

    /// Display name used wherever a mother reference is rendered.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
