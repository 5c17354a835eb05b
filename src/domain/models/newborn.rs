use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sex of a newborn as recorded at birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Human-readable label used for display and diffing.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    /// Parse from a form code or label.
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "female" => Ok(Sex::Female),
            _ => Err(format!("Invalid sex value: {}", s)),
        }
    }
}

/// Domain model representing a newborn tracked by the ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Newborn {
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    /// Reference to the admitted mother, when one is recorded. A newborn
    /// may exist without a mother record; once set, the reference only
    /// changes through an explicit edit.
    pub mother_id: Option<String>,
    /// The newborn's own blood group, once determined.
    pub blood_group: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Newborn {
    /// Generate a unique ID for a newborn
    pub fn generate_id() -> String {
        format!("newborn::{}", uuid::Uuid::new_v4())
    }
}
