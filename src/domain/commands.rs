//! Domain-level command types
//!
//! These structs are the inputs the ward services consume. An outer layer
//! (forms, HTTP, import jobs) is responsible for mapping its own DTOs to
//! these internal types; dates arrive as `YYYY-MM-DD` strings and are
//! parsed inside the services.

pub mod mother {
    /// Input for admitting a new mother.
    #[derive(Debug, Clone)]
    pub struct CreateMotherCommand {
        pub national_id: String,
        pub first_name: String,
        pub last_name: String,
        /// May be empty when the group has not been determined yet.
        pub blood_group: String,
        pub serological_conflict: bool,
        /// Clinician performing the save.
        pub recorded_by: Option<String>,
    }

    /// Input for editing an existing mother. `None` fields are left as-is.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateMotherCommand {
        pub mother_id: String,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub blood_group: Option<String>,
        pub serological_conflict: Option<bool>,
        pub recorded_by: Option<String>,
    }
}

pub mod newborn {
    use crate::domain::models::newborn::Sex;

    /// Input for registering a newborn.
    #[derive(Debug, Clone)]
    pub struct CreateNewbornCommand {
        pub name: String,
        /// Birth date in `YYYY-MM-DD` format.
        pub birth_date: String,
        pub sex: Sex,
        pub mother_id: Option<String>,
        pub blood_group: Option<String>,
        pub recorded_by: Option<String>,
    }

    /// Input for editing an existing newborn. `None` fields are left as-is.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateNewbornCommand {
        pub newborn_id: String,
        pub name: Option<String>,
        pub birth_date: Option<String>,
        pub sex: Option<Sex>,
        pub mother_id: Option<String>,
        pub blood_group: Option<String>,
        pub recorded_by: Option<String>,
    }
}

pub mod measurement {
    /// Input for recording a set of external physical parameters.
    #[derive(Debug, Clone)]
    pub struct RecordParametersCommand {
        pub newborn_id: String,
        pub height_cm: f64,
        pub weight_kg: f64,
        pub premature: bool,
        pub head_circumference_cm: f64,
        pub respiratory_rate: i32,
        pub oxygen_saturation: i32,
        pub recorded_by: Option<String>,
    }

    /// Input for correcting an existing parameters record. `None` fields
    /// are left as-is.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateParametersCommand {
        pub parameters_id: String,
        pub height_cm: Option<f64>,
        pub weight_kg: Option<f64>,
        pub premature: Option<bool>,
        pub head_circumference_cm: Option<f64>,
        pub respiratory_rate: Option<i32>,
        pub oxygen_saturation: Option<i32>,
        pub recorded_by: Option<String>,
    }

    /// Input for recording an APGAR score.
    #[derive(Debug, Clone)]
    pub struct RecordApgarCommand {
        pub newborn_id: String,
        pub score_1min: i32,
        pub score_5min: i32,
        pub score_10min: Option<i32>,
        pub recorded_by: Option<String>,
    }

    /// Input for correcting an existing APGAR record. `None` fields are
    /// left as-is.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateApgarCommand {
        pub apgar_id: String,
        pub score_1min: Option<i32>,
        pub score_5min: Option<i32>,
        pub score_10min: Option<i32>,
        pub recorded_by: Option<String>,
    }
}
