//! Clinical risk classification over a newborn's latest measurements.
//!
//! Two independent derivations share one input snapshot: a priority-ordered
//! triage status for the dashboard, and the recommendation text shown to
//! clinicians. Keeping both on the same `MeasurementSnapshot` guarantees
//! they never disagree about which records they looked at.

use serde::{Deserialize, Serialize};

use super::display::fmt_float;
use super::models::measurement::{ApgarScore, ExternalParameters};

/// Alert thresholds for the classification rules, kept in one place so the
/// rule set stays auditable and testable in isolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// 5-minute APGAR scores below this require hospitalization.
    pub apgar_alert_score: i32,
    /// Birth weights below this (kg) require monitoring.
    pub low_birth_weight_kg: f64,
    /// Oxygen saturation below this (%) requires monitoring.
    pub low_oxygen_saturation_pct: i32,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            apgar_alert_score: 7,
            low_birth_weight_kg: 2.5,
            low_oxygen_saturation_pct: 92,
        }
    }
}

/// Triage status shown on the ward dashboard. Higher severity wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TriageStatus {
    Normal,
    Monitoring,
    Hospitalization,
}

impl TriageStatus {
    /// Dashboard label.
    pub fn label(&self) -> &'static str {
        match self {
            TriageStatus::Normal => "Parameters normal",
            TriageStatus::Monitoring => "Monitoring",
            TriageStatus::Hospitalization => "Hospitalization",
        }
    }
}

/// The measurement values the classifier looks at, assembled from the
/// newborn's latest record of each measurement type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSnapshot {
    pub weight_kg: Option<f64>,
    pub oxygen_saturation_pct: Option<i32>,
    pub apgar_5min: Option<i32>,
}

impl MeasurementSnapshot {
    /// Assemble the snapshot from the latest record of each measurement
    /// type. Every caller goes through this single assembly point so the
    /// status and the recommendation are always derived from the same
    /// records.
    pub fn from_latest(
        parameters: Option<&ExternalParameters>,
        apgar: Option<&ApgarScore>,
    ) -> Self {
        Self {
            weight_kg: parameters.map(|p| p.weight_kg),
            oxygen_saturation_pct: parameters.map(|p| p.oxygen_saturation),
            apgar_5min: apgar.map(|a| a.score_5min),
        }
    }
}

/// Result of classifying one newborn's measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub status: TriageStatus,
    pub recommendation: String,
}

/// Header line prepended to the recommendation when any rule fires.
pub const ABNORMAL_HEADER: &str = "WARNING, ABNORMAL PARAMETERS:";
/// Recommendation returned when no rule fires.
pub const ALL_NORMAL: &str =
    "Parameters within normal range. The newborn requires no additional intervention.";

/// Rule engine mapping a measurement snapshot to a triage status and a
/// recommendation text.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: ClassificationThresholds,
}

impl Classifier {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a snapshot. Never fails; partial data gets a best-effort
    /// answer.
    pub fn classify(&self, snapshot: &MeasurementSnapshot) -> Classification {
        Classification {
            status: self.triage_status(snapshot),
            recommendation: self.recommendation(snapshot),
        }
    }

    /// Dashboard triage status; the highest-severity firing rule wins.
    ///
    /// A rule only participates when its measurement was actually
    /// recorded, so a newborn with no measurements at all is `Normal`.
    pub fn triage_status(&self, snapshot: &MeasurementSnapshot) -> TriageStatus {
        let t = &self.thresholds;
        if snapshot
            .apgar_5min
            .is_some_and(|score| score < t.apgar_alert_score)
        {
            return TriageStatus::Hospitalization;
        }
        let low_weight = snapshot
            .weight_kg
            .is_some_and(|weight| weight < t.low_birth_weight_kg);
        let low_oxygen = snapshot
            .oxygen_saturation_pct
            .is_some_and(|saturation| saturation < t.low_oxygen_saturation_pct);
        if low_weight || low_oxygen {
            return TriageStatus::Monitoring;
        }
        TriageStatus::Normal
    }

    /// Recommendation text built from the fixed rule list.
    ///
    /// Missing values fall back to the defaults the ward screens have
    /// always used: weight 0, APGAR 10, saturation 100. A missing weight
    /// therefore still raises the low-birth-weight warning; intake relies
    /// on that prompt, so the fallback stays as-is.
    pub fn recommendation(&self, snapshot: &MeasurementSnapshot) -> String {
        let t = &self.thresholds;
        let weight = snapshot.weight_kg.unwrap_or(0.0);
        let apgar_5min = snapshot.apgar_5min.unwrap_or(10);
        let saturation = snapshot.oxygen_saturation_pct.unwrap_or(100);

        let mut advice: Vec<String> = Vec::new();

        if apgar_5min < t.apgar_alert_score {
            advice.push(
                "Low APGAR score (below 7 at 5 minutes). Hospitalization and monitoring required."
                    .to_string(),
            );
        }
        if weight < t.low_birth_weight_kg {
            advice.push(format!(
                "Low birth weight ({} kg). Feeding and weight-gain monitoring required.",
                fmt_float(weight)
            ));
        }
        if saturation < t.low_oxygen_saturation_pct {
            advice.push(format!(
                "Low blood oxygenation ({}%). Additional saturation and breathing checks required.",
                saturation
            ));
        }

        if advice.is_empty() {
            return ALL_NORMAL.to_string();
        }
        format!("{}\n{}", ABNORMAL_HEADER, advice.join("\n"))
    }
}
