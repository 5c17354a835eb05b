//! Ward dashboard reporting.
//!
//! Builds one status row per newborn for the doctors' dashboard: the
//! triage status and the recommendation text, both derived from the same
//! latest-measurement snapshot, with the serological warning appended when
//! the mother/newborn blood groups call for it.

use anyhow::Result;
use log::{info, warn};

use crate::domain::classification::{
    ClassificationThresholds, Classifier, MeasurementSnapshot, TriageStatus,
};
use crate::domain::models::newborn::Newborn;
use crate::domain::serology;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::{MeasurementStorage, MotherStorage, NewbornStorage};

/// One dashboard row: a newborn and its derived triage state.
#[derive(Debug, Clone, PartialEq)]
pub struct NewbornStatusRow {
    pub newborn: Newborn,
    pub status: TriageStatus,
    pub verdict: String,
}

/// Service assembling the doctors' dashboard.
#[derive(Clone)]
pub struct ReportService {
    store: MemoryStore,
    classifier: Classifier,
}

impl ReportService {
    /// Create a new ReportService with the default thresholds
    pub fn new(store: MemoryStore) -> Self {
        Self::with_thresholds(store, ClassificationThresholds::default())
    }

    /// Create a ReportService with custom thresholds
    pub fn with_thresholds(store: MemoryStore, thresholds: ClassificationThresholds) -> Self {
        Self {
            store,
            classifier: Classifier::new(thresholds),
        }
    }

    /// Status rows for every newborn on the ward
    pub fn newborn_status_rows(&self) -> Result<Vec<NewbornStatusRow>> {
        let newborns = self.store.list_newborns()?;
        info!("Building dashboard rows for {} newborns", newborns.len());

        newborns
            .into_iter()
            .map(|newborn| self.status_row(newborn))
            .collect()
    }

    /// Build the dashboard row for a single newborn
    pub fn status_row(&self, newborn: Newborn) -> Result<NewbornStatusRow> {
        let latest_parameters = self.store.latest_parameters(&newborn.id)?;
        let latest_apgar = self.store.latest_apgar(&newborn.id)?;

        // One snapshot feeds both derivations.
        let snapshot =
            MeasurementSnapshot::from_latest(latest_parameters.as_ref(), latest_apgar.as_ref());
        let classification = self.classifier.classify(&snapshot);

        let mut verdict = classification.recommendation;
        if let Some(mother_id) = &newborn.mother_id {
            match self.store.get_mother(mother_id)? {
                Some(mother) => {
                    if serology::detect_conflict(&mother, newborn.blood_group.as_deref()) {
                        verdict.push('\n');
                        verdict.push_str(serology::SEROLOGICAL_CONFLICT_WARNING);
                    }
                }
                None => warn!(
                    "Mother reference {} on newborn {} does not resolve",
                    mother_id, newborn.id
                ),
            }
        }

        Ok(NewbornStatusRow {
            newborn,
            status: classification.status,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::measurement::{RecordApgarCommand, RecordParametersCommand};
    use crate::domain::commands::mother::CreateMotherCommand;
    use crate::domain::commands::newborn::CreateNewbornCommand;
    use crate::domain::classification::ALL_NORMAL;
    use crate::domain::measurement_service::MeasurementService;
    use crate::domain::models::newborn::Sex;
    use crate::domain::mother_service::MotherService;
    use crate::domain::newborn_service::NewbornService;

    struct Fixture {
        mothers: MotherService,
        newborns: NewbornService,
        measurements: MeasurementService,
        reports: ReportService,
    }

    fn setup_test() -> Fixture {
        let store = MemoryStore::new();
        Fixture {
            mothers: MotherService::new(store.clone()),
            newborns: NewbornService::new(store.clone()),
            measurements: MeasurementService::new(store.clone()),
            reports: ReportService::new(store),
        }
    }

    fn create_newborn(
        fixture: &Fixture,
        mother_id: Option<String>,
        blood_group: Option<&str>,
    ) -> String {
        fixture
            .newborns
            .create_newborn(CreateNewbornCommand {
                name: "Zofia".to_string(),
                birth_date: "2026-08-01".to_string(),
                sex: Sex::Female,
                mother_id,
                blood_group: blood_group.map(str::to_string),
                recorded_by: None,
            })
            .unwrap()
            .id
    }

    fn record_normal_measurements(fixture: &Fixture, newborn_id: &str) {
        fixture
            .measurements
            .record_parameters(RecordParametersCommand {
                newborn_id: newborn_id.to_string(),
                height_cm: 52.0,
                weight_kg: 3.4,
                premature: false,
                head_circumference_cm: 34.0,
                respiratory_rate: 40,
                oxygen_saturation: 98,
                recorded_by: None,
            })
            .unwrap();
        fixture
            .measurements
            .record_apgar(RecordApgarCommand {
                newborn_id: newborn_id.to_string(),
                score_1min: 8,
                score_5min: 9,
                score_10min: None,
                recorded_by: None,
            })
            .unwrap();
    }

    #[test]
    fn test_normal_row() {
        let fixture = setup_test();
        let newborn_id = create_newborn(&fixture, None, None);
        record_normal_measurements(&fixture, &newborn_id);

        let rows = fixture.reports.newborn_status_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, TriageStatus::Normal);
        assert_eq!(rows[0].verdict, ALL_NORMAL);
    }

    #[test]
    fn test_low_apgar_row_is_hospitalization() {
        let fixture = setup_test();
        let newborn_id = create_newborn(&fixture, None, None);
        record_normal_measurements(&fixture, &newborn_id);
        fixture
            .measurements
            .record_apgar(RecordApgarCommand {
                newborn_id: newborn_id.clone(),
                score_1min: 5,
                score_5min: 6,
                score_10min: None,
                recorded_by: None,
            })
            .unwrap();

        let rows = fixture.reports.newborn_status_rows().unwrap();
        assert_eq!(rows[0].status, TriageStatus::Hospitalization);
        assert!(rows[0].verdict.contains("Low APGAR score"));
    }

    /// A newborn with no measurements keeps status Normal while the
    /// verdict carries the fallback-weight warning. Both sides of the
    /// legacy behavior, preserved.
    #[test]
    fn test_unmeasured_newborn_row() {
        let fixture = setup_test();
        create_newborn(&fixture, None, None);

        let rows = fixture.reports.newborn_status_rows().unwrap();
        assert_eq!(rows[0].status, TriageStatus::Normal);
        assert!(rows[0].verdict.contains("Low birth weight (0.0 kg)"));
    }

    #[test]
    fn test_serological_warning_appended() {
        let fixture = setup_test();
        let mother = fixture
            .mothers
            .create_mother(CreateMotherCommand {
                national_id: "89010112345".to_string(),
                first_name: "Anna".to_string(),
                last_name: "Kowalska".to_string(),
                blood_group: "O-".to_string(),
                serological_conflict: true,
                recorded_by: None,
            })
            .unwrap();
        let newborn_id = create_newborn(&fixture, Some(mother.id), Some("A+"));
        record_normal_measurements(&fixture, &newborn_id);

        let rows = fixture.reports.newborn_status_rows().unwrap();
        let verdict = &rows[0].verdict;
        assert!(verdict.starts_with(ALL_NORMAL));
        assert!(verdict.ends_with(serology::SEROLOGICAL_CONFLICT_WARNING));
    }

    #[test]
    fn test_no_warning_when_flag_unset() {
        let fixture = setup_test();
        let mother = fixture
            .mothers
            .create_mother(CreateMotherCommand {
                national_id: "89010112345".to_string(),
                first_name: "Anna".to_string(),
                last_name: "Kowalska".to_string(),
                blood_group: "O-".to_string(),
                serological_conflict: false,
                recorded_by: None,
            })
            .unwrap();
        let newborn_id = create_newborn(&fixture, Some(mother.id), Some("A+"));
        record_normal_measurements(&fixture, &newborn_id);

        let rows = fixture.reports.newborn_status_rows().unwrap();
        assert_eq!(rows[0].verdict, ALL_NORMAL);
    }
}
