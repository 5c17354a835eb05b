//! Audit timeline over versioned clinical records.
//!
//! Stateless reads over the version chains the entity services append to,
//! plus the one mutating operation: restore, which republishes a
//! historical snapshot as the entity's new current record. The timeline is
//! a point-in-time read and takes no lock; a build that races a write
//! simply reflects whichever chains existed when it ran.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::domain::diff::{self, ReferenceResolver, UNRESOLVED_PLACEHOLDER};
use crate::domain::models::version::{AuditError, EntityKind, VersionSnapshot, VersionedState};
use crate::domain::version_log;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::{
    ClinicianDirectory, MeasurementStorage, MotherStorage, NewbornStorage, VersionStorage,
};

/// Reference identifying one historical snapshot for a later restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreRef {
    pub kind: EntityKind,
    pub snapshot_id: String,
}

/// One row of the audit feed for a newborn.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub occurred_at: DateTime<Utc>,
    /// Display name of the clinician who made the change, when recorded.
    pub clinician: Option<String>,
    pub kind: EntityKind,
    pub description: String,
    /// Hand this back to [`AuditService::restore`] to republish the
    /// underlying snapshot.
    pub restore_ref: RestoreRef,
}

/// Service building audit timelines and executing restores.
#[derive(Clone)]
pub struct AuditService {
    store: MemoryStore,
}

struct StoreResolver<'a> {
    store: &'a MemoryStore,
}

impl ReferenceResolver for StoreResolver<'_> {
    fn mother_display_name(&self, mother_id: &str) -> Option<String> {
        match self.store.get_mother(mother_id) {
            Ok(Some(mother)) => Some(mother.display_name()),
            Ok(None) => None,
            Err(err) => {
                warn!("Failed to resolve mother {}: {}", mother_id, err);
                None
            }
        }
    }
}

impl AuditService {
    /// Create a new AuditService
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Build the merged audit feed for one newborn: its own versions, its
    /// mother's, and those of every measurement recorded for it, most
    /// recent first.
    ///
    /// The build is total over whatever data exists: unresolved references
    /// degrade to placeholder text, never to a failed timeline.
    pub fn build_timeline(&self, newborn_id: &str) -> Result<Vec<TimelineEntry>> {
        info!("Building audit timeline for newborn: {}", newborn_id);

        let mut entries = Vec::new();
        self.collect_chain(EntityKind::Newborn, newborn_id, &mut entries)?;

        if let Some(newborn) = self.store.get_newborn(newborn_id)? {
            if let Some(mother_id) = &newborn.mother_id {
                self.collect_chain(EntityKind::Mother, mother_id, &mut entries)?;
            }
        }
        for parameters in self.store.list_parameters(newborn_id)? {
            self.collect_chain(EntityKind::ExternalParameters, &parameters.id, &mut entries)?;
        }
        for apgar in self.store.list_apgar_scores(newborn_id)? {
            self.collect_chain(EntityKind::ApgarScore, &apgar.id, &mut entries)?;
        }

        // Stable sort: equal timestamps keep chain concatenation order.
        entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

        info!("Timeline for {} has {} entries", newborn_id, entries.len());
        Ok(entries)
    }

    /// Recreate the state captured in a historical snapshot as the
    /// entity's new current record.
    ///
    /// The snapshot itself is left untouched. The restored values go
    /// through the ordinary save path, so a fresh version snapshot is
    /// appended on top of the pre-restore current and the restore shows up
    /// as the newest timeline entry. For measurement records the original
    /// measurement timestamp is kept; the recording clinician becomes the
    /// caller, not the original recorder.
    pub fn restore(
        &self,
        restore_ref: &RestoreRef,
        acting_clinician: Option<&str>,
    ) -> Result<VersionedState> {
        info!(
            "Restoring snapshot {} ({})",
            restore_ref.snapshot_id,
            restore_ref.kind.label()
        );

        let snapshot = self
            .store
            .get_snapshot(&restore_ref.snapshot_id)?
            .filter(|snapshot| snapshot.state.kind() == restore_ref.kind)
            .ok_or_else(|| AuditError::SnapshotNotFound(restore_ref.snapshot_id.clone()))?;

        let now = Utc::now();
        let restored = match snapshot.state {
            VersionedState::Mother(mut mother) => {
                mother.updated_at = now;
                self.store.update_mother(&mother)?;
                VersionedState::Mother(mother)
            }
            VersionedState::Newborn(mut newborn) => {
                newborn.updated_at = now;
                self.store.update_newborn(&newborn)?;
                VersionedState::Newborn(newborn)
            }
            VersionedState::ExternalParameters(mut parameters) => {
                parameters.recorded_by = acting_clinician.map(str::to_string);
                parameters.updated_at = now;
                self.store.update_parameters(&parameters)?;
                VersionedState::ExternalParameters(parameters)
            }
            VersionedState::ApgarScore(mut apgar) => {
                apgar.recorded_by = acting_clinician.map(str::to_string);
                apgar.updated_at = now;
                self.store.update_apgar(&apgar)?;
                VersionedState::ApgarScore(apgar)
            }
        };

        let new_head = version_log::record(&self.store, restored.clone(), acting_clinician)?;
        info!(
            "Restored {} {} as snapshot {}",
            restored.kind().label(),
            restored.entity_id(),
            new_head.id
        );
        Ok(restored)
    }

    fn collect_chain(
        &self,
        kind: EntityKind,
        entity_id: &str,
        entries: &mut Vec<TimelineEntry>,
    ) -> Result<()> {
        let resolver = StoreResolver { store: &self.store };
        let chain = self.store.version_chain(kind, entity_id)?;

        let mut previous: Option<&VersionSnapshot> = None;
        for snapshot in &chain {
            entries.push(TimelineEntry {
                occurred_at: snapshot.recorded_at,
                clinician: snapshot
                    .recorded_by
                    .as_deref()
                    .map(|clinician_id| self.clinician_display(clinician_id)),
                kind,
                description: diff::build_diff_description(previous, snapshot, &resolver),
                restore_ref: RestoreRef {
                    kind,
                    snapshot_id: snapshot.id.clone(),
                },
            });
            previous = Some(snapshot);
        }
        Ok(())
    }

    fn clinician_display(&self, clinician_id: &str) -> String {
        match self.store.clinician_display_name(clinician_id) {
            Ok(Some(name)) => name,
            Ok(None) => UNRESOLVED_PLACEHOLDER.to_string(),
            Err(err) => {
                warn!("Failed to resolve clinician {}: {}", clinician_id, err);
                UNRESOLVED_PLACEHOLDER.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::measurement::{RecordParametersCommand, UpdateParametersCommand};
    use crate::domain::commands::mother::{CreateMotherCommand, UpdateMotherCommand};
    use crate::domain::commands::newborn::{CreateNewbornCommand, UpdateNewbornCommand};
    use crate::domain::measurement_service::MeasurementService;
    use crate::domain::models::newborn::Sex;
    use crate::domain::mother_service::MotherService;
    use crate::domain::newborn_service::NewbornService;

    struct Fixture {
        store: MemoryStore,
        mothers: MotherService,
        newborns: NewbornService,
        measurements: MeasurementService,
        audit: AuditService,
    }

    fn setup_test() -> Fixture {
        let store = MemoryStore::new();
        Fixture {
            mothers: MotherService::new(store.clone()),
            newborns: NewbornService::new(store.clone()),
            measurements: MeasurementService::new(store.clone()),
            audit: AuditService::new(store.clone()),
            store,
        }
    }

    fn create_newborn(fixture: &Fixture, mother_id: Option<String>) -> String {
        fixture
            .newborns
            .create_newborn(CreateNewbornCommand {
                name: "Zofia".to_string(),
                birth_date: "2026-08-01".to_string(),
                sex: Sex::Female,
                mother_id,
                blood_group: None,
                recorded_by: Some("clinician::1".to_string()),
            })
            .unwrap()
            .id
    }

    fn parameters_command(newborn_id: &str, weight_kg: f64) -> RecordParametersCommand {
        RecordParametersCommand {
            newborn_id: newborn_id.to_string(),
            height_cm: 52.0,
            weight_kg,
            premature: false,
            head_circumference_cm: 34.0,
            respiratory_rate: 40,
            oxygen_saturation: 98,
            recorded_by: Some("clinician::1".to_string()),
        }
    }

    #[test]
    fn test_timeline_merges_chains_most_recent_first() {
        let fixture = setup_test();
        let newborn_id = create_newborn(&fixture, None);
        fixture
            .measurements
            .record_parameters(parameters_command(&newborn_id, 3.4))
            .unwrap();

        let timeline = fixture.audit.build_timeline(&newborn_id).unwrap();
        assert_eq!(timeline.len(), 2);
        // The parameters record was saved after the newborn record.
        assert_eq!(timeline[0].kind, EntityKind::ExternalParameters);
        assert_eq!(timeline[1].kind, EntityKind::Newborn);
        assert!(timeline[0].occurred_at >= timeline[1].occurred_at);
        assert!(timeline[1].description.starts_with("First version:"));
    }

    #[test]
    fn test_timeline_includes_mother_chain() {
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
        let newborn_id = create_newborn(&fixture, Some(mother.id.clone()));
        fixture
            .mothers
            .update_mother(UpdateMotherCommand {
                mother_id: mother.id.clone(),
                blood_group: Some("AB-".to_string()),
                ..Default::default()
            })
            .unwrap();

        let timeline = fixture.audit.build_timeline(&newborn_id).unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].kind, EntityKind::Mother);
        assert_eq!(timeline[0].description, "Blood Group: O- → AB-");
    }

    #[test]
    fn test_timeline_is_idempotent() {
        let fixture = setup_test();
        let newborn_id = create_newborn(&fixture, None);
        fixture
            .measurements
            .record_parameters(parameters_command(&newborn_id, 3.4))
            .unwrap();
        fixture
            .newborns
            .update_newborn(UpdateNewbornCommand {
                newborn_id: newborn_id.clone(),
                name: Some("Zofia Maria".to_string()),
                ..Default::default()
            })
            .unwrap();

        let first = fixture.audit.build_timeline(&newborn_id).unwrap();
        let second = fixture.audit.build_timeline(&newborn_id).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clinician_resolution_and_placeholder() {
        let fixture = setup_test();
        fixture
            .store
            .register_clinician("clinician::1", "Dr. Nowak")
            .unwrap();
        let newborn_id = create_newborn(&fixture, None);
        fixture
            .newborns
            .update_newborn(UpdateNewbornCommand {
                newborn_id: newborn_id.clone(),
                name: Some("Zofia Maria".to_string()),
                recorded_by: Some("clinician::gone".to_string()),
                ..Default::default()
            })
            .unwrap();

        let timeline = fixture.audit.build_timeline(&newborn_id).unwrap();
        assert_eq!(timeline[0].clinician.as_deref(), Some(UNRESOLVED_PLACEHOLDER));
        assert_eq!(timeline[1].clinician.as_deref(), Some("Dr. Nowak"));
    }

    #[test]
    fn test_restore_round_trip() {
        let fixture = setup_test();
        let newborn_id = create_newborn(&fixture, None);
        let parameters = fixture
            .measurements
            .record_parameters(parameters_command(&newborn_id, 3.4))
            .unwrap();

        // Edit the record so the original snapshot differs from current.
        let chain = fixture
            .store
            .version_chain(EntityKind::ExternalParameters, &parameters.id)
            .unwrap();
        let original_snapshot = chain[0].clone();
        fixture
            .measurements
            .update_parameters(UpdateParametersCommand {
                parameters_id: parameters.id.clone(),
                weight_kg: Some(2.1),
                oxygen_saturation: Some(90),
                ..Default::default()
            })
            .unwrap();

        let restored = fixture
            .audit
            .restore(
                &RestoreRef {
                    kind: EntityKind::ExternalParameters,
                    snapshot_id: original_snapshot.id.clone(),
                },
                Some("clinician::2"),
            )
            .unwrap();

        let restored_parameters = match restored {
            VersionedState::ExternalParameters(p) => p,
            other => panic!("Unexpected restored state: {:?}", other),
        };
        assert_eq!(restored_parameters.weight_kg, 3.4);
        assert_eq!(restored_parameters.oxygen_saturation, 98);
        assert_eq!(restored_parameters.measured_at, parameters.measured_at);
        assert_eq!(restored_parameters.recorded_by.as_deref(), Some("clinician::2"));

        // History grew; nothing was rewound.
        let chain = fixture
            .store
            .version_chain(EntityKind::ExternalParameters, &parameters.id)
            .unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0], original_snapshot);
        assert_eq!(chain[2].previous_id, Some(chain[1].id.clone()));

        // The restore diff mirrors the diff back to the restored snapshot.
        struct NoMothers;
        impl crate::domain::diff::ReferenceResolver for NoMothers {
            fn mother_display_name(&self, _: &str) -> Option<String> {
                None
            }
        }
        let restore_diff =
            diff::build_diff_description(Some(&chain[1]), &chain[2], &NoMothers);
        let rollback_diff =
            diff::build_diff_description(Some(&chain[1]), &chain[0], &NoMothers);
        assert_eq!(restore_diff, rollback_diff);
        assert_eq!(
            restore_diff,
            "Weight (kg): 2.1 → 3.4; O2 Saturation (%): 90 → 98"
        );
    }

    #[test]
    fn test_restore_unknown_snapshot_fails() {
        let fixture = setup_test();
        let result = fixture.audit.restore(
            &RestoreRef {
                kind: EntityKind::Newborn,
                snapshot_id: "version::missing".to_string(),
            },
            None,
        );

        let err = result.unwrap_err();
        assert!(err.downcast_ref::<AuditError>().is_some());
    }

    #[test]
    fn test_restore_kind_mismatch_fails() {
        let fixture = setup_test();
        let newborn_id = create_newborn(&fixture, None);
        let chain = fixture
            .store
            .version_chain(EntityKind::Newborn, &newborn_id)
            .unwrap();

        let result = fixture.audit.restore(
            &RestoreRef {
                kind: EntityKind::Mother,
                snapshot_id: chain[0].id.clone(),
            },
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_restored_newborn_becomes_newest_entry() {
        let fixture = setup_test();
        let newborn_id = create_newborn(&fixture, None);
        fixture
            .newborns
            .update_newborn(UpdateNewbornCommand {
                newborn_id: newborn_id.clone(),
                name: Some("Zofia Maria".to_string()),
                ..Default::default()
            })
            .unwrap();
        let chain = fixture
            .store
            .version_chain(EntityKind::Newborn, &newborn_id)
            .unwrap();

        fixture
            .audit
            .restore(
                &RestoreRef {
                    kind: EntityKind::Newborn,
                    snapshot_id: chain[0].id.clone(),
                },
                Some("clinician::2"),
            )
            .unwrap();

        let current = fixture.newborns.get_newborn(&newborn_id).unwrap().unwrap();
        assert_eq!(current.name, "Zofia");

        let timeline = fixture.audit.build_timeline(&newborn_id).unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].description, "First Name: Zofia Maria → Zofia");
    }
}
