//! Serological incompatibility screening between mother and newborn.

use log::debug;

use super::models::mother::Mother;

/// Warning line appended to a newborn's recommendation when a possible
/// serological conflict is detected.
pub const SEROLOGICAL_CONFLICT_WARNING: &str =
    "Possible serological conflict with the mother's blood group. Immunological monitoring required.";

/// Check whether the mother's and newborn's blood groups suggest a
/// serological conflict.
///
/// The check only runs when the mother was flagged for serological risk
/// and the newborn's blood group has been determined. It is a screening
/// heuristic, not a full ABO/Rh compatibility table: an Rh-negative mother
/// with an Rh-positive newborn is flagged, and so is any textual mismatch
/// between the two recorded groups.
pub fn detect_conflict(mother: &Mother, newborn_blood_group: Option<&str>) -> bool {
    if !mother.serological_conflict {
        return false;
    }
    let newborn_group = match newborn_blood_group {
        Some(group) if !group.trim().is_empty() => group.trim().to_uppercase(),
        _ => return false,
    };
    let mother_group = mother.blood_group.trim().to_uppercase();

    if mother_group.contains('-') && newborn_group.contains('+') {
        debug!(
            "Rh mismatch between mother ({}) and newborn ({})",
            mother_group, newborn_group
        );
        return true;
    }
    !mother_group.is_empty() && mother_group != newborn_group
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mother(blood_group: &str, serological_conflict: bool) -> Mother {
        let now = Utc::now();
        Mother {
            id: Mother::generate_id(),
            national_id: "89010112345".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Kowalska".to_string(),
            blood_group: blood_group.to_string(),
            serological_conflict,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_rh_negative_mother_rh_positive_newborn() {
        assert!(detect_conflict(&mother("O-", true), Some("A+")));
    }

    #[test]
    fn test_matching_groups_no_conflict() {
        assert!(!detect_conflict(&mother("A+", true), Some("A+")));
    }

    #[test]
    fn test_flag_unset_never_conflicts() {
        assert!(!detect_conflict(&mother("O-", false), Some("A+")));
        assert!(!detect_conflict(&mother("A+", false), Some("B-")));
    }

    #[test]
    fn test_textual_mismatch_conflicts() {
        assert!(detect_conflict(&mother("B+", true), Some("A+")));
    }

    #[test]
    fn test_comparison_is_case_insensitive() {
        assert!(!detect_conflict(&mother("a+", true), Some("A+")));
    }

    #[test]
    fn test_missing_groups_never_conflict() {
        assert!(!detect_conflict(&mother("", true), Some("A+")));
        assert!(!detect_conflict(&mother("O-", true), Some("  ")));
        assert!(!detect_conflict(&mother("O-", true), None));
    }
}
