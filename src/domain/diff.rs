//! Field-level diffing between consecutive version snapshots.
//!
//! Each versioned entity kind declares its tracked fields once, as a list
//! of labelled display values; the comparison routine is written a single
//! time over those lists. Enum-valued fields compare by their
//! human-readable labels and reference fields by their resolved display
//! names, so the diff text reads the way the records are shown.

use super::display::{fmt_flag, fmt_float};
use super::models::version::{VersionSnapshot, VersionedState};

/// Placeholder rendered when an optional value or reference is absent.
pub const NONE_PLACEHOLDER: &str = "none";
/// Placeholder rendered when a reference exists but cannot be resolved.
pub const UNRESOLVED_PLACEHOLDER: &str = "(unknown)";
/// Fallback description when two consecutive snapshots show no field
/// change, or when a chain is malformed.
pub const RECORD_CREATED: &str = "Record created";

/// Resolves entity references to display strings while diff text is being
/// built. Lookups that fail degrade to placeholders; diffing never fails.
pub trait ReferenceResolver {
    /// Display name for a mother reference, if it resolves.
    fn mother_display_name(&self, mother_id: &str) -> Option<String>;
}

/// One tracked field of a versioned entity: its label and the value
/// rendered for display.
struct TrackedField {
    label: &'static str,
    value: String,
}

fn field(label: &'static str, value: String) -> TrackedField {
    TrackedField { label, value }
}

/// The tracked fields of a snapshot's state, in their fixed display order.
fn tracked_fields(state: &VersionedState, resolver: &dyn ReferenceResolver) -> Vec<TrackedField> {
    match state {
        VersionedState::Mother(m) => vec![
            field("National ID", m.national_id.clone()),
            field("First Name", m.first_name.clone()),
            field("Last Name", m.last_name.clone()),
            field(
                "Blood Group",
                if m.blood_group.trim().is_empty() {
                    NONE_PLACEHOLDER.to_string()
                } else {
                    m.blood_group.clone()
                },
            ),
            field("Serological Conflict", fmt_flag(m.serological_conflict).to_string()),
        ],
        VersionedState::Newborn(n) => vec![
            field("First Name", n.name.clone()),
            field("Date of Birth", n.birth_date.to_string()),
            field("Sex", n.sex.label().to_string()),
            field(
                "Blood Group",
                n.blood_group
                    .clone()
                    .filter(|group| !group.trim().is_empty())
                    .unwrap_or_else(|| NONE_PLACEHOLDER.to_string()),
            ),
            field(
                "Mother",
                match &n.mother_id {
                    Some(mother_id) => resolver
                        .mother_display_name(mother_id)
                        .unwrap_or_else(|| UNRESOLVED_PLACEHOLDER.to_string()),
                    None => NONE_PLACEHOLDER.to_string(),
                },
            ),
        ],
        VersionedState::ExternalParameters(p) => vec![
            field("Height (cm)", fmt_float(p.height_cm)),
            field("Weight (kg)", fmt_float(p.weight_kg)),
            field("Premature", fmt_flag(p.premature).to_string()),
            field("Head Circumference (cm)", fmt_float(p.head_circumference_cm)),
            field("Breaths/min", p.respiratory_rate.to_string()),
            field("O2 Saturation (%)", p.oxygen_saturation.to_string()),
        ],
        VersionedState::ApgarScore(a) => vec![
            field("1 Minute Score", a.score_1min.to_string()),
            field("5 Minute Score", a.score_5min.to_string()),
            field(
                "10 Minute Score",
                a.score_10min
                    .map(|score| score.to_string())
                    .unwrap_or_else(|| NONE_PLACEHOLDER.to_string()),
            ),
        ],
    }
}

/// Describe the transition from `prev` to `curr` as display text.
///
/// The first snapshot of a chain gets a synthesized first-version
/// description listing the initial values. Later snapshots get one
/// "label: old → new" clause per changed field, joined with "; ". A pair
/// with nothing changed, or a malformed chain mixing entity kinds,
/// degrades to a generic message.
pub fn build_diff_description(
    prev: Option<&VersionSnapshot>,
    curr: &VersionSnapshot,
    resolver: &dyn ReferenceResolver,
) -> String {
    let curr_fields = tracked_fields(&curr.state, resolver);

    let prev = match prev {
        Some(prev) => prev,
        None => {
            let listed: Vec<String> = curr_fields
                .iter()
                .map(|f| format!("{}: {}", f.label, f.value))
                .collect();
            return format!("First version: {}", listed.join("; "));
        }
    };
    if prev.state.kind() != curr.state.kind() {
        return RECORD_CREATED.to_string();
    }

    let prev_fields = tracked_fields(&prev.state, resolver);
    let clauses: Vec<String> = prev_fields
        .iter()
        .zip(curr_fields.iter())
        .filter(|(before, after)| before.value != after.value)
        .map(|(before, after)| format!("{}: {} → {}", after.label, before.value, after.value))
        .collect();

    if clauses.is_empty() {
        return RECORD_CREATED.to_string();
    }
    clauses.join("; ")
}
