//! Milestone progress engine.
//!
//! Maps an elapsed-time state onto the milestone table: which milestone was
//! most recently reached, which one is next, and how far along the interval
//! between them the user is. The computation is pure and total; it never
//! reads the clock, so every edge case can be exercised by passing minutes
//! directly.

use serde::Serialize;

use super::table::{MilestoneEntry, MilestoneTable};
use crate::elapsed::ElapsedState;

/// Label of the synthetic threshold-0 milestone reported before the first
/// real milestone is reached.
pub const BASELINE_LABEL: &str = "Just Quit";
pub const BASELINE_DESCRIPTION: &str = "Congratulations on taking this step!";

/// Progress towards the next milestone.
///
/// Serialized with the field names existing consumers expect
/// (`currentLabel`, `currentDesc`, `nextLabel`, `nextDesc`, `progressRatio`,
/// `minutesElapsed`, `nextMinutes`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressResult {
    #[serde(rename = "currentLabel")]
    pub current_label: Option<String>,
    #[serde(rename = "currentDesc")]
    pub current_description: Option<String>,
    #[serde(rename = "nextLabel")]
    pub next_label: Option<String>,
    #[serde(rename = "nextDesc")]
    pub next_description: Option<String>,
    /// Fraction of the current interval completed, in `[0, 1]`, 3 decimals.
    #[serde(rename = "progressRatio")]
    pub progress_ratio: f64,
    #[serde(rename = "minutesElapsed")]
    pub minutes_elapsed: u64,
    /// Threshold of the next milestone, 0 when there is none.
    #[serde(rename = "nextMinutes")]
    pub next_threshold_minutes: u64,
}

impl ProgressResult {
    /// Result for "tracking not yet started".
    pub fn not_started() -> Self {
        Self {
            current_label: None,
            current_description: None,
            next_label: None,
            next_description: None,
            progress_ratio: 0.0,
            minutes_elapsed: 0,
            next_threshold_minutes: 0,
        }
    }

    pub fn is_started(&self) -> bool {
        self.current_label.is_some()
    }

    /// True once every milestone in the table has been reached.
    pub fn is_complete(&self) -> bool {
        self.is_started() && self.next_label.is_none()
    }
}

/// Compute milestone progress for `elapsed` against `table`.
///
/// An elapsed value exactly equal to a threshold counts as having reached
/// that milestone. A zero-width interval (duplicate thresholds) yields a
/// ratio of 1 instead of dividing by zero.
pub fn compute_progress(elapsed: ElapsedState, table: &MilestoneTable) -> ProgressResult {
    let minutes = match elapsed {
        ElapsedState::Unset => return ProgressResult::not_started(),
        ElapsedState::Minutes(m) => m,
    };

    let mut previous_threshold = 0u64;
    let mut previous: Option<&MilestoneEntry> = None;
    let mut next: Option<&MilestoneEntry> = None;

    for entry in table {
        if minutes < entry.threshold_minutes {
            next = Some(entry);
            break;
        }
        previous_threshold = entry.threshold_minutes;
        previous = Some(entry);
    }

    let ratio = match next {
        Some(next) if next.threshold_minutes > previous_threshold => {
            let delta = (next.threshold_minutes - previous_threshold) as f64;
            let done = minutes as f64 - previous_threshold as f64;
            (done / delta).clamp(0.0, 1.0)
        }
        _ => 1.0,
    };

    let (current_label, current_description) = match previous {
        Some(entry) => (entry.label.clone(), entry.description.clone()),
        None => (BASELINE_LABEL.to_string(), BASELINE_DESCRIPTION.to_string()),
    };

    ProgressResult {
        current_label: Some(current_label),
        current_description: Some(current_description),
        next_label: next.map(|e| e.label.clone()),
        next_description: next.map(|e| e.description.clone()),
        progress_ratio: round_to(ratio, 3),
        minutes_elapsed: minutes,
        next_threshold_minutes: next.map_or(0, |e| e.threshold_minutes),
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_step() -> MilestoneTable {
        MilestoneTable::new(vec![
            MilestoneEntry::new(20, "M1", "first"),
            MilestoneEntry::new(60, "M2", "second"),
        ])
    }

    fn at(minutes: u64) -> ProgressResult {
        compute_progress(ElapsedState::Minutes(minutes), &two_step())
    }

    #[test]
    fn zero_minutes_starts_at_baseline() {
        let p = at(0);
        assert_eq!(p.current_label.as_deref(), Some(BASELINE_LABEL));
        assert_eq!(p.current_description.as_deref(), Some(BASELINE_DESCRIPTION));
        assert_eq!(p.next_label.as_deref(), Some("M1"));
        assert_eq!(p.progress_ratio, 0.0);
        assert_eq!(p.next_threshold_minutes, 20);
    }

    #[test]
    fn halfway_to_first_milestone() {
        let p = at(10);
        assert_eq!(p.current_label.as_deref(), Some(BASELINE_LABEL));
        assert_eq!(p.next_label.as_deref(), Some("M1"));
        assert_eq!(p.progress_ratio, 0.5);
        assert_eq!(p.minutes_elapsed, 10);
    }

    #[test]
    fn exact_threshold_counts_as_reached() {
        let p = at(20);
        assert_eq!(p.current_label.as_deref(), Some("M1"));
        assert_eq!(p.current_description.as_deref(), Some("first"));
        assert_eq!(p.next_label.as_deref(), Some("M2"));
        assert_eq!(p.progress_ratio, 0.0);
        assert_eq!(p.next_threshold_minutes, 60);
    }

    #[test]
    fn past_last_milestone_is_complete() {
        let p = at(90);
        assert_eq!(p.current_label.as_deref(), Some("M2"));
        assert!(p.next_label.is_none());
        assert!(p.next_description.is_none());
        assert_eq!(p.progress_ratio, 1.0);
        assert_eq!(p.next_threshold_minutes, 0);
        assert!(p.is_complete());
    }

    #[test]
    fn exactly_last_threshold_is_complete() {
        let p = at(60);
        assert_eq!(p.current_label.as_deref(), Some("M2"));
        assert!(p.next_label.is_none());
        assert_eq!(p.progress_ratio, 1.0);
    }

    #[test]
    fn unset_yields_empty_result() {
        let p = compute_progress(ElapsedState::Unset, &two_step());
        assert_eq!(p, ProgressResult::not_started());
        assert!(!p.is_started());

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currentLabel": null,
                "currentDesc": null,
                "nextLabel": null,
                "nextDesc": null,
                "progressRatio": 0.0,
                "minutesElapsed": 0,
                "nextMinutes": 0
            })
        );
    }

    #[test]
    fn ratio_rounds_to_three_decimals() {
        let table = MilestoneTable::new(vec![MilestoneEntry::new(3, "M", "m")]);
        let p = compute_progress(ElapsedState::Minutes(1), &table);
        assert_eq!(p.progress_ratio, 0.333);
        let p = compute_progress(ElapsedState::Minutes(2), &table);
        assert_eq!(p.progress_ratio, 0.667);
    }

    #[test]
    fn duplicate_thresholds_advance_to_the_last_duplicate() {
        let table = MilestoneTable::new(vec![
            MilestoneEntry::new(20, "A", "a"),
            MilestoneEntry::new(20, "B", "b"),
            MilestoneEntry::new(60, "C", "c"),
        ]);
        let p = compute_progress(ElapsedState::Minutes(20), &table);
        assert_eq!(p.current_label.as_deref(), Some("B"));
        assert_eq!(p.next_label.as_deref(), Some("C"));
        assert_eq!(p.progress_ratio, 0.0);
    }

    #[test]
    fn zero_threshold_is_reached_immediately() {
        let table = MilestoneTable::new(vec![MilestoneEntry::new(0, "Zero", "z")]);
        let p = compute_progress(ElapsedState::Minutes(0), &table);
        assert_eq!(p.current_label.as_deref(), Some("Zero"));
        assert!(p.next_label.is_none());
        assert_eq!(p.progress_ratio, 1.0);
    }

    #[test]
    fn empty_table_is_complete_at_baseline() {
        let p = compute_progress(ElapsedState::Minutes(5), &MilestoneTable::new(Vec::new()));
        assert_eq!(p.current_label.as_deref(), Some(BASELINE_LABEL));
        assert!(p.next_label.is_none());
        assert_eq!(p.progress_ratio, 1.0);
    }

    #[test]
    fn builtin_week_and_a_half() {
        let minutes = 10 * 24 * 60 + 12 * 60;
        let p = compute_progress(ElapsedState::Minutes(minutes), MilestoneTable::builtin());
        assert_eq!(p.current_label.as_deref(), Some("1 Week"));
        assert_eq!(p.next_label.as_deref(), Some("2 Weeks"));
        assert_eq!(p.next_threshold_minutes, 14 * 24 * 60);
        assert_eq!(p.progress_ratio, 0.5);
    }

    #[test]
    fn wire_names_are_stable() {
        let json = serde_json::to_value(at(10)).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "currentLabel",
            "currentDesc",
            "nextLabel",
            "nextDesc",
            "progressRatio",
            "minutesElapsed",
            "nextMinutes",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 7);
    }

    /// Sorted tables of up to eight entries; duplicates are likely.
    fn arbitrary_table() -> impl Strategy<Value = MilestoneTable> {
        prop::collection::vec(0u64..500, 0..8).prop_map(|thresholds| {
            MilestoneTable::new(
                thresholds
                    .into_iter()
                    .enumerate()
                    .map(|(i, t)| MilestoneEntry::new(t, format!("M{i}"), format!("d{i}")))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn any_table_ratio_is_bounded(table in arbitrary_table(), minutes in 0u64..600) {
            let p = compute_progress(ElapsedState::Minutes(minutes), &table);
            prop_assert!((0.0..=1.0).contains(&p.progress_ratio));
            prop_assert_eq!(p.minutes_elapsed, minutes);
        }

        #[test]
        fn any_table_ratio_non_decreasing_within_interval(
            table in arbitrary_table(),
            minutes in 0u64..600,
        ) {
            let a = compute_progress(ElapsedState::Minutes(minutes), &table);
            let b = compute_progress(ElapsedState::Minutes(minutes + 1), &table);
            if a.current_label == b.current_label && a.next_label == b.next_label {
                prop_assert!(b.progress_ratio >= a.progress_ratio);
            }
        }

        #[test]
        fn any_table_past_last_threshold_is_complete(table in arbitrary_table(), extra in 0u64..100) {
            let last = table.last().map_or(0, |e| e.threshold_minutes);
            let p = compute_progress(ElapsedState::Minutes(last + extra), &table);
            prop_assert!(p.next_label.is_none());
            prop_assert_eq!(p.progress_ratio, 1.0);
        }

        #[test]
        fn ratio_is_bounded(minutes in 0u64..20_000_000) {
            let p = compute_progress(ElapsedState::Minutes(minutes), MilestoneTable::builtin());
            prop_assert!((0.0..=1.0).contains(&p.progress_ratio));
        }

        #[test]
        fn before_first_threshold_reports_baseline(minutes in 0u64..20) {
            let p = at(minutes);
            prop_assert_eq!(p.current_label.as_deref(), Some(BASELINE_LABEL));
            prop_assert_eq!(p.next_label.as_deref(), Some("M1"));
        }

        #[test]
        fn at_or_past_last_threshold_is_complete(minutes in 60u64..1_000_000) {
            let p = at(minutes);
            prop_assert!(p.next_label.is_none());
            prop_assert_eq!(p.progress_ratio, 1.0);
        }

        #[test]
        fn reaching_a_threshold_reports_it_as_current(index in 0usize..15) {
            let table = MilestoneTable::builtin();
            let entry = &table.entries()[index];
            let p = compute_progress(ElapsedState::Minutes(entry.threshold_minutes), table);
            prop_assert_eq!(p.current_label.as_deref(), Some(entry.label.as_str()));
            prop_assert_ne!(p.next_label.as_deref(), Some(entry.label.as_str()));
        }

        #[test]
        fn ratio_non_decreasing_within_interval(minutes in 0u64..20_000_000) {
            let table = MilestoneTable::builtin();
            let a = compute_progress(ElapsedState::Minutes(minutes), table);
            let b = compute_progress(ElapsedState::Minutes(minutes + 1), table);
            if a.current_label == b.current_label {
                prop_assert!(b.progress_ratio >= a.progress_ratio);
            }
        }
    }
}
