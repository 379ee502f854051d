use std::sync::LazyLock;

use serde::Serialize;

const HOUR: u64 = 60;
const DAY: u64 = 24 * HOUR;

/// A health-recovery fact that is reached once `threshold_minutes` have
/// elapsed since quitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneEntry {
    pub threshold_minutes: u64,
    pub label: String,
    pub description: String,
}

impl MilestoneEntry {
    pub fn new(
        threshold_minutes: u64,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            threshold_minutes,
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Ordered milestone table.
///
/// Entries are sorted ascending by threshold on construction, so a table
/// literal edited out of order still scans correctly. Duplicate thresholds
/// are kept in insertion order; the progress engine guards the resulting
/// zero-width interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneTable {
    entries: Vec<MilestoneEntry>,
}

static BUILTIN: LazyLock<MilestoneTable> = LazyLock::new(|| {
    MilestoneTable::new(vec![
        MilestoneEntry::new(
            20,
            "20 Minutes",
            "Your heart rate and blood pressure are dropping back to normal levels.",
        ),
        MilestoneEntry::new(
            8 * HOUR,
            "8 Hours",
            "Carbon monoxide levels in the blood decrease, improving oxygen delivery.",
        ),
        MilestoneEntry::new(
            12 * HOUR,
            "12 Hours",
            "Carbon monoxide levels return to normal, more oxygen in your blood!",
        ),
        MilestoneEntry::new(
            24 * HOUR,
            "24 Hours",
            "Your risk of heart attack begins to decrease as your body cleanses itself of nicotine.",
        ),
        MilestoneEntry::new(
            48 * HOUR,
            "48 Hours",
            "Taste and smell start to improve as nerve endings recover.",
        ),
        MilestoneEntry::new(
            72 * HOUR,
            "72 Hours",
            "Bronchial tubes relax, making breathing easier. Energy levels improve.",
        ),
        MilestoneEntry::new(
            7 * DAY,
            "1 Week",
            "Withdrawal symptoms begin to subside, mental clarity increases!",
        ),
        MilestoneEntry::new(
            14 * DAY,
            "2 Weeks",
            "Circulation improves, and your lung function continues to recover.",
        ),
        MilestoneEntry::new(
            30 * DAY,
            "1 Month",
            "Coughing and shortness of breath decrease significantly.",
        ),
        MilestoneEntry::new(
            3 * 30 * DAY,
            "3 Months",
            "Your circulation and lung function have made remarkable progress!",
        ),
        MilestoneEntry::new(
            6 * 30 * DAY,
            "6 Months",
            "You\u{2019}re breathing easier and have fewer lung infections.",
        ),
        MilestoneEntry::new(
            12 * 30 * DAY,
            "1 Year",
            "Your risk of heart disease is about half that of a smoker.",
        ),
        MilestoneEntry::new(
            5 * 365 * DAY,
            "5 Years",
            "Stroke risk is now similar to that of a non-smoker.",
        ),
        MilestoneEntry::new(
            10 * 365 * DAY,
            "10 Years",
            "Lung cancer risk is about half that of someone who still smokes.",
        ),
        MilestoneEntry::new(
            15 * 365 * DAY,
            "15 Years",
            "Your risk of heart disease is the same as someone who never smoked!",
        ),
    ])
});

impl MilestoneTable {
    pub fn new(mut entries: Vec<MilestoneEntry>) -> Self {
        entries.sort_by_key(|e| e.threshold_minutes);
        Self { entries }
    }

    /// The built-in recovery timeline, built once per process.
    pub fn builtin() -> &'static MilestoneTable {
        &BUILTIN
    }

    pub fn entries(&self) -> &[MilestoneEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &MilestoneEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&MilestoneEntry> {
        self.entries.last()
    }
}

impl<'a> IntoIterator for &'a MilestoneTable {
    type Item = &'a MilestoneEntry;
    type IntoIter = std::slice::Iter<'a, MilestoneEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
