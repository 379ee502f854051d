//! Health-recovery milestones and the progress engine that walks them.

mod progress;
mod table;

pub use progress::{compute_progress, ProgressResult, BASELINE_DESCRIPTION, BASELINE_LABEL};
pub(crate) use progress::round_to;
pub use table::{MilestoneEntry, MilestoneTable};
