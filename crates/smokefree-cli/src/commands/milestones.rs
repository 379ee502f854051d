use smokefree_core::{MilestoneTable, Tracker};

use crate::render::format_minutes;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let table = MilestoneTable::builtin();

    if json {
        println!("{}", serde_json::to_string_pretty(table.entries())?);
        return Ok(());
    }

    let tracker = Tracker::open()?;
    let reached = tracker.elapsed()?.minutes();

    for entry in table {
        let mark = match reached {
            Some(m) if m >= entry.threshold_minutes => "x",
            _ => " ",
        };
        println!(
            "[{mark}] {:<10} {:>12}  {}",
            entry.label,
            format_minutes(entry.threshold_minutes),
            entry.description
        );
    }
    Ok(())
}
