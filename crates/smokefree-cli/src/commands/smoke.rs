use clap::Subcommand;
use serde_json::json;
use smokefree_core::Tracker;

#[derive(Subcommand)]
pub enum SmokeAction {
    /// Count one more cigarette today
    Add,
    /// Take one back (never below zero)
    Remove,
    /// Set today's count
    Set {
        /// New count for today
        count: u32,
    },
    /// Print today's count
    Show,
}

pub fn run(action: SmokeAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = Tracker::open()?;

    let count = match action {
        SmokeAction::Add => tracker.increment_today()?,
        SmokeAction::Remove => tracker.decrement_today()?,
        SmokeAction::Set { count } => tracker.set_today(count)?,
        SmokeAction::Show => tracker.today_count()?,
    };

    let out = json!({
        "date": tracker.today().format("%Y-%m-%d").to_string(),
        "dailyCount": count,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
