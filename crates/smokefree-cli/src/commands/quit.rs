use clap::Subcommand;
use serde_json::json;
use smokefree_core::elapsed::format_datetime;
use smokefree_core::{parse_datetime, Tracker};

#[derive(Subcommand)]
pub enum QuitAction {
    /// Record when you stopped smoking (e.g. 2025-01-04T10:30)
    Set {
        /// Quit date/time, UTC: YYYY-MM-DDTHH:MM[:SS]
        datetime: String,
    },
    /// Print the recorded quit time
    Show,
    /// Forget the recorded quit time
    Clear,
}

pub fn run(action: QuitAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = Tracker::open()?;

    match action {
        QuitAction::Set { datetime } => {
            let quit = parse_datetime(&datetime)?;
            tracker.set_quit_time(quit)?;
            let out = json!({ "status": "ok", "quitDateTime": format_datetime(quit) });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        QuitAction::Show => {
            let quit = tracker.quit_time()?.map(format_datetime);
            println!("{}", serde_json::to_string_pretty(&json!({ "quitDateTime": quit }))?);
        }
        QuitAction::Clear => {
            let cleared = tracker.clear_quit_time()?;
            let out = json!({ "status": "ok", "cleared": cleared });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
