use smokefree_core::{get_progress, Config, Tracker};

use crate::render;

pub fn run(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = Tracker::open()?;
    let quit = tracker.quit_time()?;
    let progress = get_progress(tracker.now(), quit, tracker.table());

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    let view = render::StatusView {
        quit,
        daily_count: tracker.today_count()?,
        progress,
    };
    print!("{}", render::render_status(&view, &config.display));
    Ok(())
}

pub fn run_stats() -> Result<(), Box<dyn std::error::Error>> {
    let tracker = Tracker::open()?;
    let stats = tracker.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
