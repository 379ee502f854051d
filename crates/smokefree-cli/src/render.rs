//! Plain-text status view.

use chrono::NaiveDateTime;
use smokefree_core::storage::DisplayConfig;
use smokefree_core::ProgressResult;

pub const FINAL_MILESTONE_MESSAGE: &str =
    "You\u{2019}ve reached the final milestone in our tracker!";

pub struct StatusView {
    pub quit: Option<NaiveDateTime>,
    pub daily_count: u32,
    pub progress: ProgressResult,
}

/// `1d 2h 5m` style duration; zero units are dropped.
pub fn format_minutes(minutes: u64) -> String {
    let days = minutes / (24 * 60);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if mins > 0 || parts.is_empty() {
        parts.push(format!("{mins}m"));
    }
    parts.join(" ")
}

pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn render_status(view: &StatusView, display: &DisplayConfig) -> String {
    let width = display.bar_width as usize;
    let today = format!("Today: {} smoked\n", view.daily_count);

    let Some(quit) = view.quit else {
        return format!(
            "No quit time set yet.\n{today}\n{} {:>5.1}%\nNext: --\nPlease set your quit date/time with `smokefree quit set`.\n",
            progress_bar(0.0, width),
            0.0
        );
    };

    let p = &view.progress;
    let mut out = String::new();
    out.push_str(&format!(
        "Quit: {} ({} ago)\n",
        quit.format(&display.date_format),
        format_minutes(p.minutes_elapsed)
    ));
    out.push_str(&today);
    out.push('\n');
    out.push_str(&format!(
        "Current: {}\n",
        p.current_label.as_deref().unwrap_or("--")
    ));
    out.push_str(&format!(
        "{} {:>5.1}%\n",
        progress_bar(p.progress_ratio, width),
        p.progress_ratio * 100.0
    ));

    match p.next_label.as_deref() {
        Some(next) => {
            let remaining = p.next_threshold_minutes.saturating_sub(p.minutes_elapsed);
            out.push_str(&format!("Next: {next} (in {})\n", format_minutes(remaining)));
        }
        None => out.push_str(&format!("Next: {FINAL_MILESTONE_MESSAGE}\n")),
    }

    if display.show_description {
        if let Some(desc) = p.current_description.as_deref() {
            out.push_str(desc);
            out.push('\n');
        }
    }

    out
}
