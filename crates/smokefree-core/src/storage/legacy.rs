//! Import of the old line-oriented state file.
//!
//! The file holds one record per line:
//!
//! ```text
//! QUIT|2025-01-04T10:30
//! DAILY|2025-01-04|3
//! ```
//!
//! Later records win: the last `QUIT` line is the quit instant and the last
//! `DAILY` line for a date is that date's count. Blank lines are ignored;
//! anything else that does not parse is skipped and counted.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::elapsed::parse_datetime;

/// Records recovered from a legacy file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyData {
    pub quit_time: Option<NaiveDateTime>,
    pub daily_counts: BTreeMap<NaiveDate, u32>,
    pub skipped_lines: usize,
}

/// What an import wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub quit_time: Option<NaiveDateTime>,
    pub days: usize,
    pub skipped_lines: usize,
}

pub fn parse_legacy(content: &str) -> LegacyData {
    let mut data = LegacyData::default();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('|').collect();
        let parsed = match parts.as_slice() {
            ["QUIT", when] => parse_datetime(when).ok().map(|quit| {
                data.quit_time = Some(quit);
            }),
            ["DAILY", day, count] => parse_daily(day, count).map(|(day, count)| {
                data.daily_counts.insert(day, count);
            }),
            _ => None,
        };

        if parsed.is_none() {
            tracing::warn!(line = index + 1, content = line, "skipping unrecognized legacy record");
            data.skipped_lines += 1;
        }
    }

    data
}

fn parse_daily(day: &str, count: &str) -> Option<(NaiveDate, u32)> {
    let day = NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d").ok()?;
    let count = count.trim().parse::<u32>().ok()?;
    Some((day, count))
}
