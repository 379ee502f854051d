//! Elapsed time since the quit instant.
//!
//! All instants are naive and compared as UTC. Elapsed minutes are the floor
//! of the whole-minute difference; sub-minute precision is dropped.

use chrono::{NaiveDateTime, Utc};
use crate::error::ValidationError;

/// Storage format for instants. Seconds are always written out.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats accepted from users, most specific first.
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Elapsed time as seen by the progress engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElapsedState {
    /// No quit time recorded yet.
    Unset,
    Minutes(u64),
}

impl ElapsedState {
    /// Whole minutes from `quit` to `now`.
    ///
    /// A quit instant after `now` saturates to zero minutes.
    pub fn between(quit: NaiveDateTime, now: NaiveDateTime) -> Self {
        let minutes = (now - quit).num_minutes();
        if minutes < 0 {
            tracing::warn!(%quit, %now, "quit time is after the current time; treating as just quit");
        }
        Self::Minutes(u64::try_from(minutes).unwrap_or(0))
    }

    pub fn from_optional(quit: Option<NaiveDateTime>, now: NaiveDateTime) -> Self {
        quit.map_or(Self::Unset, |quit| Self::between(quit, now))
    }

    pub fn minutes(&self) -> Option<u64> {
        match self {
            Self::Unset => None,
            Self::Minutes(m) => Some(*m),
        }
    }
}

/// Source of the current instant.
///
/// The engine never reads the clock; the tracker asks one of these.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock, UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock frozen at one instant (tests, replays).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Parse a user-supplied quit instant such as `2025-01-04T10:30`.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = input.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidDateTime {
            input: input.to_string(),
        })
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn whole_minutes_drop_seconds() {
        let quit = dt(2025, 1, 4, 10, 30, 0);
        let now = dt(2025, 1, 4, 10, 50, 59);
        assert_eq!(ElapsedState::between(quit, now), ElapsedState::Minutes(20));
    }

    #[test]
    fn spans_days_and_month_ends() {
        let quit = dt(2025, 1, 31, 23, 0, 0);
        let now = dt(2025, 2, 2, 1, 0, 0);
        assert_eq!(ElapsedState::between(quit, now), ElapsedState::Minutes(26 * 60));
    }

    #[test]
    fn future_quit_saturates_to_zero() {
        let quit = dt(2025, 1, 5, 0, 0, 0);
        let now = dt(2025, 1, 4, 0, 0, 0);
        assert_eq!(ElapsedState::between(quit, now), ElapsedState::Minutes(0));
    }

    #[test]
    fn missing_quit_is_unset() {
        let now = dt(2025, 1, 4, 0, 0, 0);
        assert_eq!(ElapsedState::from_optional(None, now), ElapsedState::Unset);
        assert_eq!(ElapsedState::Unset.minutes(), None);
    }

    #[test]
    fn parses_datetime_local_input() {
        assert_eq!(
            parse_datetime("2025-01-04T10:30").unwrap(),
            dt(2025, 1, 4, 10, 30, 0)
        );
        assert_eq!(
            parse_datetime(" 2025-01-04 10:30:15 ").unwrap(),
            dt(2025, 1, 4, 10, 30, 15)
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_datetime("last tuesday").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateTime { .. }));
        assert!(parse_datetime("2025-13-01T00:00").is_err());
    }

    #[test]
    fn storage_format_roundtrips() {
        let value = dt(2025, 1, 4, 10, 30, 0);
        assert_eq!(format_datetime(value), "2025-01-04T10:30:00");
        assert_eq!(parse_datetime(&format_datetime(value)).unwrap(), value);
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let at = dt(2025, 6, 1, 12, 0, 0);
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }
}
