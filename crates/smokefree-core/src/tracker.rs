//! Tracker service: the store, a clock and the progress engine wired together.
//!
//! This is what delivery layers call. It resolves the quit instant from
//! storage, derives elapsed minutes from the clock, and hands both to the
//! pure engine.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::elapsed::{format_datetime, Clock, ElapsedState, SystemClock};
use crate::error::{Result, ValidationError};
use crate::milestones::{compute_progress, round_to, MilestoneTable, ProgressResult};
use crate::storage::Database;

/// Progress for a quit instant as seen at `now`.
///
/// `quit` is `None` when no quit time has been recorded yet.
pub fn get_progress(
    now: NaiveDateTime,
    quit: Option<NaiveDateTime>,
    table: &MilestoneTable,
) -> ProgressResult {
    compute_progress(ElapsedState::from_optional(quit, now), table)
}

/// Everything the status view needs in one payload.
///
/// `hoursSinceQuit` is `0.0` rather than null when the quit instant is now;
/// it is null only when no quit time is recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    /// Hours since quitting, 2 decimals; `None` when no quit time is set.
    #[serde(rename = "hoursSinceQuit")]
    pub hours_since_quit: Option<f64>,
    #[serde(rename = "quitDateTime")]
    pub quit_date_time: Option<String>,
    /// Smoking events recorded today.
    #[serde(rename = "dailyCount")]
    pub daily_count: u32,
    pub progress: ProgressResult,
}

pub struct Tracker<C: Clock = SystemClock> {
    db: Database,
    clock: C,
    table: &'static MilestoneTable,
}

impl Tracker<SystemClock> {
    /// Tracker over the default database and the wall clock.
    pub fn open() -> Result<Self> {
        Ok(Self::new(Database::open()?, SystemClock))
    }
}

impl<C: Clock> Tracker<C> {
    pub fn new(db: Database, clock: C) -> Self {
        Self {
            db,
            clock,
            table: MilestoneTable::builtin(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn table(&self) -> &MilestoneTable {
        self.table
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Logical date used for the daily counter.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    pub fn quit_time(&self) -> Result<Option<NaiveDateTime>> {
        Ok(self.db.quit_time()?)
    }

    /// Record the quit instant. Instants after the current time are rejected.
    pub fn set_quit_time(&self, quit: NaiveDateTime) -> Result<()> {
        let now = self.now();
        if quit > now {
            return Err(ValidationError::QuitInFuture { quit, now }.into());
        }
        self.db.set_quit_time(quit)?;
        tracing::info!(quit = %format_datetime(quit), "quit time recorded");
        Ok(())
    }

    pub fn clear_quit_time(&self) -> Result<bool> {
        let removed = self.db.clear_quit_time()?;
        if removed {
            tracing::info!("quit time cleared");
        }
        Ok(removed)
    }

    pub fn elapsed(&self) -> Result<ElapsedState> {
        Ok(ElapsedState::from_optional(self.quit_time()?, self.now()))
    }

    /// Milestone progress right now.
    pub fn progress(&self) -> Result<ProgressResult> {
        Ok(get_progress(self.now(), self.quit_time()?, self.table))
    }

    pub fn today_count(&self) -> Result<u32> {
        Ok(self.db.daily_count(self.today())?)
    }

    pub fn increment_today(&self) -> Result<u32> {
        Ok(self.db.adjust_daily_count(self.today(), 1)?)
    }

    /// Decrement today's count; stays at zero.
    pub fn decrement_today(&self) -> Result<u32> {
        Ok(self.db.adjust_daily_count(self.today(), -1)?)
    }

    pub fn set_today(&self, count: u32) -> Result<u32> {
        self.db.set_daily_count(self.today(), count)?;
        Ok(count)
    }

    pub fn stats(&self) -> Result<StatsReport> {
        let now = self.now();
        let quit = self.quit_time()?;
        let progress = get_progress(now, quit, self.table);
        let hours_since_quit = match ElapsedState::from_optional(quit, now) {
            ElapsedState::Unset => None,
            ElapsedState::Minutes(m) => Some(round_to(m as f64 / 60.0, 2)),
        };

        Ok(StatsReport {
            hours_since_quit,
            quit_date_time: quit.map(format_datetime),
            daily_count: self.db.daily_count(now.date())?,
            progress,
        })
    }
}
