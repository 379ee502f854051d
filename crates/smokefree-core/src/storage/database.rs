//! SQLite-backed state for the tracker.
//!
//! Provides persistent storage for:
//! - The quit instant (a single scalar in the key-value table)
//! - Smoking events per logical date
//! - Key-value store for other application state

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use super::data_dir;
use super::legacy::{ImportSummary, LegacyData};
use super::migrations;
use crate::elapsed::{format_datetime, parse_datetime};
use crate::error::{DatabaseError, Result};

/// kv key holding the quit instant.
pub const QUIT_KEY: &str = "quit_at";

const DAY_FORMAT: &str = "%Y-%m-%d";

fn day_key(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

fn to_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// SQLite database for tracker state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/smokefree.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("smokefree.db");
        Ok(Self::open_at(path)?)
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Returns whether it existed.
    pub fn kv_delete(&self, key: &str) -> Result<bool, DatabaseError> {
        let removed = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    /// The recorded quit instant, if any.
    pub fn quit_time(&self) -> Result<Option<NaiveDateTime>, DatabaseError> {
        match self.kv_get(QUIT_KEY)? {
            None => Ok(None),
            Some(raw) => parse_datetime(&raw)
                .map(Some)
                .map_err(|_| {
                    tracing::warn!(value = %raw, "stored quit time does not parse");
                    DatabaseError::Corrupt {
                        key: QUIT_KEY.to_string(),
                        value: raw,
                    }
                }),
        }
    }

    /// Record the quit instant, replacing any previous one.
    pub fn set_quit_time(&self, quit: NaiveDateTime) -> Result<(), DatabaseError> {
        self.kv_set(QUIT_KEY, &format_datetime(quit))?;
        tracing::debug!(%quit, "stored quit time");
        Ok(())
    }

    pub fn clear_quit_time(&self) -> Result<bool, DatabaseError> {
        self.kv_delete(QUIT_KEY)
    }

    /// Smoking events recorded for `day` (0 when none).
    pub fn daily_count(&self, day: NaiveDate) -> Result<u32, DatabaseError> {
        let count = self
            .conn
            .query_row(
                "SELECT count FROM daily_counts WHERE day = ?1",
                params![day_key(day)],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(count.map_or(0, to_count))
    }

    /// Overwrite the count for `day`.
    pub fn set_daily_count(&self, day: NaiveDate, count: u32) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO daily_counts (day, count) VALUES (?1, ?2)
             ON CONFLICT(day) DO UPDATE SET count = excluded.count",
            params![day_key(day), count],
        )?;
        tracing::debug!(%day, count, "set daily count");
        Ok(())
    }

    /// Add `delta` to the count for `day` and return the new count.
    ///
    /// The read-modify-write is a single upsert inside an IMMEDIATE
    /// transaction, so concurrent writers queue on the write lock instead of
    /// losing updates. The count never drops below zero.
    pub fn adjust_daily_count(&self, day: NaiveDate, delta: i64) -> Result<u32, DatabaseError> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let count = tx.query_row(
            "INSERT INTO daily_counts (day, count) VALUES (?1, MAX(0, ?2))
             ON CONFLICT(day) DO UPDATE SET count = MAX(0, daily_counts.count + ?2)
             RETURNING count",
            params![day_key(day), delta],
            |row| row.get::<_, i64>(0),
        )?;
        tx.commit()?;
        tracing::debug!(%day, delta, count, "adjusted daily count");
        Ok(to_count(count))
    }

    /// Write records parsed from a legacy flat file.
    ///
    /// Runs in one transaction; either everything lands or nothing does.
    pub fn import_legacy(&self, data: &LegacyData) -> Result<ImportSummary, DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;

        if let Some(quit) = data.quit_time {
            tx.execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![QUIT_KEY, format_datetime(quit)],
            )?;
        }
        for (day, count) in &data.daily_counts {
            tx.execute(
                "INSERT INTO daily_counts (day, count) VALUES (?1, ?2)
                 ON CONFLICT(day) DO UPDATE SET count = excluded.count",
                params![day_key(*day), count],
            )?;
        }

        tx.commit()?;

        let summary = ImportSummary {
            quit_time: data.quit_time,
            days: data.daily_counts.len(),
            skipped_lines: data.skipped_lines,
        };
        tracing::info!(
            days = summary.days,
            skipped = summary.skipped_lines,
            quit = summary.quit_time.is_some(),
            "imported legacy records"
        );
        Ok(summary)
    }
}
