//! Database module for daily logs
//!
//! Uses SQLite to keep one row per (user, calendar day). Saving a day again
//! replaces the whole row: the values are cumulative totals for that day,
//! never deltas.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Registered user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One day of driving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub distance_km: f64,
    pub gross_revenue: f64,
    pub hours_worked: f64,
}

/// Storage failures, kept separate from "no such day"
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to create data directory {0}: {1}")]
    Directory(String, #[source] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Daily log persistence
pub trait LogStore {
    /// Insert the day, or replace it in full if it already exists
    fn upsert(
        &self,
        user_id: UserId,
        date: NaiveDate,
        distance_km: f64,
        gross_revenue: f64,
        hours_worked: f64,
    ) -> Result<(), StoreError>;

    /// `Ok(None)` when nothing was logged for that day yet
    fn get(&self, user_id: UserId, date: NaiveDate) -> Result<Option<DailyLogEntry>, StoreError>;

    /// Whole history, newest day first
    fn all_for_user(&self, user_id: UserId) -> Result<Vec<DailyLogEntry>, StoreError>;
}

/// SQLite database for users and daily logs
pub struct LogDatabase {
    pub(crate) conn: Connection,
}

impl LogDatabase {
    /// Open or create the database file
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Directory(parent.display().to_string(), e))?;
        }

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        Self::init(conn)
    }

    /// Throwaway database, mostly for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS daily_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                date TEXT NOT NULL,
                distance_km REAL NOT NULL,
                gross_revenue REAL NOT NULL,
                hours_worked REAL NOT NULL,
                updated_at REAL DEFAULT (strftime('%s', 'now')),
                UNIQUE(user_id, date)
            );

            CREATE INDEX IF NOT EXISTS idx_daily_logs_user_date
                ON daily_logs(user_id, date DESC);
            "#,
        )?;

        Ok(Self { conn })
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<DailyLogEntry> {
        Ok(DailyLogEntry {
            user_id: UserId(row.get(0)?),
            date: row.get(1)?,
            distance_km: row.get(2)?,
            gross_revenue: row.get(3)?,
            hours_worked: row.get(4)?,
        })
    }
}

impl LogStore for LogDatabase {
    fn upsert(
        &self,
        user_id: UserId,
        date: NaiveDate,
        distance_km: f64,
        gross_revenue: f64,
        hours_worked: f64,
    ) -> Result<(), StoreError> {
        self.conn
            .execute(
                r#"
                INSERT INTO daily_logs (
                    user_id, date, distance_km, gross_revenue, hours_worked, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, strftime('%s', 'now'))
                ON CONFLICT(user_id, date) DO UPDATE SET
                    distance_km = ?3,
                    gross_revenue = ?4,
                    hours_worked = ?5,
                    updated_at = strftime('%s', 'now')
                "#,
                params![user_id.0, date, distance_km, gross_revenue, hours_worked],
            )
            .map_err(|e| {
                warn!(%user_id, %date, error = %e, "failed to save daily log");
                StoreError::from(e)
            })?;

        debug!(%user_id, %date, "daily log saved");
        Ok(())
    }

    fn get(&self, user_id: UserId, date: NaiveDate) -> Result<Option<DailyLogEntry>, StoreError> {
        self.conn
            .query_row(
                r#"
                SELECT user_id, date, distance_km, gross_revenue, hours_worked
                FROM daily_logs WHERE user_id = ?1 AND date = ?2
                "#,
                params![user_id.0, date],
                Self::row_to_entry,
            )
            .optional()
            .map_err(|e| {
                warn!(%user_id, %date, error = %e, "failed to fetch daily log");
                StoreError::from(e)
            })
    }

    fn all_for_user(&self, user_id: UserId) -> Result<Vec<DailyLogEntry>, StoreError> {
        let fetch = || -> rusqlite::Result<Vec<DailyLogEntry>> {
            let mut stmt = self.conn.prepare(
                r#"
                SELECT user_id, date, distance_km, gross_revenue, hours_worked
                FROM daily_logs
                WHERE user_id = ?1
                ORDER BY date DESC
                "#,
            )?;
            let rows = stmt.query_map([user_id.0], Self::row_to_entry)?;
            rows.collect()
        };

        fetch().map_err(|e| {
            warn!(%user_id, error = %e, "failed to fetch daily logs");
            StoreError::from(e)
        })
    }
}
