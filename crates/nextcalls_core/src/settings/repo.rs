//! Settings repository contracts and SQLite implementation.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError};

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings persistence and validation error.
#[derive(Debug)]
pub enum SettingsError {
    Db(DbError),
    /// Reminder list name rejected by validation.
    InvalidListName(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidListName(reason) => write!(f, "invalid reminder list name: {reason}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidListName(_) => None,
        }
    }
}

impl From<DbError> for SettingsError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SettingsError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value store for persisted settings.
pub trait SettingsRepository: Send + Sync {
    fn get(&self, key: &str) -> SettingsResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> SettingsResult<()>;
}

/// SQLite-backed settings repository.
///
/// Owns its connection so it can be shared across async tasks.
pub struct SqliteSettingsRepository {
    conn: Mutex<Connection>,
}

impl SqliteSettingsRepository {
    /// Wraps a connection returned by [`open_db`](crate::db::open_db) or
    /// [`open_db_in_memory`](crate::db::open_db_in_memory).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl SettingsRepository for SqliteSettingsRepository {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let value = conn
            .query_row("SELECT value FROM settings WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
