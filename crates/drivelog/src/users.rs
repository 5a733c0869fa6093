//! User registry
//!
//! Credentials are compared as opaque strings. Nothing here pretends to be
//! secure; it only keeps each driver's history apart.

use crate::db::{LogDatabase, UserId};
use rusqlite::{params, ErrorCode, OptionalExtension};
use thiserror::Error;
use tracing::{debug, warn};

/// User registry errors
#[derive(Error, Debug)]
pub enum UserError {
    #[error("username and password must not be empty")]
    EmptyCredentials,

    #[error("username '{0}' is already taken")]
    Taken(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl LogDatabase {
    /// Register a new user and return its id
    pub fn register_user(&self, username: &str, password: &str) -> Result<UserId, UserError> {
        if username.is_empty() || password.is_empty() {
            return Err(UserError::EmptyCredentials);
        }

        let result = self.conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, password],
        );

        match result {
            Ok(_) => {
                let id = UserId::from(self.conn.last_insert_rowid());
                debug!(%id, username, "user registered");
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(UserError::Taken(username.to_string()))
            }
            Err(e) => {
                warn!(username, error = %e, "failed to register user");
                Err(e.into())
            }
        }
    }

    /// Check credentials, `Ok(None)` when they do not match
    pub fn verify_login(&self, username: &str, password: &str) -> Result<Option<UserId>, UserError> {
        let stored: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT id, password FROM users WHERE username = ?1",
                [username],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(stored
            .filter(|(_, stored_password)| stored_password == password)
            .map(|(id, _)| UserId::from(id)))
    }
}
