//! Active user for the command line
//!
//! `login` writes the session file, `logout` removes it. Every other command
//! that touches the log reads it to know whose history to use.

use crate::db::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("not logged in - run 'drivelog login <username>' first")]
    NotLoggedIn,

    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt session file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Logged in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: UserId, username: &str) -> Self {
        Self {
            user_id,
            username: username.to_string(),
            logged_in_at: Utc::now(),
        }
    }

    /// Load the session, `None` when nobody is logged in
    pub fn load(path: &Path) -> Result<Option<Self>, SessionError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| SessionError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Load the session or fail with a hint to log in
    pub fn require(path: &Path) -> Result<Self, SessionError> {
        Self::load(path)?.ok_or(SessionError::NotLoggedIn)
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let io_error = |source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| {
            SessionError::Corrupt {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, content).map_err(io_error)
    }

    /// Forget the active user. Returns whether anyone was logged in.
    pub fn clear(path: &Path) -> Result<bool, SessionError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SessionError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
