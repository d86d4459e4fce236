use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors raised while persisting the login flag
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode login state: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LoginFlag {
    is_logged_in: bool,
}

/// Single persisted flag recording whether the user is logged in
#[derive(Debug, Clone)]
pub struct LoginFlagStore {
    path: PathBuf,
}

impl LoginFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing or unreadable state counts as logged out
    pub fn is_logged_in(&self) -> bool {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return false,
            Err(e) => {
                warn!("Failed to read login state {}: {}", self.path.display(), e);
                return false;
            }
        };

        match serde_json::from_str::<LoginFlag>(&content) {
            Ok(flag) => flag.is_logged_in,
            Err(e) => {
                warn!("Ignoring corrupt login state {}: {}", self.path.display(), e);
                false
            }
        }
    }

    pub fn set_logged_in(&self) -> Result<(), StoreError> {
        let body = serde_json::to_string(&LoginFlag { is_logged_in: true })?;
        fs::write(&self.path, body).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}
