//! Error types for String Stash

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StashError>;

#[derive(Error, Debug)]
pub enum StashError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl StashError {
    /// Whether the error means the requested entry does not exist,
    /// as opposed to the store itself failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StashError::EntryNotFound(_))
    }
}

impl From<serde_json::Error> for StashError {
    fn from(e: serde_json::Error) -> Self {
        StashError::Serialization(e.to_string())
    }
}
