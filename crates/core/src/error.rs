//! Error types for Invites Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Incorrect organizer password")]
    Unauthorized,

    #[error("Plan is already locked")]
    AlreadyLocked,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
