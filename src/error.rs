use std::io;

use thiserror::Error;

/// Startup failures caused by missing or malformed settings.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("secret `{0}` is not set")]
    MissingSecret(&'static str),

    #[error("`{name}` is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
}

/// Any failure reported by the task store, hosted or local.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to the task store failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("task store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("assignment {0} does not exist")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("malformed assignment row: {0}")]
    Decode(String),
}

/// Problems with the add form that block submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("`{0}` is not a valid date")]
    InvalidDeadline(String),

    #[error("`{0}` is not a known priority")]
    UnknownPriority(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
