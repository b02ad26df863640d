//! Application error types.

use thiserror::Error;

/// Application-level errors for doxyindex.
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Cannot read tag file {path}: {source}")]
    TagFileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed tag file: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Not a Doxygen tag file: {0}")]
    InvalidTagFile(String),

    // Output errors
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration {id} failed: {message}")]
    Migration { id: String, message: String },

    // Info.plist errors
    #[error("Cannot update Info.plist: {0}")]
    Plist(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
