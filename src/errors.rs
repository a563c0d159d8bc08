//! Unified error types for `Cardfolio`.
//!
//! All fallible operations in the crate return [`Result`], which wraps the
//! single [`Error`] enum. The pure engine functions (slot resolution,
//! toggles, reconciliation, progress, scoring) are total and never return
//! errors; only database access, configuration loading, and catalog
//! ingestion can fail.

use thiserror::Error;

/// Unified error type covering configuration, database, and ingestion failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failure
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Database error from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Album lookup failed
    #[error("Album not found: {id}")]
    AlbumNotFound {
        /// ID of the album that could not be found
        id: i64,
    },

    /// Album card entry lookup failed
    #[error("Album card entry not found: {id}")]
    EntryNotFound {
        /// ID of the entry that could not be found
        id: i64,
    },

    /// Catalog payload could not be parsed or was missing required data
    #[error("Catalog payload error: {message}")]
    Catalog {
        /// Human-readable description of the malformed payload
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
