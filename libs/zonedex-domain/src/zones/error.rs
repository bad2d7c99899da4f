//! Domain errors for zone index operations
//!
//! A failed build never produces a partial index. Every failure surfaces as one
//! of these variants so callers can tell a broken upstream apart from a payload
//! that no longer matches the expected shape.

use thiserror::Error;

/// Errors that can occur while building or serving the zone index
///
/// The error is `Clone` because a single failed build is reported to every
/// caller that was waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneIndexError {
    /// The external retrieval did not succeed (bad status, network failure,
    /// timeout, or a body that is not JSON at all)
    #[error("Zone fetch failed: {0}")]
    Fetch(String),

    /// The payload was retrieved but does not match the expected shape
    #[error("Invalid zone source data: {0}")]
    SourceData(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZoneIndexError {
    /// Create a fetch failure with a message
    pub fn fetch_failure(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a source data error with a message
    pub fn source_data(msg: impl Into<String>) -> Self {
        Self::SourceData(msg.into())
    }

    /// Create a config error with a message
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub fn is_source_data(&self) -> bool {
        matches!(self, Self::SourceData(_))
    }
}

/// Result type alias for zone index operations
pub type Result<T> = std::result::Result<T, ZoneIndexError>;
