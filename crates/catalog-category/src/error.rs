//! Error types for the category crate
//!
//! - Store failures (connectivity, duplicate keys, rejected documents)
//! - Repository-level validation
//! - Defaults configuration loading

use std::path::PathBuf;

/// Main category error type
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Underlying store failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A category with this value already exists
    #[error("category already exists: '{0}'")]
    DuplicateValue(String),

    /// Category data rejected before reaching the store
    #[error("invalid category: {0}")]
    InvalidCategory(String),

    /// Defaults configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CategoryError {
    /// Check if error is retryable
    ///
    /// Only store connectivity failures are; everything else needs different
    /// input.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(StoreError::Unavailable(_)))
    }

    /// Create invalid category error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidCategory(message.into())
    }
}

/// Errors raised by a [`CategoryStore`](crate::store::CategoryStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Unique `value` index violated
    #[error("duplicate key: '{0}'")]
    DuplicateKey(String),

    /// Document failed store-side validation
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Some operations of a bulk write failed
    #[error("bulk write failed for {failed} of {attempted} operations: {first}")]
    PartialWrite {
        /// Number of failed operations
        failed: usize,
        /// Number of operations attempted
        attempted: usize,
        /// Message of the first failure
        first: String,
    },

    /// IO error on snapshot file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot (de)serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors loading a defaults configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension does not map to a known format
    #[error("unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    /// Content did not parse
    #[error("failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// Parsed but semantically invalid
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create parse error for format
    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }
}
