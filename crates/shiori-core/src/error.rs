//! Error types and handling for shiori-core operations.
//!
//! Every fallible operation in this crate returns [`Result<T>`]. Errors are
//! grouped into categories so callers can decide how to react:
//!
//! - **I/O Errors**: reading the content tree, writing the persisted index
//! - **Network Errors**: fetching the runtime corpus
//! - **Parse Errors**: markdown/tree-sitter failures
//! - **Storage Errors**: the on-disk search index file
//! - **Configuration Errors**: invalid `shiori.toml` or title maps
//!
//! Search and code annotation never fail; only index builds, corpus fetches
//! and configuration loading surface errors.
//!
//! ```rust
//! use shiori_core::{Error, Result};
//!
//! fn build() -> Result<()> {
//!     Err(Error::NotFound("content root 'app/docs'".into()))
//! }
//!
//! match build() {
//!     Err(e) if e.is_recoverable() => eprintln!("retrying: {e}"),
//!     Err(e) => eprintln!("{} error: {e}", e.category()),
//!     Ok(()) => {},
//! }
//! ```

use thiserror::Error;

/// The main error type for shiori-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers traversal of the content tree and reads of individual
    /// documents. The underlying `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Raised by the corpus fetcher when the docs endpoint is unreachable
    /// or answers with an error status.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Parsing operation failed.
    ///
    /// Occurs when the markdown grammar cannot be loaded or a document
    /// cannot be parsed at all.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Search index construction failed.
    #[error("Index error: {0}")]
    Index(String),

    /// Persisted index could not be read or written.
    ///
    /// ## Common Causes
    ///
    /// - Read-only content directory
    /// - A corrupt `shiori-search-index.json`
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// Raised for malformed `shiori.toml` files and unreadable title maps.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    ///
    /// Used for a missing content root or a 404 from the docs endpoint.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Network timeouts and connection failures are recoverable, as are
    /// interrupted or timed out I/O operations. Everything else is
    /// permanent.
    ///
    /// ```rust
    /// use shiori_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "eintr")).is_recoverable());
    /// assert!(!Error::Config("bad threshold".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for structured logging:
    ///
    /// ```rust
    /// use shiori_core::Error;
    ///
    /// let err = Error::Storage("index file is not valid JSON".into());
    /// assert_eq!(err.category(), "storage");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Index(_) => "index",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
