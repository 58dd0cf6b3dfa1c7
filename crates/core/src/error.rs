//! Unified error types for pslcache.
//!
//! Every failure of a rule build surfaces as one of these variants so callers
//! can tell a broken cache apart from a broken network.

use std::path::PathBuf;

use crate::rules::ParseError;

/// Unified error types for the rule provider.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The cache file was judged fresh but could not be read.
    #[error("CACHE_READ_FAILED: {path}: {source}")]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote rule list could not be retrieved.
    #[error("FETCH_FAILED: {0}")]
    NetworkFetch(String),

    /// Freshly fetched text could not be persisted.
    #[error("CACHE_WRITE_FAILED: {path}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rule text was rejected by the parser.
    #[error("PARSE_FAILED: {0}")]
    Parse(#[from] ParseError),

    /// Invalid source URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Short machine-readable code, matching the display prefix.
    pub fn code(&self) -> &'static str {
        match self {
            Error::StorageRead { .. } => "CACHE_READ_FAILED",
            Error::NetworkFetch(_) => "FETCH_FAILED",
            Error::StorageWrite { .. } => "CACHE_WRITE_FAILED",
            Error::Parse(_) => "PARSE_FAILED",
            Error::InvalidUrl(_) => "INVALID_URL",
        }
    }
}
