//! Location and lifetime of the persisted rule list.
//!
//! The freshness check only inspects file metadata, so it stays synchronous
//! and can be called from any context without awaiting.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Default time-to-live of a persisted copy (24 hours).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Identifies the persisted rule text and how long it may be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDescriptor {
    path: PathBuf,
    ttl: Duration,
}

impl CacheDescriptor {
    /// Create a descriptor. A `None` ttl falls back to [`DEFAULT_CACHE_TTL`].
    pub fn new(path: impl Into<PathBuf>, ttl: Option<Duration>) -> Self {
        Self { path: path.into(), ttl: ttl.unwrap_or(DEFAULT_CACHE_TTL) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether the persisted copy may be reused right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Whether the persisted copy may be reused at `now`.
    ///
    /// Missing files, unreadable metadata, and non-regular files are all
    /// reported as invalid. The copy is valid only when its modification
    /// time is strictly later than `now - ttl`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let Some(modified) = self.last_modified() else {
            tracing::debug!(path = %self.path.display(), "no persisted rule list");
            return false;
        };

        let threshold = chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_sub_signed(ttl));

        let valid = match threshold {
            Some(threshold) => modified > threshold,
            // ttl reaches past the representable range
            None => true,
        };

        tracing::debug!(
            path = %self.path.display(),
            modified = %modified,
            ttl_secs = self.ttl.as_secs(),
            valid,
            "checked rule list freshness"
        );

        valid
    }

    /// Modification time of the persisted copy in UTC, if one exists.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        let metadata = std::fs::metadata(&self.path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        metadata.modified().ok().and_then(to_utc)
    }
}

/// Convert a filesystem timestamp, rejecting values chrono cannot represent.
fn to_utc(time: SystemTime) -> Option<DateTime<Utc>> {
    let since_epoch = time.duration_since(UNIX_EPOCH).ok()?;
    let secs = i64::try_from(since_epoch.as_secs()).ok()?;
    DateTime::from_timestamp(secs, since_epoch.subsec_nanos())
}
