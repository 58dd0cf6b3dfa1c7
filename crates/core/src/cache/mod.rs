//! File-backed cache for the raw rule list.
//!
//! - [`CacheDescriptor`] names the persisted copy and judges its freshness
//!   from the file's modification time.
//! - [`CacheStore`] reads it and replaces it atomically (temp file + rename).

pub mod descriptor;
pub mod store;

pub use crate::Error;

pub use descriptor::{CacheDescriptor, DEFAULT_CACHE_TTL};
pub use store::CacheStore;
