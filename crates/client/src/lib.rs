//! Client code for pslcache.
//!
//! This crate provides the HTTP fetch helper and the rule provider that
//! combines it with the file cache from `pslcache-core`.

pub mod fetch;
pub mod provider;

pub use fetch::{FetchClient, FetchConfig, RuleFetcher, UrlError, parse_source_url};
pub use provider::{RuleProvider, WebRuleProvider};
