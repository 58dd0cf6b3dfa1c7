//! Core types and shared functionality for pslcache.
//!
//! This crate provides:
//! - File cache for the rule list (freshness check, atomic replace)
//! - Public suffix rule records and the default parser
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod rules;

pub use cache::{CacheDescriptor, CacheStore, DEFAULT_CACHE_TTL};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use rules::{ParseError, RuleParser, TldRule, TldRuleDivision, TldRuleKind, TldRuleParser};
