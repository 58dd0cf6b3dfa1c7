//! Application configuration with layered loading.
//!
//! Configuration is merged with figment from:
//!
//! 1. Environment variables (PSLCACHE_*)
//! 2. TOML config file (explicit path, or PSLCACHE_CONFIG_FILE)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::CacheDescriptor;

mod validation;

pub use validation::ConfigError;

/// Well-known location of the public suffix list.
pub const DEFAULT_SOURCE_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

/// Default file name of the persisted copy.
pub const DEFAULT_CACHE_PATH: &str = "publicsuffixcache.dat";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PSLCACHE_*)
/// 2. TOML config file
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the current rule list is published.
    ///
    /// Set via PSLCACHE_SOURCE_URL environment variable.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Path of the persisted rule list.
    ///
    /// Set via PSLCACHE_CACHE_PATH environment variable.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// How long a persisted copy stays usable, in seconds.
    ///
    /// Set via PSLCACHE_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via PSLCACHE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via PSLCACHE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum accepted size of the rule list in bytes.
    ///
    /// Set via PSLCACHE_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.into()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_cache_ttl_secs() -> u64 {
    crate::cache::DEFAULT_CACHE_TTL.as_secs()
}

fn default_user_agent() -> String {
    "pslcache/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            cache_path: default_cache_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache time-to-live as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Descriptor of the persisted copy described by this configuration.
    pub fn cache_descriptor(&self) -> CacheDescriptor {
        CacheDescriptor::new(self.cache_path.clone(), Some(self.cache_ttl()))
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// The TOML file is `PSLCACHE_CONFIG_FILE` when set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the sources cannot be merged or the result
    /// fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("PSLCACHE_CONFIG_FILE").ok().map(PathBuf::from);
        Self::load_from(config_path.as_deref())
    }

    /// Load configuration, reading the TOML layer from `config_path` if given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the sources cannot be merged or the result
    /// fails validation.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::prefixed("PSLCACHE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
