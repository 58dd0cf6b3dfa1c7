//! Rule provider that reuses a persisted copy of the rule list until it
//! expires, then refetches and persists a fresh one.
//!
//! A build is strictly sequential: freshness check, then either a cache read
//! or a fetch followed by an atomic write, then parsing. Nothing is retried.
//! Concurrent builds against the same path may both fetch; the last rename
//! wins and readers never observe a partial file.

use async_trait::async_trait;
use url::Url;

use pslcache_core::{AppConfig, CacheDescriptor, CacheStore, Error, RuleParser, TldRule, TldRuleParser};

use crate::fetch::{FetchClient, FetchConfig, RuleFetcher, parse_source_url};

/// Anything that can produce the current rule set.
#[async_trait]
pub trait RuleProvider: Send + Sync {
    async fn build(&self) -> Result<Vec<TldRule>, Error>;
}

/// Provider backed by a remote list and a local file cache.
pub struct WebRuleProvider<F, P> {
    source_url: Url,
    descriptor: CacheDescriptor,
    store: CacheStore,
    fetcher: F,
    parser: P,
}

impl WebRuleProvider<FetchClient, TldRuleParser> {
    /// Provider using the HTTP client and the default parser.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(config))?;
        Self::new(&config.source_url, config.cache_descriptor(), fetcher, TldRuleParser)
    }
}

impl<F, P> WebRuleProvider<F, P>
where
    F: RuleFetcher,
    P: RuleParser,
{
    pub fn new(source_url: &str, descriptor: CacheDescriptor, fetcher: F, parser: P) -> Result<Self, Error> {
        let source_url = parse_source_url(source_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(Self { source_url, descriptor, store: CacheStore, fetcher, parser })
    }

    pub fn source_url(&self) -> &Url {
        &self.source_url
    }

    pub fn descriptor(&self) -> &CacheDescriptor {
        &self.descriptor
    }

    /// Whether the persisted copy would be reused by the next build.
    pub fn is_cache_valid(&self) -> bool {
        self.descriptor.is_valid()
    }

    /// Load the rule text, from the cache when fresh, from the network otherwise.
    async fn load_text(&self) -> Result<String, Error> {
        let path = self.descriptor.path();

        if self.descriptor.is_valid() {
            tracing::debug!(path = %path.display(), "using cached rule list");
            return self.store.read(path).await;
        }

        tracing::debug!(path = %path.display(), url = %self.source_url, "cached rule list missing or expired");
        let text = self.fetcher.fetch_text(self.source_url.as_str()).await?;
        self.store.write_atomic(path, &text).await?;

        tracing::info!(
            url = %self.source_url,
            path = %path.display(),
            bytes = text.len(),
            "refreshed rule list"
        );
        Ok(text)
    }
}

#[async_trait]
impl<F, P> RuleProvider for WebRuleProvider<F, P>
where
    F: RuleFetcher,
    P: RuleParser,
{
    async fn build(&self) -> Result<Vec<TldRule>, Error> {
        let text = self.load_text().await?;
        let rules = self.parser.parse(&text)?;
        tracing::debug!(count = rules.len(), "parsed rule list");
        Ok(rules)
    }
}
