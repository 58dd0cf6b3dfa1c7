//! pslcache entry point.
//!
//! Loads configuration, builds the rule set once (from the cache when it is
//! still fresh), and prints a summary. Logging goes to stderr so stdout only
//! carries the summary line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pslcache_client::{RuleProvider, WebRuleProvider};
use pslcache_core::{AppConfig, ConfigError, TldRule, TldRuleKind};

#[derive(Debug, Parser)]
#[command(name = "pslcache", version, about = "Fetch and cache the public suffix list")]
struct Cli {
    /// TOML configuration file (falls back to `PSLCACHE_CONFIG_FILE`).
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<AppConfig, ConfigError> {
        match &self.config {
            Some(path) => AppConfig::load_from(Some(path)),
            None => AppConfig::load(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.load_config().context("loading configuration")?;

    let provider = WebRuleProvider::from_config(&config).context("creating rule provider")?;
    tracing::info!(
        url = %provider.source_url(),
        cache = %config.cache_path.display(),
        cache_valid = provider.is_cache_valid(),
        "building rule list"
    );

    let rules = provider
        .build()
        .await
        .inspect_err(|err| tracing::error!(code = err.code(), "rule list build failed: {err}"))
        .context("building rule list")?;
    println!("{}", summarize(&rules));

    Ok(())
}

fn summarize(rules: &[TldRule]) -> String {
    let count = |kind: TldRuleKind| rules.iter().filter(|r| r.kind == kind).count();
    format!(
        "{} rules ({} normal, {} wildcard, {} exception)",
        rules.len(),
        count(TldRuleKind::Normal),
        count(TldRuleKind::Wildcard),
        count(TldRuleKind::WildcardException)
    )
}
