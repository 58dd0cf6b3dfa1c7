//! HTTP retrieval of the raw rule list.
//!
//! The body is handed back untouched; well-formedness is the parser's
//! concern. Connection errors, timeouts, non-success statuses, and oversized
//! bodies all surface as `Error::NetworkFetch`.

pub mod url;

use async_trait::async_trait;
use reqwest::{Client, header};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use url::{UrlError, parse_source_url};

use pslcache_core::{AppConfig, Error};

/// Source of raw rule text.
#[async_trait]
pub trait RuleFetcher: Send + Sync {
    /// Retrieve the full text published at `url`.
    async fn fetch_text(&self, url: &str) -> Result<String, Error>;
}

#[async_trait]
impl<T: RuleFetcher + ?Sized> RuleFetcher for Arc<T> {
    async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        (**self).fetch_text(url).await
    }
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "pslcache/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 16MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), max_bytes: config.max_bytes, timeout: config.timeout() }
    }
}

/// reqwest-backed [`RuleFetcher`].
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::NetworkFetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn check_size(&self, len: usize) -> Result<(), Error> {
        if len > self.config.max_bytes {
            return Err(Error::NetworkFetch(format!("{len} bytes exceeds {}", self.config.max_bytes)));
        }
        Ok(())
    }
}

#[async_trait]
impl RuleFetcher for FetchClient {
    async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "text/plain, */*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::NetworkFetch(format!("timed out fetching {url}"))
                } else {
                    Error::NetworkFetch(format!("network error: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::NetworkFetch(format!("{url} returned status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length() {
            self.check_size(usize::try_from(len).unwrap_or(usize::MAX))?;
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::NetworkFetch(format!("failed to read response: {e}")))?;
        self.check_size(bytes.len())?;

        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::NetworkFetch(format!("response from {url} is not UTF-8: {e}")))?;

        tracing::debug!("fetched {} in {}ms ({} bytes)", url, start.elapsed().as_millis(), text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;

            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            // the client may hang up early on rejected responses
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(body).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/public_suffix_list.dat")
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "pslcache/0.1");
        assert_eq!(config.max_bytes, 16 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(20000));
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_text_returns_body_unchanged() {
        let url = serve_once("200 OK", b"// comment\ncom\n*.ck\n").await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let text = client.fetch_text(&url).await.unwrap();
        assert_eq!(text, "// comment\ncom\n*.ck\n");
    }

    #[tokio::test]
    async fn test_fetch_text_non_success_status() {
        let url = serve_once("404 Not Found", b"missing").await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let err = client.fetch_text(&url).await.unwrap_err();
        assert!(matches!(&err, Error::NetworkFetch(msg) if msg.contains("404")));
    }

    #[tokio::test]
    async fn test_fetch_text_too_large() {
        let url = serve_once("200 OK", b"0123456789").await;
        let config = FetchConfig { max_bytes: 4, ..Default::default() };
        let client = FetchClient::new(config).unwrap();

        let err = client.fetch_text(&url).await.unwrap_err();
        assert!(matches!(&err, Error::NetworkFetch(msg) if msg.contains("exceeds")));
    }

    #[tokio::test]
    async fn test_fetch_text_invalid_utf8() {
        let url = serve_once("200 OK", &[0xff, 0xfe, 0x00]).await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let err = client.fetch_text(&url).await.unwrap_err();
        assert!(matches!(err, Error::NetworkFetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_text_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let err = client.fetch_text(&format!("http://{addr}/psl.dat")).await.unwrap_err();
        assert!(matches!(err, Error::NetworkFetch(_)));
    }
}
