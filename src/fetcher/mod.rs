//! Retrieval of KBBI entry pages.
//!
//! The [`DocumentFetcher`] trait is the seam between the resolver and the
//! network: production code uses [`HttpFetcher`], tests plug in an in-memory
//! fetcher. Fetchers never retry; a throttled or failed request surfaces as
//! [`KamoesError::UpstreamError`] and is the caller's to handle.

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::constants::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, ENTRY_PATH, USER_AGENT};
use crate::core::KamoesError;

/// Source of raw entry page HTML.
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the entry page for `word`.
    ///
    /// # Errors
    ///
    /// Returns [`KamoesError::UpstreamError`] on a non-success status or a
    /// transport failure.
    fn fetch<'a>(&'a self, word: &'a str)
    -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

/// Fetcher backed by the upstream dictionary site.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid upstream URL: {base_url}"))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
        })
    }

    /// Entry page URL for `word`; the word is encoded as one path segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path.
    pub fn entry_url(&self, word: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| KamoesError::ConfigError {
                message: format!("upstream_url '{}' cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .push(ENTRY_PATH)
            .push(word);
        Ok(url)
    }

    async fn fetch_entry(&self, word: &str) -> Result<String> {
        let url = self.entry_url(word)?;
        debug!("Fetching {url}");

        let upstream = |reason: String| KamoesError::UpstreamError {
            word: word.to_string(),
            reason,
        };

        let response =
            self.http.get(url).send().await.map_err(|e| upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(upstream(format!("HTTP {status}")).into());
        }

        let body = response.text().await.map_err(|e| upstream(e.to_string()))?;
        debug!("Fetched {} bytes for '{word}'", body.len());
        Ok(body)
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        word: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(self.fetch_entry(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(base: &str) -> HttpFetcher {
        HttpFetcher::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_entry_url() {
        let f = fetcher("https://kbbi.kemdikbud.go.id");
        assert_eq!(f.entry_url("rumah").unwrap().as_str(), "https://kbbi.kemdikbud.go.id/entri/rumah");
    }

    #[test]
    fn test_entry_url_encodes_word_as_one_segment() {
        let f = fetcher("http://127.0.0.1:9000/kbbi/");
        assert_eq!(
            f.entry_url("rumah makan").unwrap().as_str(),
            "http://127.0.0.1:9000/kbbi/entri/rumah%20makan"
        );
        assert_eq!(f.entry_url("a/b").unwrap().as_str(), "http://127.0.0.1:9000/kbbi/entri/a%2Fb");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpFetcher::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_error() {
        // Port 9 (discard) on loopback is closed in test environments
        let f = fetcher("http://127.0.0.1:9");
        let err = f.fetch("rumah").await.unwrap_err();
        let err = err.downcast_ref::<KamoesError>().unwrap();
        assert!(matches!(err, KamoesError::UpstreamError { word, .. } if word == "rumah"));
    }
}
