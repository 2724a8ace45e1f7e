//! Runtime corpus fetch from a running docs site.

use crate::{Error, Result, SearchDocument};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Path the docs site serves its search corpus under.
pub const DEFAULT_ENDPOINT: &str = "/api/shiori/docs";

/// HTTP client for the `/api/shiori/docs` corpus endpoint.
#[derive(Debug, Clone)]
pub struct CorpusFetcher {
    client: Client,
    url: String,
}

impl CorpusFetcher {
    /// Fetcher for the site rooted at `base_url`, using the default endpoint.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_endpoint(base_url, DEFAULT_ENDPOINT, Duration::from_secs(30))
    }

    /// Fetcher with a custom endpoint path and request timeout.
    pub fn with_endpoint(base_url: &str, endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shiori/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()?;

        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Ok(Self { client, url })
    }

    /// Full URL of the corpus endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the corpus.
    pub async fn fetch(&self) -> Result<Vec<SearchDocument>> {
        debug!("Fetching corpus from {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!(
                "No search corpus at '{}'. Is the docs site running?",
                self.url
            )));
        }
        let response = response.error_for_status()?;

        let body = response.text().await?;
        let docs: Vec<SearchDocument> = serde_json::from_str(&body).map_err(|e| {
            Error::Serialization(format!("Invalid corpus from {}: {e}", self.url))
        })?;

        info!("Fetched {} documents from {}", docs.len(), self.url);
        Ok(docs)
    }

    /// Download the corpus, degrading to an empty one on failure.
    pub async fn fetch_or_empty(&self) -> Vec<SearchDocument> {
        match self.fetch().await {
            Ok(docs) => docs,
            Err(e) => {
                warn!("Search corpus unavailable, continuing with no documents: {e}");
                Vec::new()
            },
        }
    }

    /// Race the download against `cancel`.
    ///
    /// Returns `None` when `cancel` completes first; the in-flight request is
    /// dropped and no result is produced.
    pub async fn fetch_until<C>(&self, cancel: C) -> Option<Vec<SearchDocument>>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            docs = self.fetch_or_empty() => Some(docs),
            () = cancel => {
                debug!("Corpus fetch from {} cancelled", self.url);
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn corpus_json() -> serde_json::Value {
        serde_json::json!([
            {"id": "introduction", "title": "Introduction", "content": "Hello world", "url": "/docs"},
            {"id": "guide", "title": "Guide", "content": "Read on", "url": "/docs/guide"}
        ])
    }

    #[test]
    fn test_url_joins_base_and_endpoint() -> Result<()> {
        let fetcher = CorpusFetcher::new("http://localhost:3000/")?;
        assert_eq!(fetcher.url(), "http://localhost:3000/api/shiori/docs");

        let custom =
            CorpusFetcher::with_endpoint("http://site", "search.json", Duration::from_secs(1))?;
        assert_eq!(custom.url(), "http://site/search.json");
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_parses_corpus() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DEFAULT_ENDPOINT))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(corpus_json()))
            .expect(1)
            .mount(&server)
            .await;

        let docs = CorpusFetcher::new(&server.uri())?.fetch().await?;

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "Hello world");
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_404_is_not_found() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = CorpusFetcher::new(&server.uri())?
            .fetch()
            .await
            .expect_err("404 must fail");
        assert!(matches!(err, Error::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_500_is_network_error() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = CorpusFetcher::new(&server.uri())?
            .fetch()
            .await
            .expect_err("500 must fail");
        assert_eq!(err.category(), "network");
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_corpus_is_serialization_error() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
            .mount(&server)
            .await;

        let fetcher = CorpusFetcher::new(&server.uri())?;
        let err = fetcher.fetch().await.expect_err("object is not a corpus");
        assert_eq!(err.category(), "serialization");
        assert!(fetcher.fetch_or_empty().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_wins_over_slow_fetch() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(corpus_json())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let fetcher = CorpusFetcher::new(&server.uri())?;
        let outcome = fetcher
            .fetch_until(tokio::time::sleep(Duration::from_millis(20)))
            .await;
        assert!(outcome.is_none());

        let completed = fetcher.fetch_until(std::future::pending()).await;
        assert_eq!(completed.map(|docs| docs.len()), Some(2));
        Ok(())
    }
}
