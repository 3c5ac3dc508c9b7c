// src/sitemap/fetch.rs
// =============================================================================
// This module downloads the sitemap document.
//
// - Fixed 10 second timeout (the only timeout on the sync pipeline)
// - Identifies itself with a bot User-Agent
// - Non-2xx responses are errors, not empty documents
// =============================================================================

use super::SitemapError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const SITEMAP_USER_AGENT: &str = "GoogleIndexingBot/1.0";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// Anything that can turn a URL into a document body
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, SitemapError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, SitemapError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(SITEMAP_USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SitemapError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SitemapError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .and(header("user-agent", SITEMAP_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<urlset/>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher
            .fetch(&format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<urlset/>");
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch(&format!("{}/sitemap.xml", server.uri())).await;
        assert!(matches!(result, Err(SitemapError::Status(404))));
    }
}
