// src/sitemap/mod.rs
// =============================================================================
// This module turns a remote sitemap into a list of URLs worth tracking.
//
// Submodules:
// - fetch: downloads the XML document over HTTP
// - parse: pulls <loc>/<lastmod> entries out of the XML
//
// Unlike a plain "empty list on failure", callers get a Result here:
//   Ok(vec![])  = the sitemap was read but nothing matched the filter
//   Err(...)    = the sitemap could not be fetched or parsed
// The sync pipeline decides whether a failure is fatal.
// =============================================================================

mod fetch;
mod parse;

pub use fetch::{Fetcher, HttpFetcher};
pub use parse::{parse_sitemap, SitemapEntry};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("sitemap request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sitemap server returned HTTP {0}")]
    Status(u16),
    #[error("sitemap XML is malformed: {0}")]
    Xml(String),
    #[error("sitemap has no urlset root (found {0:?})")]
    NotAUrlset(Option<String>),
}

// Fetches `sitemap_url`, parses it and keeps entries whose URL contains
// `path_filter`. An empty filter keeps everything.
pub async fn fetch_sitemap_entries(
    fetcher: &dyn Fetcher,
    sitemap_url: &str,
    path_filter: &str,
) -> Result<Vec<SitemapEntry>, SitemapError> {
    let body = fetcher.fetch(sitemap_url).await?;
    let entries = parse_sitemap(&body)?;

    Ok(entries
        .into_iter()
        .filter(|entry| entry.loc.contains(path_filter))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticFetcher(Result<String, u16>);

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, SitemapError> {
            self.0.clone().map_err(SitemapError::Status)
        }
    }

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://shop.example/buy-used-cars/audi-a4</loc></url>
  <url><loc>https://shop.example/about</loc></url>
  <url><loc>https://shop.example/buy-used-cars/bmw-x1</loc></url>
</urlset>"#;

    #[tokio::test]
    async fn test_filter_by_path() {
        let fetcher = StaticFetcher(Ok(SITEMAP.to_string()));
        let entries = fetch_sitemap_entries(&fetcher, "https://shop.example/sitemap.xml", "/buy-used-cars/")
            .await
            .unwrap();
        let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://shop.example/buy-used-cars/audi-a4",
                "https://shop.example/buy-used-cars/bmw-x1"
            ]
        );
    }

    #[tokio::test]
    async fn test_no_match_is_ok_and_empty() {
        let fetcher = StaticFetcher(Ok(SITEMAP.to_string()));
        let entries = fetch_sitemap_entries(&fetcher, "https://shop.example/sitemap.xml", "/sell/")
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_an_error() {
        let fetcher = StaticFetcher(Err(503));
        let result = fetch_sitemap_entries(&fetcher, "https://shop.example/sitemap.xml", "").await;
        assert!(matches!(result, Err(SitemapError::Status(503))));
    }
}
