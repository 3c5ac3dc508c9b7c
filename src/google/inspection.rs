// src/google/inspection.rs
// =============================================================================
// Search Console URL Inspection client.
//
// Request:
//   POST {endpoint}/v1/urlInspection/index:inspect
//   {"inspectionUrl": "https://...", "siteUrl": "https://www.example.com/"}
//
// Only inspectionResult.indexStatusResult is read. When Google leaves it
// out, the URL has "no data" rather than an error.
// =============================================================================

use super::{build_client, check_status, endpoint_url, GoogleApiError};
use crate::inspect::{IndexStatus, Inspector};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INSPECTION_ENDPOINT: &str = "https://searchconsole.googleapis.com";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectRequest<'a> {
    inspection_url: &'a str,
    site_url: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspectResponse {
    inspection_result: Option<InspectionResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspectionResult {
    index_status_result: Option<IndexStatus>,
}

pub struct InspectionClient {
    client: Client,
    inspect_url: String,
    access_token: String,
    site_url: String,
}

impl InspectionClient {
    /// `site_url` is the Search Console property, e.g. `https://www.example.com/`.
    pub fn new(endpoint: &str, access_token: String, site_url: String) -> Result<Self, GoogleApiError> {
        Ok(Self {
            client: build_client()?,
            inspect_url: endpoint_url(endpoint, "v1/urlInspection/index:inspect"),
            access_token,
            site_url,
        })
    }

    pub async fn inspect_url(&self, url: &str) -> Result<Option<IndexStatus>, GoogleApiError> {
        let body = InspectRequest {
            inspection_url: url,
            site_url: &self.site_url,
        };

        let response = self
            .client
            .post(&self.inspect_url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let parsed: InspectResponse = check_status(response).await?.json().await?;
        Ok(parsed
            .inspection_result
            .and_then(|result| result.index_status_result))
    }
}

#[async_trait]
impl Inspector for InspectionClient {
    async fn inspect(&self, url: &str) -> anyhow::Result<Option<IndexStatus>> {
        Ok(self.inspect_url(url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> InspectionClient {
        InspectionClient::new(
            &server.uri(),
            "test-token".to_string(),
            "https://shop.example/".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_inspect_reads_index_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/urlInspection/index:inspect"))
            .and(body_json(json!({
                "inspectionUrl": "https://shop.example/a",
                "siteUrl": "https://shop.example/"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "inspectionResult": {
                    "inspectionResultLink": "https://search.google.com/...",
                    "indexStatusResult": {
                        "verdict": "PASS",
                        "coverageState": "Submitted and indexed",
                        "lastCrawlTime": "2025-03-01T10:00:00Z"
                    }
                }
            })))
            .mount(&server)
            .await;

        let status = client_for(&server)
            .inspect("https://shop.example/a")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(status.verdict.as_deref(), Some("PASS"));
        assert_eq!(status.coverage_state.as_deref(), Some("Submitted and indexed"));
        assert_eq!(status.last_crawl_time.as_deref(), Some("2025-03-01T10:00:00Z"));
        assert_eq!(status.google_canonical, None);
    }

    #[tokio::test]
    async fn test_inspect_without_index_status_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "inspectionResult": {}
            })))
            .mount(&server)
            .await;

        let status = client_for(&server).inspect("https://shop.example/a").await.unwrap();
        assert!(status.is_none());
    }

    #[tokio::test]
    async fn test_inspect_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .inspect_url("https://shop.example/a")
            .await
            .unwrap_err();
        assert!(matches!(err, GoogleApiError::Api { status: 500, .. }));
    }
}
