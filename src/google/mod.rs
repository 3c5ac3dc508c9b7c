// src/google/mod.rs
// =============================================================================
// This module talks to Google's HTTP APIs.
//
// Clients:
// - IndexingClient: Indexing API v3, urlNotifications:publish
// - InspectionClient: Search Console API v1, urlInspection/index:inspect
//
// Both use a ready OAuth2 access token (for example the output of
// `gcloud auth print-access-token`). Minting tokens from a service account
// key is not done here.
//
// The pipelines don't know about these types. They only see the
// `Submitter` and `Inspector` traits, which these clients implement.
// =============================================================================

mod indexing;
mod inspection;

pub use indexing::{IndexingClient, NotificationType, DEFAULT_INDEXING_ENDPOINT};
pub use inspection::{InspectionClient, DEFAULT_INSPECTION_ENDPOINT};

use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum GoogleApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

fn build_client() -> Result<Client, GoogleApiError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

// Joins an API base (with or without trailing slash) and a method path
fn endpoint_url(base: &str, method_path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), method_path)
}

// Turns a non-2xx response into GoogleApiError::Api with the body as detail
async fn check_status(response: Response) -> Result<Response, GoogleApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GoogleApiError::Api {
        status: status.as_u16(),
        body,
    })
}
