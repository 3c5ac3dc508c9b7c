// src/google/indexing.rs
// =============================================================================
// Indexing API client: tells Google a URL was updated (or deleted).
//
// Request:
//   POST {endpoint}/v3/urlNotifications:publish
//   Authorization: Bearer <token>
//   {"url": "https://...", "type": "URL_UPDATED"}
// =============================================================================

use super::{build_client, check_status, endpoint_url, GoogleApiError};
use crate::submit::Submitter;
use async_trait::async_trait;
use clap::ValueEnum;
use reqwest::Client;
use serde::Serialize;

pub const DEFAULT_INDEXING_ENDPOINT: &str = "https://indexing.googleapis.com";

// The notification kinds the Indexing API accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// The page is new or its content changed
    #[value(name = "updated")]
    UrlUpdated,
    /// The page was removed
    #[value(name = "deleted")]
    UrlDeleted,
}

#[derive(Serialize)]
struct PublishRequest<'a> {
    url: &'a str,
    #[serde(rename = "type")]
    kind: NotificationType,
}

pub struct IndexingClient {
    client: Client,
    publish_url: String,
    access_token: String,
    notification_type: NotificationType,
}

impl IndexingClient {
    pub fn new(
        endpoint: &str,
        access_token: String,
        notification_type: NotificationType,
    ) -> Result<Self, GoogleApiError> {
        Ok(Self {
            client: build_client()?,
            publish_url: endpoint_url(endpoint, "v3/urlNotifications:publish"),
            access_token,
            notification_type,
        })
    }

    pub async fn publish(&self, url: &str) -> Result<(), GoogleApiError> {
        let body = PublishRequest {
            url,
            kind: self.notification_type,
        };

        let response = self
            .client
            .post(&self.publish_url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        // The response echoes the notification metadata; nothing in it is needed
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Submitter for IndexingClient {
    async fn submit(&self, url: &str) -> anyhow::Result<()> {
        Ok(self.publish(url).await?)
    }
}
