// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use async_trait::async_trait;

use crate::inboxsync_version;
use crate::modules::error::{code::ErrorCode, InboxSyncResult};
use crate::modules::gmail::model::{MessageList, MessageMeta};
use crate::modules::gmail::MailSource;
use crate::raise_error;

const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";

// The metadata format only ever returns the headers named here.
const METADATA_HEADERS: [&str; 9] = [
    "Subject",
    "From",
    "To",
    "Cc",
    "Bcc",
    "Date",
    "Message-ID",
    "References",
    "In-Reply-To",
];

pub struct GmailClient {
    client: reqwest::Client,
    access_token: String,
    user_id: String,
}

impl GmailClient {
    pub fn new(access_token: String, user_id: String) -> InboxSyncResult<Self> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(format!("InboxSync/{}", inboxsync_version!()))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                raise_error!(
                    format!("Failed to build HTTP client: {:#?}", e),
                    ErrorCode::InternalError
                )
            })?;

        Ok(Self {
            client,
            access_token,
            user_id,
        })
    }

    async fn get_json(&self, url: &str) -> InboxSyncResult<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                raise_error!(
                    format!("Gmail API request failed: {:#?}", e),
                    ErrorCode::NetworkError
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(raise_error!(
                format!("Gmail API returned status {}: {}", status, body),
                ErrorCode::GmailApiCallFailed
            ));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            raise_error!(
                format!("Failed to read Gmail API response body: {:#?}", e),
                ErrorCode::GmailApiCallFailed
            )
        })
    }
}

#[async_trait]
impl MailSource for GmailClient {
    async fn list_messages(
        &self,
        page_token: Option<&str>,
        max_results: u32,
    ) -> InboxSyncResult<MessageList> {
        let mut url = format!(
            "{}/users/{}/messages?maxResults={}",
            GMAIL_API_BASE, self.user_id, max_results
        );

        if let Some(page_token) = page_token {
            url.push_str(&format!("&pageToken={}", page_token));
        }

        let value = self.get_json(&url).await?;
        serde_json::from_value::<MessageList>(value).map_err(|e| {
            raise_error!(
                format!(
                    "Failed to deserialize Gmail API response into MessageList: {:#?}. Possible model mismatch or API change.",
                    e
                ),
                ErrorCode::GmailApiCallFailed
            )
        })
    }

    async fn get_message(&self, id: &str) -> InboxSyncResult<MessageMeta> {
        let mut url = format!(
            "{}/users/{}/messages/{}?format=metadata",
            GMAIL_API_BASE, self.user_id, id
        );
        for name in METADATA_HEADERS {
            url.push_str(&format!("&metadataHeaders={}", name));
        }

        let value = self.get_json(&url).await?;
        serde_json::from_value::<MessageMeta>(value).map_err(|e| {
            raise_error!(
                format!(
                    "Failed to deserialize Gmail API response into MessageMeta: {:#?}. Possible model mismatch or API change.",
                    e
                ),
                ErrorCode::GmailApiCallFailed
            )
        })
    }
}
