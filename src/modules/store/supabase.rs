// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::inboxsync_version;
use crate::modules::error::{code::ErrorCode, InboxSyncResult};
use crate::modules::record::InboxRecord;
use crate::modules::settings::cli::Settings;
use crate::modules::store::{InboxStore, MemberRow};
use crate::raise_error;

const MEMBERS_TABLE: &str = "members";
const INBOX_TABLE: &str = "email_inbox";

/// PostgREST-backed store client. Authentication uses the service role
/// key, sent both as `apikey` and bearer token as the API expects.
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: Url,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: Url, service_key: String) -> InboxSyncResult<Self> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(format!("InboxSync/{}", inboxsync_version!()))
            .timeout(Duration::from_secs(10))
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
            base_url,
            service_key,
        })
    }

    pub fn from_settings(settings: &Settings) -> InboxSyncResult<Self> {
        Self::new(
            settings.store_url()?.clone(),
            settings.store_service_key()?.to_owned(),
        )
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.as_str().trim_end_matches('/'),
            table
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

#[async_trait]
impl InboxStore for SupabaseStore {
    async fn find_member_by_address(&self, address: &str) -> InboxSyncResult<Option<MemberRow>> {
        // The address is percent-encoded so commas or parentheses in the
        // input cannot break the or=() filter syntax.
        let encoded = urlencoding::encode(address);
        let url = format!(
            "{}?select=id&or=(email.ilike.{},school_email.ilike.{})&limit=1",
            self.table_url(MEMBERS_TABLE),
            encoded,
            encoded
        );

        let response = self
            .authorized(self.client.get(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                raise_error!(
                    format!("Member lookup request failed: {:#?}", e),
                    ErrorCode::NetworkError
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(raise_error!(
                format!("Member lookup returned status {}: {}", status, body),
                ErrorCode::StoreQueryFailed
            ));
        }

        let rows = response.json::<Vec<MemberRow>>().await.map_err(|e| {
            raise_error!(
                format!("Failed to parse member lookup response: {:#?}", e),
                ErrorCode::StoreQueryFailed
            )
        })?;
        Ok(rows.into_iter().next())
    }

    async fn upsert_record(&self, record: &InboxRecord) -> InboxSyncResult<()> {
        let url = format!("{}?on_conflict=gmail_message_id", self.table_url(INBOX_TABLE));

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(|e| {
                raise_error!(
                    format!("Record upsert request failed: {:#?}", e),
                    ErrorCode::NetworkError
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(raise_error!(
                format!("Record upsert returned status {}: {}", status, body),
                ErrorCode::StoreUpsertFailed
            ));
        }

        Ok(())
    }
}
