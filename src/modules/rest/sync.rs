// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem::{handler, web::Json, Body, IntoResponse, Response, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::modules::error::{code::ErrorCode, InboxSyncResult};
use crate::modules::gmail::client::GmailClient;
use crate::modules::oauth2;
use crate::modules::settings::cli::SETTINGS;
use crate::modules::store::supabase::SupabaseStore;
use crate::modules::sync::{run_sync, SyncReport};
use crate::raise_error;

/// Optional member override carried by the request body. The camelCase
/// alias matches older callers; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SyncOverride {
    #[serde(default, alias = "memberId")]
    pub member_id: Option<String>,
}

/// A body that fails to parse is treated as "no override", not as an
/// error: the trigger request is fire-and-forget and must never be
/// rejected over payload shape.
fn parse_override(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<SyncOverride>(body) {
        Ok(overrides) => overrides.member_id,
        Err(error) => {
            warn!(error = %error, "request body is not a valid override payload, syncing without member override");
            None
        }
    }
}

#[handler]
pub async fn sync_mailbox(body: Body) -> Result<Response> {
    let bytes = body.into_vec().await.map_err(|e| {
        raise_error!(
            format!("Failed to read request body: {:#?}", e),
            ErrorCode::InvalidParameter
        )
    })?;
    let forced_member_id = parse_override(&bytes);

    let report = run_mailbox_sync(forced_member_id.as_deref()).await?;

    if report.processed == 0 && report.failures > 0 {
        return Err(raise_error!(
            format!(
                "every attempted message failed to sync: failures={}",
                report.failures
            ),
            ErrorCode::SyncRunFailed
        )
        .into());
    }

    info!(
        processed = report.processed,
        failures = report.failures,
        "mailbox sync completed"
    );
    Ok(Json(report).into_response())
}

async fn run_mailbox_sync(forced_member_id: Option<&str>) -> InboxSyncResult<SyncReport> {
    let access_token = oauth2::exchange_refresh_token(&SETTINGS).await?;
    let source = GmailClient::new(access_token, SETTINGS.inboxsync_gmail_user.clone())?;
    let store = SupabaseStore::from_settings(&SETTINGS)?;
    run_sync(&source, &store, SETTINGS.inboxsync_page_size, forced_member_id).await
}

#[cfg(test)]
mod tests {
    use super::parse_override;

    #[test]
    fn snake_case_field_is_accepted() {
        assert_eq!(
            parse_override(br#"{"member_id":"member-1"}"#).as_deref(),
            Some("member-1")
        );
    }

    #[test]
    fn camel_case_alias_is_accepted() {
        assert_eq!(
            parse_override(br#"{"memberId":"member-1"}"#).as_deref(),
            Some("member-1")
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        assert_eq!(
            parse_override(br#"{"memberId":"member-1","maxResults":50}"#).as_deref(),
            Some("member-1")
        );
    }

    #[test]
    fn empty_body_means_no_override() {
        assert_eq!(parse_override(b""), None);
        assert_eq!(parse_override(br#"{}"#), None);
    }

    #[test]
    fn malformed_body_means_no_override() {
        assert_eq!(parse_override(b"not json at all"), None);
        assert_eq!(parse_override(br#"{"member_id":"#), None);
        assert_eq!(parse_override(b"null"), None);
    }
}
