// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use serde::Deserialize;

use crate::inboxsync_version;
use crate::modules::error::{code::ErrorCode, InboxSyncResult};
use crate::modules::settings::cli::Settings;
use crate::raise_error;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// Exchanges the configured refresh token for a short-lived bearer token
/// via the refresh-token grant. A failed exchange is unrecoverable for the
/// current run; no retry is attempted.
pub async fn exchange_refresh_token(settings: &Settings) -> InboxSyncResult<String> {
    let params = [
        ("client_id", settings.gmail_client_id()?),
        ("client_secret", settings.gmail_client_secret()?),
        ("grant_type", "refresh_token"),
        ("refresh_token", settings.gmail_refresh_token()?),
    ];

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

    let response = client
        .post(GOOGLE_TOKEN_URL)
        .header("Accept", "application/json")
        .form(&params)
        .send()
        .await
        .map_err(|e| {
            raise_error!(
                format!("Token exchange request failed: {:#?}", e),
                ErrorCode::NetworkError
            )
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(raise_error!(
            format!("Token exchange failed with status {}: {}", status, body),
            ErrorCode::OAuth2TokenExchangeFailed
        ));
    }

    let token = response
        .json::<AccessTokenResponse>()
        .await
        .map_err(|e| {
            raise_error!(
                format!("Failed to parse token response: {:#?}", e),
                ErrorCode::OAuth2TokenExchangeFailed
            )
        })?;

    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::AccessTokenResponse;

    #[test]
    fn token_response_ignores_extra_fields() {
        let parsed: AccessTokenResponse = serde_json::from_str(
            r#"{"access_token":"ya29.abc","expires_in":3599,"scope":"gmail.readonly","token_type":"Bearer"}"#,
        )
        .unwrap();
        assert_eq!(parsed.access_token, "ya29.abc");
    }
}
