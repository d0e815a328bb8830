// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::{code::ErrorCode, InboxSyncResult};
use crate::raise_error;
use clap::{builder::ValueParser, Parser};
use std::{collections::HashSet, sync::LazyLock};
use url::Url;

#[cfg(not(test))]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::parse);

#[cfg(test)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new_for_test);

#[derive(Debug, Parser)]
#[clap(
    name = "inboxsync",
    about = "Synchronizes an organization's Gmail mailbox into a member-aware inbox store,
    matching each message's correspondents against the member directory.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Settings {
    /// inboxsync log level (default: "info")
    #[clap(
        long,
        default_value = "info",
        env,
        help = "Set the log level for inboxsync"
    )]
    pub inboxsync_log_level: String,

    /// Enable ANSI logs (default: true)
    #[clap(long, default_value = "true", env, help = "Enable ANSI formatted logs")]
    pub inboxsync_ansi_logs: bool,

    /// inboxsync HTTP port (default: 15730)
    #[clap(
        long,
        default_value = "15730",
        env,
        help = "Set the HTTP port for inboxsync"
    )]
    pub inboxsync_http_port: i32,

    /// The IP address the service binds to, in IPv4 format (e.g., 192.168.1.1).
    #[clap(
        long,
        env,
        default_value = "0.0.0.0",
        help = "The IP address that the service binds to, in IPv4 format (e.g., 192.168.1.1).",
        value_parser = ValueParser::new(|s: &str| {
            if s.parse::<std::net::Ipv4Addr>().is_err() {
                return Err("The bind IP address must be a valid IPv4 address.".to_string());
            }

            Ok(s.to_string())
        })
    )]
    pub inboxsync_bind_ip: Option<String>,

    /// CORS allowed origins (default: "*")
    #[clap(
        long,
        default_value = "*",
        env,
        help = "Set the allowed CORS origins (comma-separated list, e.g., \"https://example.com, https://another.com\")",
        value_parser = ValueParser::new(|s: &str| -> Result<HashSet<String>, String> {
            let set: HashSet<String> = s.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
            Ok(set)
        })
    )]
    pub inboxsync_cors_origins: HashSet<String>,

    /// CORS max age in seconds (default: 86400)
    #[clap(
        long,
        default_value = "86400",
        env,
        help = "Set the CORS max age in seconds"
    )]
    pub inboxsync_cors_max_age: i32,

    /// OAuth2 client id for the Gmail refresh-token grant. Required.
    #[clap(
        long,
        env,
        help = "Set the OAuth2 client id used for the Gmail refresh-token grant"
    )]
    pub inboxsync_gmail_client_id: Option<String>,

    /// OAuth2 client secret for the Gmail refresh-token grant. Required.
    #[clap(
        long,
        env,
        help = "Set the OAuth2 client secret used for the Gmail refresh-token grant"
    )]
    pub inboxsync_gmail_client_secret: Option<String>,

    /// Long-lived refresh token for the synchronized mailbox. Required.
    #[clap(
        long,
        env,
        help = "Set the long-lived Gmail refresh token for the synchronized mailbox"
    )]
    pub inboxsync_gmail_refresh_token: Option<String>,

    /// Gmail user id of the synchronized mailbox (default: "me")
    #[clap(
        long,
        default_value = "me",
        env,
        help = "Set the Gmail user id of the synchronized mailbox"
    )]
    pub inboxsync_gmail_user: String,

    /// Messages requested per Gmail list page (default: 100)
    #[clap(
        long,
        default_value = "100",
        env,
        help = "Set the number of messages requested per Gmail list page (1-500)",
        value_parser = ValueParser::new(|s: &str| -> Result<u32, String> {
            let size: u32 = s
                .parse()
                .map_err(|_| "The page size must be a number.".to_string())?;
            if !(1..=500).contains(&size) {
                return Err("The page size must be between 1 and 500.".to_string());
            }
            Ok(size)
        })
    )]
    pub inboxsync_page_size: u32,

    /// Base URL of the inbox store (PostgREST endpoint). Required.
    #[clap(
        long,
        env,
        help = "Set the base URL of the inbox store (PostgREST endpoint)"
    )]
    pub inboxsync_store_url: Option<Url>,

    /// Service role key used to authenticate against the inbox store. Required.
    #[clap(
        long,
        env,
        help = "Set the service role key used to authenticate against the inbox store"
    )]
    pub inboxsync_store_service_key: Option<String>,
}

impl Settings {
    /// Checks every credential the pipeline cannot run without. Called once
    /// at startup so a misconfigured deployment fails before serving.
    pub fn validate(&self) -> InboxSyncResult<()> {
        self.gmail_client_id()?;
        self.gmail_client_secret()?;
        self.gmail_refresh_token()?;
        self.store_url()?;
        self.store_service_key()?;
        Ok(())
    }

    pub fn gmail_client_id(&self) -> InboxSyncResult<&str> {
        required(
            self.inboxsync_gmail_client_id.as_deref(),
            "inboxsync_gmail_client_id",
        )
    }

    pub fn gmail_client_secret(&self) -> InboxSyncResult<&str> {
        required(
            self.inboxsync_gmail_client_secret.as_deref(),
            "inboxsync_gmail_client_secret",
        )
    }

    pub fn gmail_refresh_token(&self) -> InboxSyncResult<&str> {
        required(
            self.inboxsync_gmail_refresh_token.as_deref(),
            "inboxsync_gmail_refresh_token",
        )
    }

    pub fn store_url(&self) -> InboxSyncResult<&Url> {
        self.inboxsync_store_url.as_ref().ok_or_else(|| {
            raise_error!(
                "'inboxsync_store_url' is not configured. Set it via environment variable or command line flag.".into(),
                ErrorCode::MissingConfiguration
            )
        })
    }

    pub fn store_service_key(&self) -> InboxSyncResult<&str> {
        required(
            self.inboxsync_store_service_key.as_deref(),
            "inboxsync_store_service_key",
        )
    }

    #[cfg(test)]
    fn new_for_test() -> Self {
        Self {
            inboxsync_log_level: "info".to_string(),
            inboxsync_ansi_logs: false,
            inboxsync_http_port: 15730,
            inboxsync_bind_ip: Default::default(),
            inboxsync_cors_origins: Default::default(),
            inboxsync_cors_max_age: 86400,
            inboxsync_gmail_client_id: Some("test-client-id".into()),
            inboxsync_gmail_client_secret: Some("test-client-secret".into()),
            inboxsync_gmail_refresh_token: Some("test-refresh-token".into()),
            inboxsync_gmail_user: "me".into(),
            inboxsync_page_size: 100,
            inboxsync_store_url: Some("http://localhost:54321".parse().unwrap()),
            inboxsync_store_service_key: Some("test-service-key".into()),
        }
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> InboxSyncResult<&'a str> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        raise_error!(
            format!("'{name}' is not configured. Set it via environment variable or command line flag."),
            ErrorCode::MissingConfiguration
        )
    })
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn validate_passes_with_full_credentials() {
        let settings = Settings::new_for_test();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_refresh_token() {
        let mut settings = Settings::new_for_test();
        settings.inboxsync_gmail_refresh_token = None;
        let error = settings.validate().unwrap_err();
        assert!(error.to_string().contains("inboxsync_gmail_refresh_token"));
    }

    #[test]
    fn validate_rejects_blank_service_key() {
        let mut settings = Settings::new_for_test();
        settings.inboxsync_store_service_key = Some("   ".into());
        assert!(settings.validate().is_err());
    }
}
