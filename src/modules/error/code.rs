// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem::http::StatusCode;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCode {
    // Client-side errors (10000–10999)
    InvalidParameter = 10000,
    MissingConfiguration = 10020,
    MethodNotAllowed = 10090,

    // Resource errors (30000–30999)
    ResourceNotFound = 30000,

    // Network connection errors (40000–40999)
    NetworkError = 40000,
    HttpResponseError = 40030,

    // Mailbox synchronization errors (50000–50999)
    OAuth2TokenExchangeFailed = 50000,
    GmailApiCallFailed = 50010,
    StoreQueryFailed = 50020,
    StoreUpsertFailed = 50030,
    SyncRunFailed = 50040,

    // Internal system errors (70000–70999)
    InternalError = 70000,
    UnhandledPoemError = 70010,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidParameter => StatusCode::BAD_REQUEST,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorCode::MissingConfiguration
            | ErrorCode::NetworkError
            | ErrorCode::HttpResponseError
            | ErrorCode::OAuth2TokenExchangeFailed
            | ErrorCode::GmailApiCallFailed
            | ErrorCode::StoreQueryFailed
            | ErrorCode::StoreUpsertFailed
            | ErrorCode::SyncRunFailed
            | ErrorCode::InternalError
            | ErrorCode::UnhandledPoemError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParameter => "invalid parameter",
            ErrorCode::MissingConfiguration => "missing configuration",
            ErrorCode::MethodNotAllowed => "method not allowed",
            ErrorCode::ResourceNotFound => "resource not found",
            ErrorCode::NetworkError => "network error",
            ErrorCode::HttpResponseError => "unexpected http response",
            ErrorCode::OAuth2TokenExchangeFailed => "oauth2 token exchange failed",
            ErrorCode::GmailApiCallFailed => "gmail api call failed",
            ErrorCode::StoreQueryFailed => "store query failed",
            ErrorCode::StoreUpsertFailed => "store upsert failed",
            ErrorCode::SyncRunFailed => "sync run failed",
            ErrorCode::InternalError => "internal error",
            ErrorCode::UnhandledPoemError => "unhandled server error",
        }
    }
}
