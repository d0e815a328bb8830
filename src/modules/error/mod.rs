// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use code::ErrorCode;
use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::{Body, Response};
use serde::Serialize;
use snafu::{Location, Snafu};

pub mod code;
pub mod handler;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum InboxSyncError {
    #[snafu(display("{message}"))]
    Generic {
        message: String,
        #[snafu(implicit)]
        location: Location,
        code: ErrorCode,
    },
}

pub type InboxSyncResult<T, E = InboxSyncError> = std::result::Result<T, E>;

/// JSON body every failed request carries.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl ErrorBody {
    pub fn new(error: &str, details: &str) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        let body = Body::from_json(&self).unwrap_or_else(|_| Body::from_string(self.details));
        Response::builder()
            .status(status)
            .content_type("application/json")
            .body(body)
    }
}

impl ResponseError for InboxSyncError {
    fn status(&self) -> StatusCode {
        match self {
            InboxSyncError::Generic { code, .. } => code.status(),
        }
    }

    fn as_response(&self) -> Response
    where
        Self: std::error::Error + Send + Sync + 'static,
    {
        match self {
            InboxSyncError::Generic {
                message,
                location,
                code,
            } => {
                tracing::error!("request failed: [{:?}] {} at {}", code, message, location);
                ErrorBody::new(code.label(), message).into_response(code.status())
            }
        }
    }
}
