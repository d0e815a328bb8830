// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::{code::ErrorCode, ErrorBody, InboxSyncError};

pub async fn error_handler(error: poem::Error) -> impl poem::IntoResponse {
    if error.is::<InboxSyncError>() {
        return error.into_response();
    }

    let code = if error.is::<poem::error::NotFoundError>() {
        ErrorCode::ResourceNotFound
    } else if error.is::<poem::error::MethodNotAllowedError>() {
        ErrorCode::MethodNotAllowed
    } else if error.is::<poem::error::ParsePathError>()
        || error.is::<poem::error::ParseQueryError>()
        || error.is::<poem::error::ParseJsonError>()
        || error.is::<poem::error::ParseTypedHeaderError>()
    {
        ErrorCode::InvalidParameter
    } else {
        ErrorCode::UnhandledPoemError
    };

    let mut response = ErrorBody::new(code.label(), &error.to_string()).into_response(code.status());
    response.set_status(error.status());
    response
}
