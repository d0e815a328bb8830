// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::common::log::Tracing;
use crate::modules::error::code::ErrorCode;
use crate::modules::error::handler::error_handler;
use crate::modules::error::InboxSyncResult;
use crate::modules::settings::cli::SETTINGS;
use crate::modules::utils::shutdown::shutdown_signal;
use crate::raise_error;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Cors};
use poem::{get, post, EndpointExt, Route, Server};
use status::get_status;
use std::time::Duration;
use sync::sync_mailbox;

pub mod status;
pub mod sync;

pub async fn start_http_server() -> InboxSyncResult<()> {
    let listener = TcpListener::bind((
        SETTINGS
            .inboxsync_bind_ip
            .clone()
            .unwrap_or("0.0.0.0".into()),
        SETTINGS.inboxsync_http_port as u16,
    ));

    let mut cors_origins = SETTINGS.inboxsync_cors_origins.clone();
    if cors_origins.is_empty() {
        cors_origins = ["*".to_string()].into_iter().collect();
    }

    let cors = Cors::new()
        .allow_origins(cors_origins)
        .allow_credentials(true)
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["Content-Type", "Authorization"])
        .max_age(SETTINGS.inboxsync_cors_max_age);

    let route = Route::new()
        .at("/sync", post(sync_mailbox))
        .at("/status", get(get_status))
        .with(Tracing)
        .with(cors)
        .with(CatchPanic::new());

    let server = Server::new(listener)
        .name("InboxSync Service")
        .idle_timeout(Duration::from_secs(60))
        .run_with_graceful_shutdown(
            route.catch_all_error(error_handler),
            shutdown_signal(),
            Some(Duration::from_secs(5)),
        );
    println!(
        "InboxSync service is now running on port {}.",
        SETTINGS.inboxsync_http_port
    );
    server
        .await
        .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))
}
