use crate::inboxsync_version;
use poem::{handler, web::Json, IntoResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub name: &'static str,
    pub version: &'static str,
}

#[handler]
pub async fn get_status() -> impl IntoResponse {
    Json(ServiceStatus {
        name: "inboxsync",
        version: inboxsync_version!(),
    })
}
