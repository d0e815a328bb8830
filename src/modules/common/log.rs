use std::time::Instant;

use poem::{
    web::RealIp, Endpoint, FromRequest, IntoResponse, Middleware, Request, Response, Result,
};
use tracing::{error, info, warn, Instrument};

use crate::modules::utils::generate_request_id;

/// Wraps every request in a tracing span carrying a generated correlation
/// id, so each pipeline log line can be tied back to one invocation.
#[derive(Default)]
pub struct Tracing;

impl<E: Endpoint> Middleware<E> for Tracing {
    type Output = TracingEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        TracingEndpoint { inner: ep }
    }
}

/// Endpoint for the `Tracing` middleware.
pub struct TracingEndpoint<E> {
    inner: E,
}

impl<E: Endpoint> Endpoint for TracingEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let remote_addr = RealIp::from_request_without_body(&req)
            .await
            .ok()
            .and_then(|real_ip| real_ip.0)
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| req.remote_addr().to_string());
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let request_id = generate_request_id();

        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            remote_addr = %remote_addr,
            method = %method,
            path = %path,
        );

        async move {
            let now = Instant::now();
            let res = self.inner.call(req).await;
            let duration = now.elapsed();

            match res {
                Ok(resp) => {
                    let resp = resp.into_response();
                    log_response(resp.status().as_u16(), duration);
                    Ok(resp)
                }
                Err(err) => {
                    log_response(err.status().as_u16(), duration);
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[inline]
fn log_response(status: u16, duration: std::time::Duration) {
    match status {
        500.. => {
            error!(
                status = %status,
                duration = ?duration,
                "request completed with server error"
            );
        }
        400..=499 => {
            warn!(
                status = %status,
                duration = ?duration,
                "request completed with client error"
            );
        }
        _ => {
            info!(
                status = %status,
                duration = ?duration,
                "request completed successfully"
            );
        }
    }
}
