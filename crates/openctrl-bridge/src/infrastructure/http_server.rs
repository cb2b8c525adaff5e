//! HTTP front end: the request router.
//!
//! Routes:
//!
//! | Method | Path                                   | Handler                    |
//! |--------|----------------------------------------|----------------------------|
//! | GET    | `/`                                    | liveness text              |
//! | POST   | `/keyboard` `/mouse` `/gamepad` `/pen` `/touch` | [`dispatch`] for that class |
//!
//! Unknown paths get axum's 404 and wrong methods its 405.
//!
//! Status mapping for the POST routes:
//!
//! | Outcome                        | Status |
//! |--------------------------------|--------|
//! | report delivered               | 200    |
//! | body not labelled as JSON      | 400    |
//! | body not a JSON object         | 400    |
//! | class unavailable              | 501    |
//! | transport not ready            | 503    |
//! | any other send failure         | 500    |
//!
//! The router holds no per-request state beyond the shared, immutable
//! [`DeviceRegistry`]; concurrency control lives in the device channels.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use openctrl_core::DeviceClass;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::application::{dispatch, DeviceRegistry, DispatchError, SendError};

/// Body of `GET /`.
pub const LIVENESS_TEXT: &str = "OpenCtrl HID bridge OK\n";

/// Builds the axum router over `registry`.
///
/// One POST route is registered for every [`DeviceClass`], bound or not, so
/// an unbound class answers 501 instead of 404.
pub fn router(registry: Arc<DeviceRegistry>) -> Router {
    let mut app = Router::new().route("/", get(liveness_handler));
    for class in DeviceClass::ALL {
        let path = format!("/{}", class.name());
        app = app.route(
            &path,
            post(
                move |State(registry): State<Arc<DeviceRegistry>>,
                      headers: HeaderMap,
                      body: Bytes| async move {
                    report_handler(&registry, class, &headers, &body).await
                },
            ),
        );
    }
    app.with_state(registry)
}

/// Binds `addr` and serves until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_server<F>(
    addr: SocketAddr,
    registry: Arc<DeviceRegistry>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
    serve(listener, registry, shutdown).await
}

/// Serves on an already-bound listener until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
///
/// # Errors
///
/// Returns an error if the listener's address cannot be read or the server
/// fails.
pub async fn serve<F>(
    listener: TcpListener,
    registry: Arc<DeviceRegistry>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr().context("listener has no local address")?;
    info!(
        "HTTP server listening on {local}, devices: {:?}",
        registry.available_classes()
    );

    axum::serve(listener, router(registry))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn liveness_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        LIVENESS_TEXT,
    )
        .into_response()
}

async fn report_handler(
    registry: &DeviceRegistry,
    class: DeviceClass,
    headers: &HeaderMap,
    body: &[u8],
) -> Response {
    // A header that is not visible ASCII is treated as absent.
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    match dispatch(registry, class, content_type, body).await {
        Ok(report) => {
            debug!(%class, ?report, "request served");
            (
                StatusCode::OK,
                format!("{} report received\n", class.display_name()),
            )
                .into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
                error!(%class, "request failed: {e}");
            }
            (status, format!("{e}\n")).into_response()
        }
    }
}

/// Maps a dispatch failure to its HTTP status.
pub fn status_for(err: &DispatchError) -> StatusCode {
    match err {
        DispatchError::Validation(_) => StatusCode::BAD_REQUEST,
        DispatchError::Unavailable(_) => StatusCode::NOT_IMPLEMENTED,
        DispatchError::Send(SendError::TransportDown { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        DispatchError::Send(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
