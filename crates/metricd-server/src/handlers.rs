//! Ingestion and listing handlers.
//!
//! `update` is the request dispatcher: it derives the source from the peer
//! address, hands the raw request target to the repository and maps the
//! outcome onto an HTTP status.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use metricd_core::{Listing, MetricId, MetricType};

use crate::app_state::AppState;
use crate::error::ApiError;

pub const METHOD_NOT_ALLOWED_BODY: &str = "Only POST requests are allowed!\n";

/// `/update/<type>/<name>/<value>`
pub async fn update(
    State(app): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::POST {
        app.metrics()
            .method_rejections
            .inc(&[("method", method.as_str())]);
        return (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY).into_response();
    }

    let source = peer.ip().to_canonical().to_string();
    let metric = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    // Label only; the repository parses the identifier itself. Unknown
    // types collapse into one series.
    let kind = MetricId::parse(metric)
        .ok()
        .and_then(|id| id.kind.parse::<MetricType>().ok())
        .map_or("unknown", MetricType::as_str);

    let started = Instant::now();
    let res = app.repository().update(&source, metric);
    app.metrics()
        .update_duration
        .observe(&[], started.elapsed());

    match res {
        Ok(()) => {
            app.metrics()
                .updates
                .inc(&[("type", kind), ("outcome", "ok")]);
            tracing::debug!(%source, %metric, "metric updated");
            StatusCode::OK.into_response()
        }
        Err(e) => {
            app.metrics()
                .updates
                .inc(&[("type", kind), ("outcome", e.label())]);
            tracing::warn!(%source, %metric, error = %e, "metric update rejected");
            ApiError(e).into_response()
        }
    }
}

/// Debug listing of everything stored, grouped by source.
pub async fn list(State(app): State<AppState>) -> Json<Listing> {
    Json(app.repository().list(&[]))
}
