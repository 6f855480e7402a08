//! Operational HTTP endpoints.
//!
//! - `/health`        : liveness
//! - `/metrics`       : request statistics (JSON)
//! - `/server-uptime` : server start time and uptime (JSON)
//! - `/gui-metrics`   : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use osinfo_core::error::OsInfoError;
use osinfo_core::telemetry::{MetricsReport, ServerUptimeReport};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::obs::prometheus;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    let snap = state.aggregator().snapshot();
    Json(MetricsReport::from(&snap))
}

pub async fn server_uptime(State(state): State<AppState>) -> Json<ServerUptimeReport> {
    Json(ServerUptimeReport::from(state.aggregator().as_ref()))
}

pub async fn gui_metrics(State(state): State<AppState>) -> Response {
    let body = prometheus::render(&state.aggregator().snapshot());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, prometheus::CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError(OsInfoError::NotFound(uri.path().to_string()))
}
