//! Request observation.
//!
//! `track_requests` times every request through the router and feeds the
//! shared aggregator; `prometheus` renders the aggregate as text exposition.

pub mod prometheus;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use osinfo_core::telemetry::{observe, Aggregator};

/// Middleware: record one observation per completed request.
pub async fn track_requests(
    State(aggregator): State<Arc<Aggregator>>,
    req: Request,
    next: Next,
) -> Response {
    let span = tracing::debug_span!("http", method = %req.method(), path = %req.uri().path());
    observe(&aggregator, next.run(req), |res: &Response| res.status().as_u16())
        .instrument(span)
        .await
}
