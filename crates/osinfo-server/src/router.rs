//! Axum router wiring.
//!
//! Every route lives under `server.prefix`. The observation middleware is
//! the outermost layer so it sees the final status of every request,
//! including unknown paths and handler panics (mapped to 500 by the inner
//! catch-panic layer).

use axum::{middleware, routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{app_state::AppState, dashboard, host, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let cfg = state.cfg();

    let mut api = Router::new()
        .route("/health", get(ops::health))
        .route("/info", get(host::handlers::info))
        .route("/uptime", get(host::handlers::uptime))
        .route("/mem", get(host::handlers::memory))
        .route("/cpu", get(host::handlers::cpu))
        .route("/disk", get(host::handlers::disk))
        .route("/metrics", get(ops::metrics))
        .route("/server-uptime", get(ops::server_uptime))
        .route("/gui-metrics", get(ops::gui_metrics));

    if cfg.features.env {
        api = api.route("/env", get(host::handlers::env));
    }
    if cfg.features.dashboard {
        api = api
            .route("/dashboard", get(dashboard::page))
            .route("/static/*path", get(dashboard::asset));
    }

    let app = match cfg.server.prefix.as_str() {
        "/" => api,
        prefix => Router::new().nest(prefix, api),
    };

    app.fallback(ops::not_found)
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn_with_state(
            state.aggregator(),
            obs::track_requests,
        ))
        .with_state(state)
}
