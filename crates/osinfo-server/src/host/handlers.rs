//! Host telemetry routes: `/info`, `/uptime`, `/mem`, `/cpu`, `/disk`, `/env`.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app_state::AppState;
use crate::error::ApiResult;

use super::{DiskUsage, HostInfo, MemoryStats};

pub async fn info(State(state): State<AppState>) -> ApiResult<Json<HostInfo>> {
    Ok(Json(state.probe().info().await?))
}

pub async fn uptime(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let secs = state.probe().uptime().await?;
    Ok(Json(json!({ "uptime_seconds": secs })))
}

pub async fn memory(State(state): State<AppState>) -> ApiResult<Json<MemoryStats>> {
    Ok(Json(state.probe().memory().await?))
}

pub async fn cpu(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let sample = state.cfg().server.cpu_sample();
    let pct = state.probe().cpu_percent(sample).await?;
    Ok(Json(json!({ "cpu_percent": pct })))
}

pub async fn disk(State(state): State<AppState>) -> ApiResult<Json<Vec<DiskUsage>>> {
    Ok(Json(state.probe().disks().await?))
}

pub async fn env() -> Json<Value> {
    Json(json!({ "env": environ() }))
}

/// `KEY=VALUE` for every process variable, sorted.
pub fn environ() -> Vec<String> {
    let mut vars: Vec<String> = std::env::vars_os()
        .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
        .collect();
    vars.sort();
    vars
}
