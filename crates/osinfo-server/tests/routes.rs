//! Router tests driven through `tower::ServiceExt::oneshot` with a fake probe.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use futures_util::future::join_all;
use serde_json::Value;
use tower::ServiceExt;

use osinfo_core::error::{OsInfoError, Result};
use osinfo_core::telemetry::Aggregator;
use osinfo_server::app_state::AppState;
use osinfo_server::config::{self, ServerConfig};
use osinfo_server::host::{DiskUsage, HostInfo, HostProbe, MemoryStats};
use osinfo_server::router;

#[derive(Clone, Copy)]
enum Mode {
    Healthy,
    Failing,
    Panicking,
}

struct FakeProbe {
    mode: Mode,
}

#[async_trait]
impl HostProbe for FakeProbe {
    async fn info(&self) -> Result<HostInfo> {
        Ok(HostInfo {
            hostname: "box-1".into(),
            uptime: 3600,
            platform: "debian".into(),
            platform_family: "Linux".into(),
            platform_version: "12".into(),
            kernel_version: "6.1.0".into(),
            architecture: "x86_64".into(),
        })
    }

    async fn uptime(&self) -> Result<u64> {
        if let Mode::Failing = self.mode {
            return Err(OsInfoError::Probe("uptime unreadable".into()));
        }
        Ok(3600)
    }

    async fn memory(&self) -> Result<MemoryStats> {
        match self.mode {
            Mode::Healthy => {}
            Mode::Failing => return Err(OsInfoError::Probe("meminfo unreadable".into())),
            Mode::Panicking => panic!("meminfo parser blew up"),
        }
        Ok(MemoryStats {
            total: 1000,
            available: 750,
            used: 250,
            used_percent: 25.0,
        })
    }

    async fn cpu_percent(&self, sample: Duration) -> Result<Vec<f64>> {
        assert_eq!(sample, Duration::from_millis(500));
        Ok(vec![12.5])
    }

    async fn disks(&self) -> Result<Vec<DiskUsage>> {
        Ok(vec![DiskUsage {
            device: "/dev/sda1".into(),
            mountpoint: "/".into(),
            fstype: "ext4".into(),
            total: 100,
            free: 40,
            used: 60,
            used_percent: 60.0,
        }])
    }
}

fn state_with(cfg: ServerConfig, mode: Mode) -> AppState {
    AppState::with_probe(cfg, Arc::new(FakeProbe { mode })).unwrap()
}

fn app() -> (Router, Arc<Aggregator>) {
    let state = state_with(ServerConfig::default(), Mode::Healthy);
    let agg = state.aggregator();
    (router::build_router(state), agg)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let res = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let v = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, v)
}

async fn get_text(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let res = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let ct = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, ct, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_ok() {
    let (app, _) = app();
    let (status, v) = get_json(&app, "/os/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");
}

#[tokio::test]
async fn host_routes_use_probe() {
    let (app, _) = app();

    let (_, info) = get_json(&app, "/os/info").await;
    assert_eq!(info["hostname"], "box-1");
    assert_eq!(info["platformFamily"], "Linux");
    assert_eq!(info["kernelVersion"], "6.1.0");

    let (_, up) = get_json(&app, "/os/uptime").await;
    assert_eq!(up["uptime_seconds"], 3600);

    let (_, mem) = get_json(&app, "/os/mem").await;
    assert_eq!(mem["usedPercent"], 25.0);

    let (_, cpu) = get_json(&app, "/os/cpu").await;
    assert_eq!(cpu["cpu_percent"][0], 12.5);

    let (_, disk) = get_json(&app, "/os/disk").await;
    assert_eq!(disk[0]["mountpoint"], "/");
    assert_eq!(disk[0]["usedPercent"], 60.0);
}

#[tokio::test]
async fn probe_failure_is_500_with_message() {
    let app = router::build_router(state_with(ServerConfig::default(), Mode::Failing));
    let (status, v) = get_json(&app, "/os/mem").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v["error"], "meminfo unreadable");
}

#[tokio::test]
async fn every_request_is_observed_once() {
    let (app, agg) = app();

    get_json(&app, "/os/health").await;
    get_json(&app, "/os/health").await;
    get_json(&app, "/os/nope").await;

    let (status, m) = get_json(&app, "/os/metrics").await;
    assert_eq!(status, StatusCode::OK);
    // the metrics request itself is recorded after its body is built
    assert_eq!(m["total_requests"], 3);
    assert_eq!(m["status_codes"]["200"], 2);
    assert_eq!(m["status_codes"]["404"], 1);
    assert!(m["avg_response_time_ms"].is_f64());

    let s = agg.snapshot();
    assert_eq!(s.total_requests, 4);
    assert_eq!(s.status_codes.values().sum::<u64>(), 4);
}

#[tokio::test]
async fn failed_requests_record_their_status() {
    let state = state_with(ServerConfig::default(), Mode::Failing);
    let agg = state.aggregator();
    let app = router::build_router(state);

    get_json(&app, "/os/uptime").await;
    assert_eq!(agg.snapshot().status_codes.get(&500), Some(&1));
}

#[tokio::test]
async fn fresh_metrics_are_zero() {
    let (app, _) = app();
    let (_, m) = get_json(&app, "/os/metrics").await;
    assert_eq!(m["total_requests"], 0);
    assert_eq!(m["avg_response_time_ms"], 0.0);
    assert_eq!(m["status_codes"], serde_json::json!({}));
}

#[tokio::test]
async fn server_uptime_route() {
    let (app, agg) = app();
    let (status, v) = get_json(&app, "/os/server-uptime").await;
    assert_eq!(status, StatusCode::OK);
    assert!(v["server_uptime_seconds"].as_f64().unwrap() >= 0.0);
    assert_eq!(
        v["server_start_time"].as_str().unwrap(),
        serde_json::to_value(agg.started_at()).unwrap().as_str().unwrap()
    );
}

#[tokio::test]
async fn gui_metrics_is_prometheus_text() {
    let (app, _) = app();
    get_json(&app, "/os/health").await;

    let (status, ct, body) = get_text(&app, "/os/gui-metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ct.unwrap().starts_with("text/plain; version=0.0.4"));
    assert!(body.contains("osinfo_http_requests_total{code=\"200\"} 1\n"));
    assert!(body.contains("osinfo_process_uptime_seconds"));
}

#[tokio::test]
async fn concurrent_requests_all_counted() {
    let (app, agg) = app();

    let reqs = (0..200).map(|_| {
        let app = app.clone();
        async move {
            app.oneshot(Request::get("/os/health").body(Body::empty()).unwrap())
                .await
                .unwrap()
                .status()
        }
    });
    let statuses = join_all(reqs).await;
    assert!(statuses.iter().all(|s| *s == StatusCode::OK));

    let s = agg.snapshot();
    assert_eq!(s.total_requests, 200);
    assert_eq!(s.status_codes.get(&200), Some(&200));
}

#[tokio::test]
async fn env_listing_and_toggle() {
    let path = std::env::var("PATH").expect("PATH is set for test runs");
    let (app, _) = app();
    let (status, v) = get_json(&app, "/os/env").await;
    assert_eq!(status, StatusCode::OK);
    let env = v["env"].as_array().unwrap();
    let expected = format!("PATH={path}");
    assert!(env.iter().any(|e| e.as_str() == Some(expected.as_str())));

    let cfg = config::load_from_str("version: 1\nfeatures: { env: false }\n").unwrap();
    let app = router::build_router(state_with(cfg, Mode::Healthy));
    let (status, _) = get_json(&app, "/os/env").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_and_static_assets() {
    let (app, _) = app();

    let (status, ct, body) = get_text(&app, "/os/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ct.unwrap().starts_with("text/html"));
    assert!(body.contains("<title>OS Metrics Dashboard</title>"));
    assert!(body.contains("/os/static/dashboard.js"));

    let (status, ct, _) = get_text(&app, "/os/static/dashboard.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ct.unwrap().starts_with("text/javascript"));

    let (status, ct, _) = get_text(&app, "/os/static/dashboard.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ct.unwrap().starts_with("text/css"));

    let (status, _) = get_json(&app, "/os/static/missing.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn custom_prefix() {
    let cfg = config::load_from_str("version: 1\nserver: { prefix: \"/ops\" }\n").unwrap();
    let app = router::build_router(state_with(cfg, Mode::Healthy));
    assert_eq!(get_json(&app, "/ops/health").await.0, StatusCode::OK);
    assert_eq!(get_json(&app, "/os/health").await.0, StatusCode::NOT_FOUND);

    let cfg = config::load_from_str("version: 1\nserver: { prefix: \"/\" }\n").unwrap();
    let app = router::build_router(state_with(cfg, Mode::Healthy));
    assert_eq!(get_json(&app, "/health").await.0, StatusCode::OK);
}

#[tokio::test]
async fn panics_are_recorded_as_500() {
    let state = state_with(ServerConfig::default(), Mode::Panicking);
    let agg = state.aggregator();
    let app = router::build_router(state);

    let (status, _) = get_json(&app, "/os/mem").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let s = agg.snapshot();
    assert_eq!(s.total_requests, 1);
    assert_eq!(s.status_codes.get(&500), Some(&1));

    // the router keeps serving after a handler panic
    assert_eq!(get_json(&app, "/os/health").await.0, StatusCode::OK);
    assert_eq!(agg.snapshot().total_requests, 2);
}
