//! Prometheus text exposition of the request aggregate.
//!
//! Durations stay in integer milliseconds, matching what the aggregator
//! stores; the unit is part of each metric name.

use std::fmt::Write;

use osinfo_core::telemetry::Snapshot;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

fn header(out: &mut String, name: &str, kind: &str, help: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

/// Render a snapshot in Prometheus text format 0.0.4.
pub fn render(s: &Snapshot) -> String {
    let mut out = String::new();

    header(
        &mut out,
        "osinfo_http_requests_total",
        "counter",
        "Requests served, by final status code.",
    );
    for (code, n) in &s.status_codes {
        let _ = writeln!(out, "osinfo_http_requests_total{{code=\"{}\"}} {}", code, n);
    }

    header(
        &mut out,
        "osinfo_http_request_duration_ms_sum",
        "counter",
        "Total time spent serving requests.",
    );
    let _ = writeln!(out, "osinfo_http_request_duration_ms_sum {}", s.total_elapsed_ms);

    header(&mut out, "osinfo_http_request_duration_ms_count", "counter", "Requests timed.");
    let _ = writeln!(out, "osinfo_http_request_duration_ms_count {}", s.total_requests);

    header(&mut out, "osinfo_http_request_duration_ms_avg", "gauge", "Mean request duration.");
    let _ = writeln!(out, "osinfo_http_request_duration_ms_avg {}", s.average_ms);

    header(&mut out, "osinfo_process_uptime_seconds", "gauge", "Seconds since the server started.");
    let _ = writeln!(out, "osinfo_process_uptime_seconds {}", s.uptime_secs());

    header(
        &mut out,
        "osinfo_process_start_time_seconds",
        "gauge",
        "Server start time since unix epoch.",
    );
    let _ = writeln!(out, "osinfo_process_start_time_seconds {}", s.started_at.timestamp());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use osinfo_core::telemetry::Aggregator;

    #[test]
    fn renders_per_code_counters() {
        let agg = Aggregator::new();
        agg.record(200, 10);
        agg.record(200, 30);
        agg.record(500, 5);

        let text = render(&agg.snapshot());
        assert!(text.contains("osinfo_http_requests_total{code=\"200\"} 2\n"));
        assert!(text.contains("osinfo_http_requests_total{code=\"500\"} 1\n"));
        assert!(text.contains("osinfo_http_request_duration_ms_sum 45\n"));
        assert!(text.contains("osinfo_http_request_duration_ms_count 3\n"));
        assert!(text.contains("osinfo_http_request_duration_ms_avg 15\n"));
    }

    #[test]
    fn empty_aggregate_still_has_headers() {
        let text = render(&Aggregator::new().snapshot());
        assert!(text.contains("# TYPE osinfo_http_requests_total counter"));
        assert!(!text.contains("osinfo_http_requests_total{"));
        assert!(text.contains("osinfo_http_request_duration_ms_avg 0\n"));
    }
}
