//! Request metrics recorded through the `metrics` facade.

use metrics::{counter, histogram};

/// Record a completed NoGo request and its response code.
pub fn record_request(code: u32, polygons: usize, duration_ms: f64) {
    counter!("nogo_requests_total", "code" => code.to_string()).increment(1);
    counter!("nogo_polygons_emitted_total").increment(polygons as u64);
    histogram!("nogo_request_duration_ms").record(duration_ms);
}

/// Record a request that failed before producing a response.
pub fn record_failure(kind: &'static str, duration_ms: f64) {
    counter!("nogo_request_failures_total", "kind" => kind).increment(1);
    histogram!("nogo_request_duration_ms").record(duration_ms);
}
