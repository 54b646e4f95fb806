//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with SLO-aligned histograms
//! and standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all LabLink metrics
pub const METRICS_PREFIX: &str = "lablink";

/// SLO-aligned histogram buckets for request latency (in seconds)
/// Targets: P50 < 50ms, P99 < 150ms
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms - P50 target
    0.075,  // 75ms
    0.100,  // 100ms
    0.150,  // 150ms - P99 target
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Auth metrics
    describe_counter!(
        format!("{}_logins_total", METRICS_PREFIX),
        Unit::Count,
        "Total login attempts"
    );

    // Wizard metrics
    describe_counter!(
        format!("{}_selection_saves_total", METRICS_PREFIX),
        Unit::Count,
        "Total wizard selection saves"
    );

    describe_counter!(
        format!("{}_wizard_redirects_total", METRICS_PREFIX),
        Unit::Count,
        "Wizard entry-guard redirects"
    );

    // Collaboration request metrics
    describe_counter!(
        format!("{}_requests_submitted_total", METRICS_PREFIX),
        Unit::Count,
        "Collaboration requests submitted"
    );

    describe_counter!(
        format!("{}_request_decisions_total", METRICS_PREFIX),
        Unit::Count,
        "Faculty accept/reject decisions"
    );

    describe_counter!(
        format!("{}_validation_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Submission validation failures"
    );

    // Abstract metrics
    describe_counter!(
        format!("{}_abstracts_submitted_total", METRICS_PREFIX),
        Unit::Count,
        "Abstracts submitted"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record a login attempt
pub fn record_login(role: &str, success: bool) {
    let status = if success { "success" } else { "failure" };

    counter!(
        format!("{}_logins_total", METRICS_PREFIX),
        "role" => role.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a wizard selection save
pub fn record_selection_save(state: &str) {
    counter!(
        format!("{}_selection_saves_total", METRICS_PREFIX),
        "state" => state.to_string()
    )
    .increment(1);
}

/// Record a wizard entry-guard redirect
pub fn record_wizard_redirect(from: &str, to: &str) {
    counter!(
        format!("{}_wizard_redirects_total", METRICS_PREFIX),
        "from" => from.to_string(),
        "to" => to.to_string()
    )
    .increment(1);
}

/// Record a collaboration request submission
pub fn record_request_submitted(project_type: &str) {
    counter!(
        format!("{}_requests_submitted_total", METRICS_PREFIX),
        "project_type" => project_type.to_string()
    )
    .increment(1);
}

/// Record a faculty accept/reject decision
pub fn record_request_decision(decision: &str) {
    counter!(
        format!("{}_request_decisions_total", METRICS_PREFIX),
        "decision" => decision.to_string()
    )
    .increment(1);
}

/// Record a submission validation failure
pub fn record_validation_failure(field: &str) {
    counter!(
        format!("{}_validation_failures_total", METRICS_PREFIX),
        "field" => field.to_string()
    )
    .increment(1);
}

/// Record an abstract submission
pub fn record_abstract_submitted() {
    counter!(format!("{}_abstracts_submitted_total", METRICS_PREFIX)).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets() {
        // Verify buckets are sorted and contain SLO targets
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }

        // P50 target (50ms) should be in buckets
        assert!(LATENCY_BUCKETS.contains(&0.050));
        // P99 target (150ms) should be in buckets
        assert!(LATENCY_BUCKETS.contains(&0.150));
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("PUT", "/v1/students/{id}/selection");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }
}
