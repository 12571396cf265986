//! Prometheus metrics for the API server.

use std::sync::LazyLock;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use regex_lite::Regex;

/// Install the Prometheus recorder and return a handle for `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "joblinks_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "joblinks_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "joblinks_http_requests_in_flight";

    pub const LOGINS_TOTAL: &str = "joblinks_logins_total";
    pub const AUTHZ_DENIED_TOTAL: &str = "joblinks_authz_denied_total";

    pub const RATE_LIMIT_HITS_TOTAL: &str = "joblinks_rate_limit_hits_total";
}

static NUMERIC_SEGMENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/[0-9]+(/|$)").ok());

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
    if status == 403 {
        counter!(names::AUTHZ_DENIED_TOTAL, "path" => sanitize_path(path)).increment(1);
    }
}

/// Record a login attempt; `outcome` is `success`, `rehashed` or `rejected`.
pub fn record_login(outcome: &'static str) {
    counter!(names::LOGINS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", sanitize_path(endpoint))];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Collapse numeric ids so label cardinality stays bounded.
fn sanitize_path(path: &str) -> String {
    match NUMERIC_SEGMENT.as_ref() {
        // Applied twice: adjacent ids share the separating slash.
        Some(re) => {
            let once = re.replace_all(path, "/:id$1");
            re.replace_all(&once, "/:id$1").into_owned()
        }
        None => path.to_string(),
    }
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);
    let response = next.run(request).await;
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
