//! Database metrics collection.
//!
//! Provides standardized metrics for monitoring repository operations:
//! - Query counters by operation and outcome
//! - Latency histograms

use std::future::Future;
use std::time::Instant;

use metrics::{counter, histogram};

use crate::error::DbResult;

/// Metric name constants for consistency.
pub mod names {
    /// Total repository operations by operation and outcome.
    pub const QUERIES_TOTAL: &str = "joblinks_db_queries_total";

    /// Operation latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "joblinks_db_latency_seconds";
}

/// Record metrics for a completed repository operation.
pub fn record_query(operation: &'static str, ok: bool, latency_secs: f64) {
    counter!(
        names::QUERIES_TOTAL,
        "operation" => operation,
        "outcome" => if ok { "ok" } else { "error" }
    )
    .increment(1);

    histogram!(names::LATENCY_SECONDS, "operation" => operation).record(latency_secs);
}

/// Run a repository operation, recording its outcome and latency.
pub(crate) async fn timed<T, F>(operation: &'static str, fut: F) -> DbResult<T>
where
    F: Future<Output = DbResult<T>>,
{
    let started = Instant::now();
    let result = fut.await;
    record_query(operation, result.is_ok(), started.elapsed().as_secs_f64());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::QUERIES_TOTAL.starts_with("joblinks_db_"));
        assert!(names::LATENCY_SECONDS.contains("latency"));
    }

    #[test]
    fn test_timed_passes_result_through() {
        let value = tokio_test::block_on(timed("test.op", async { Ok::<_, crate::DbError>(7) }));
        assert_eq!(value.unwrap(), 7);
    }
}
