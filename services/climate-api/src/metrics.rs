//! Request metrics.
//!
//! Recorded through the `metrics` facade; when no recorder is installed
//! (tests, or the exporter failed to start) every call is a no-op.

use std::future::Future;
use std::time::Instant;

use metrics::{counter, histogram};

use climate_common::ClimateResult;

/// Run one route's query, recording its count, latency and failure.
pub async fn observe<T, F>(route: &'static str, query: F) -> ClimateResult<T>
where
    F: Future<Output = ClimateResult<T>>,
{
    let start = Instant::now();
    let result = query.await;

    counter!("climate_requests_total", "route" => route).increment(1);
    histogram!("climate_query_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());

    if let Err(e) = &result {
        counter!("climate_request_errors_total", "route" => route, "kind" => e.kind())
            .increment(1);
    }

    result
}
