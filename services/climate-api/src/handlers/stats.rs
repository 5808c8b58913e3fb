//! Temperature statistics routes.
//!
//! Path segments are passed to the query as-is. A date that is malformed,
//! outside the data, or a range with `start > end` produces a single record
//! of nulls rather than an error.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};

use climate_common::TemperatureStats;

use crate::error::ApiError;
use crate::metrics::observe;
use crate::state::AppState;

/// GET /api/v1.0/:start - Min/avg/max temperature from `start` onward
pub async fn stats_from_start_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let stats = observe("stats-from-start", state.store.temperature_stats_from(&start)).await?;
    Ok(Json(vec![stats]))
}

/// GET /api/v1.0/:start/:end - Min/avg/max temperature for `start..=end`
pub async fn stats_from_range_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let stats = observe(
        "stats-from-range",
        state.store.temperature_stats_between(&start, &end),
    )
    .await?;
    Ok(Json(vec![stats]))
}
