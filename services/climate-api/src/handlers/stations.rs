//! Station activity route.

use std::sync::Arc;

use axum::{extract::Extension, Json};

use climate_common::StationActivity;

use crate::error::ApiError;
use crate::metrics::observe;
use crate::state::AppState;

/// GET /api/v1.0/stations - Stations ranked by measurement count
pub async fn stations_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<StationActivity>>, ApiError> {
    let stations = observe("stations", state.store.station_activity()).await?;
    Ok(Json(stations))
}
