//! Temperature observation route.

use std::sync::Arc;

use axum::{extract::Extension, Json};

use climate_common::TemperatureObservation;

use crate::error::ApiError;
use crate::metrics::observe;
use crate::state::AppState;

/// GET /api/v1.0/tobs - Last year of temperatures at the most active station, newest first
pub async fn tobs_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let observations = observe("tobs", state.store.temperature_last_year()).await?;
    Ok(Json(observations))
}
