//! Precipitation route.

use std::sync::Arc;

use axum::{extract::Extension, Json};

use climate_common::PrecipitationRecord;

use crate::error::ApiError;
use crate::metrics::observe;
use crate::state::AppState;

/// GET /api/v1.0/precipitation - Date and precipitation over the dataset's last year
pub async fn precipitation_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>, ApiError> {
    let records = observe("precipitation", state.store.precipitation_last_year()).await?;
    Ok(Json(records))
}
