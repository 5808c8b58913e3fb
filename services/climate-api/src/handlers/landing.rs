//! Route listing.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// HTML-formatted listing of the available routes.
pub const ROUTE_LISTING: &str = concat!(
    "Available Routes:<br/>",
    "Precipitation: /api/v1.0/precipitation<br/>",
    "Stations: /api/v1.0/stations<br/>",
    "Temperature for one year: /api/v1.0/tobs<br/>",
    "Temperature statistics from the start date (enter date as: yyyy-mm-dd): /api/v1.0/start<br/>",
    "Temperature statistics from start to end dates (enter date as: yyyy-mm-dd/yyyy-mm-dd): /api/v1.0/start/end",
);

/// GET / - List available routes
pub async fn landing_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        ROUTE_LISTING,
    )
        .into_response()
}
