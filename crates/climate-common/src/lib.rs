//! Common types and utilities shared across the station climate services.

pub mod error;
pub mod records;
pub mod time;

pub use error::{ClimateError, ClimateResult};
pub use records::{
    Measurement, PrecipitationRecord, Station, StationActivity, TemperatureObservation,
    TemperatureStats,
};
pub use time::{DateWindow, DATE_FORMAT};
