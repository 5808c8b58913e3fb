//! Station and measurement records.
//!
//! `Measurement` and `Station` mirror the rows of the externally owned
//! database. The remaining types are the flat records each route emits;
//! their serialized field names are part of the HTTP contract.

use serde::{Deserialize, Serialize};

/// One weather reading at one station on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Station identifier (e.g. "USC00519281").
    pub station: String,
    /// Observation date as `YYYY-MM-DD`.
    pub date: String,
    /// Precipitation amount; `None` when not recorded.
    pub prcp: Option<f64>,
    /// Temperature observation; `None` when not recorded.
    pub tobs: Option<f64>,
}

impl Measurement {
    pub fn new(
        station: impl Into<String>,
        date: impl Into<String>,
        prcp: Option<f64>,
        tobs: Option<f64>,
    ) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp,
            tobs,
        }
    }
}

/// A physical weather-recording site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl Station {
    pub fn new(station: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            name: name.into(),
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }

    /// Attach location metadata.
    pub fn with_location(mut self, latitude: f64, longitude: f64, elevation: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.elevation = Some(elevation);
        self
    }
}

/// Entry of the precipitation route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Precipitation")]
    pub precipitation: Option<f64>,
}

/// Entry of the stations route: a station and how many measurement rows it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivity {
    pub station: String,
    /// `None` when the measurement station has no row in the station table.
    pub name: Option<String>,
    pub count: i64,
}

/// Entry of the temperature-year route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: Option<f64>,
}

/// Aggregate temperature summary. All fields are `None` over an empty match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    /// True when no row matched the filter.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precipitation_field_names() {
        let record = PrecipitationRecord {
            date: "2017-08-23".to_string(),
            precipitation: Some(0.45),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Date"], "2017-08-23");
        assert_eq!(json["Precipitation"], 0.45);
        assert!(json.get("date").is_none());
    }

    #[test]
    fn test_null_precipitation_passes_through() {
        let record = PrecipitationRecord {
            date: "2017-08-23".to_string(),
            precipitation: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Date":"2017-08-23","Precipitation":null}"#);
    }

    #[test]
    fn test_empty_stats_serialize_as_nulls() {
        let stats = TemperatureStats::default();
        assert!(stats.is_empty());
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"min":null,"avg":null,"max":null}"#);
    }

    #[test]
    fn test_station_builder() {
        let station = Station::new("USC00519397", "WAIKIKI 717.2, HI US")
            .with_location(21.2716, -157.8168, 3.0);
        assert_eq!(station.latitude, Some(21.2716));
        assert_eq!(station.elevation, Some(3.0));
    }
}
