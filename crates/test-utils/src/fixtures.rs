//! Common test fixtures for the station climate tests.
//!
//! Table definitions match the production station database; datasets are
//! small enough that every expected answer can be worked out by hand or
//! recomputed from the rows.

use chrono::NaiveDate;

use climate_common::{Measurement, Station};

use crate::database::Dataset;
use crate::generators::daily_measurements;

pub const MEASUREMENT_DDL: &str = "CREATE TABLE measurement (\
    id INTEGER NOT NULL PRIMARY KEY, \
    station TEXT, \
    date TEXT, \
    prcp FLOAT, \
    tobs FLOAT)";

pub const STATION_DDL: &str = "CREATE TABLE station (\
    id INTEGER NOT NULL PRIMARY KEY, \
    station TEXT, \
    name TEXT, \
    latitude FLOAT, \
    longitude FLOAT, \
    elevation FLOAT)";

/// Latest observation date in [`hawaii_sample`].
pub const HAWAII_LATEST_DATE: &str = "2017-08-23";

/// Station with the most rows in [`hawaii_sample`].
pub const HAWAII_MOST_ACTIVE: &str = "USC00519281";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

/// USC1 with five rows, USC2 with three.
pub fn two_station_dataset() -> Dataset {
    Dataset::default()
        .with_station(Station::new("USC1", "STATION ONE, HI US").with_location(21.27, -157.82, 3.0))
        .with_station(Station::new("USC2", "STATION TWO, HI US").with_location(21.42, -157.80, 14.6))
        .with_measurements([
            Measurement::new("USC1", "2017-01-01", Some(0.08), Some(65.0)),
            Measurement::new("USC2", "2017-01-01", Some(0.0), Some(63.0)),
            Measurement::new("USC1", "2017-01-02", None, Some(63.0)),
            Measurement::new("USC1", "2017-01-03", Some(0.0), Some(74.0)),
            Measurement::new("USC2", "2017-01-03", Some(0.35), None),
            Measurement::new("USC1", "2017-01-04", Some(0.0), Some(76.0)),
            Measurement::new("USC2", "2017-01-05", None, Some(73.0)),
            Measurement::new("USC1", "2017-01-05", Some(0.02), Some(73.0)),
        ])
}

/// The two-row dataset whose range stats are `{min: 60, avg: 61, max: 62}`.
pub fn stats_example() -> Dataset {
    Dataset::default()
        .with_station(Station::new("USC1", "STATION ONE, HI US"))
        .with_measurements([
            Measurement::new("USC1", "2017-01-01", Some(0.5), Some(60.0)),
            Measurement::new("USC1", "2017-01-02", None, Some(62.0)),
        ])
}

/// Three stations with overlapping histories ending on [`HAWAII_LATEST_DATE`].
///
/// - USC00519281: daily from 2016-08-01 (most active)
/// - USC00519397: every other day from 2016-01-01
/// - USC00513117: weekly from 2015-06-01 to 2017-07-31, some missing tobs
pub fn hawaii_sample() -> Dataset {
    let latest = date(HAWAII_LATEST_DATE);

    Dataset::default()
        .with_station(
            Station::new("USC00519397", "WAIKIKI 717.2, HI US").with_location(21.2716, -157.8168, 3.0),
        )
        .with_station(
            Station::new("USC00513117", "KANEOHE 838.1, HI US").with_location(21.4234, -157.8015, 14.6),
        )
        .with_station(
            Station::new("USC00519281", "WAIHEE 837.5, HI US").with_location(21.45167, -157.84889, 32.9),
        )
        .with_measurements(daily_measurements(
            "USC00519397",
            date("2016-01-01"),
            latest,
            2,
            75.0,
            None,
        ))
        .with_measurements(daily_measurements(
            "USC00513117",
            date("2015-06-01"),
            date("2017-07-31"),
            7,
            72.0,
            Some(13),
        ))
        .with_measurements(daily_measurements(
            HAWAII_MOST_ACTIVE,
            date("2016-08-01"),
            latest,
            1,
            71.0,
            None,
        ))
}
