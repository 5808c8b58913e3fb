//! Station climate queries, one per served route.
//!
//! Every public method checks out its own connection, runs its statements on
//! it and releases it before returning. Date arguments from callers are bound
//! as text without validation: a malformed date simply matches nothing.

use chrono::NaiveDate;
use sqlx::SqliteConnection;
use tracing::debug;

use climate_common::time::parse_stored_date;
use climate_common::{
    ClimateError, ClimateResult, DateWindow, PrecipitationRecord, StationActivity,
    TemperatureObservation, TemperatureStats,
};

use crate::store::ClimateStore;

fn query_failed(e: sqlx::Error) -> ClimateError {
    ClimateError::Database(format!("Query failed: {}", e))
}

impl ClimateStore {
    /// Most recent observation date in the dataset, `None` when it is empty.
    pub async fn latest_date(&self) -> ClimateResult<Option<NaiveDate>> {
        let mut conn = self.acquire().await?;
        latest_date_on(&mut conn).await
    }

    /// Date and precipitation for the year ending at the dataset's latest date.
    pub async fn precipitation_last_year(&self) -> ClimateResult<Vec<PrecipitationRecord>> {
        let mut conn = self.acquire().await?;

        let Some(latest) = latest_date_on(&mut conn).await? else {
            return Ok(Vec::new());
        };
        let (start, end) = DateWindow::trailing_year(latest).bounds();

        let rows = sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT date, CAST(prcp AS REAL) FROM measurement \
             WHERE date > ?1 AND date <= ?2",
        )
        .bind(&start)
        .bind(&end)
        .fetch_all(&mut *conn)
        .await
        .map_err(query_failed)?;

        debug!(start = %start, end = %end, rows = rows.len(), "Precipitation window");

        Ok(rows
            .into_iter()
            .map(|(date, precipitation)| PrecipitationRecord {
                date,
                precipitation,
            })
            .collect())
    }

    /// Measurement row count per station with its name, most active first.
    pub async fn station_activity(&self) -> ClimateResult<Vec<StationActivity>> {
        let mut conn = self.acquire().await?;

        let rows = sqlx::query_as::<_, (String, Option<String>, i64)>(
            "SELECT m.station, s.name, COUNT(*) AS count \
             FROM measurement AS m \
             LEFT JOIN station AS s ON s.station = m.station \
             WHERE m.station IS NOT NULL \
             GROUP BY m.station \
             ORDER BY count DESC, m.station ASC",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(query_failed)?;

        debug!(stations = rows.len(), "Station activity");

        Ok(rows
            .into_iter()
            .map(|(station, name, count)| StationActivity {
                station,
                name,
                count,
            })
            .collect())
    }

    /// Station with the most measurement rows. Recomputed on every call.
    pub async fn most_active_station(&self) -> ClimateResult<Option<String>> {
        let mut conn = self.acquire().await?;
        most_active_station_on(&mut conn).await
    }

    /// Temperature observations of the most active station over the trailing
    /// year of the dataset, newest first.
    pub async fn temperature_last_year(&self) -> ClimateResult<Vec<TemperatureObservation>> {
        let mut conn = self.acquire().await?;

        let Some(station) = most_active_station_on(&mut conn).await? else {
            return Ok(Vec::new());
        };
        let Some(latest) = latest_date_on(&mut conn).await? else {
            return Ok(Vec::new());
        };
        let (start, end) = DateWindow::trailing_year(latest).bounds();

        let rows = sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT date, CAST(tobs AS REAL) FROM measurement \
             WHERE station = ?1 AND date > ?2 AND date <= ?3 \
             ORDER BY date DESC",
        )
        .bind(&station)
        .bind(&start)
        .bind(&end)
        .fetch_all(&mut *conn)
        .await
        .map_err(query_failed)?;

        debug!(station = %station, rows = rows.len(), "Temperature window");

        Ok(rows
            .into_iter()
            .map(|(date, tobs)| TemperatureObservation { date, tobs })
            .collect())
    }

    /// Min, average and max temperature for dates on or after `start`.
    pub async fn temperature_stats_from(&self, start: &str) -> ClimateResult<TemperatureStats> {
        let mut conn = self.acquire().await?;

        let (min, avg, max) = sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(
            "SELECT CAST(MIN(tobs) AS REAL), CAST(AVG(tobs) AS REAL), CAST(MAX(tobs) AS REAL) \
             FROM measurement WHERE date >= ?1",
        )
        .bind(start)
        .fetch_one(&mut *conn)
        .await
        .map_err(query_failed)?;

        debug!(start, "Temperature stats from start");

        Ok(TemperatureStats { min, avg, max })
    }

    /// Min, average and max temperature for `start <= date <= end`.
    ///
    /// `start > end` matches nothing and yields all-null stats.
    pub async fn temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> ClimateResult<TemperatureStats> {
        let mut conn = self.acquire().await?;

        let (min, avg, max) = sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(
            "SELECT CAST(MIN(tobs) AS REAL), CAST(AVG(tobs) AS REAL), CAST(MAX(tobs) AS REAL) \
             FROM measurement WHERE date >= ?1 AND date <= ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut *conn)
        .await
        .map_err(query_failed)?;

        debug!(start, end, "Temperature stats for range");

        Ok(TemperatureStats { min, avg, max })
    }
}

async fn latest_date_on(conn: &mut SqliteConnection) -> ClimateResult<Option<NaiveDate>> {
    let latest = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await
        .map_err(query_failed)?;

    latest.as_deref().map(parse_stored_date).transpose()
}

async fn most_active_station_on(conn: &mut SqliteConnection) -> ClimateResult<Option<String>> {
    sqlx::query_scalar::<_, String>(
        "SELECT station FROM measurement \
         WHERE station IS NOT NULL \
         GROUP BY station \
         ORDER BY COUNT(*) DESC, station ASC \
         LIMIT 1",
    )
    .fetch_optional(&mut *conn)
    .await
    .map_err(query_failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use climate_common::Measurement;
    use test_utils::{fixtures, Dataset, TestDatabase};

    async fn open(dataset: &Dataset) -> (TestDatabase, ClimateStore) {
        let db = TestDatabase::build(dataset).await.unwrap();
        let store = ClimateStore::connect(&StoreConfig::new(db.url()))
            .await
            .unwrap();
        (db, store)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_latest_date() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        assert_eq!(
            store.latest_date().await.unwrap(),
            Some(date(fixtures::HAWAII_LATEST_DATE))
        );
    }

    #[tokio::test]
    async fn test_empty_dataset_yields_empty_sequences() {
        let (_db, store) = open(&Dataset::default()).await;

        assert_eq!(store.latest_date().await.unwrap(), None);
        assert!(store.precipitation_last_year().await.unwrap().is_empty());
        assert!(store.station_activity().await.unwrap().is_empty());
        assert!(store.temperature_last_year().await.unwrap().is_empty());
        assert!(store.temperature_stats_from("2010-01-01").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_precipitation_window_bounds() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        let latest = date(fixtures::HAWAII_LATEST_DATE);
        let window = DateWindow::trailing_year(latest);

        let records = store.precipitation_last_year().await.unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| window.contains(&r.date)));

        // The boundary rows: exactly 365 days back is excluded, the day after is kept.
        assert!(!records.iter().any(|r| r.date == "2016-08-23"));
        assert!(records.iter().any(|r| r.date == "2016-08-24"));
        assert!(records.iter().any(|r| r.date == fixtures::HAWAII_LATEST_DATE));
    }

    #[tokio::test]
    async fn test_precipitation_keeps_nulls() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        let records = store.precipitation_last_year().await.unwrap();
        assert!(records.iter().any(|r| r.precipitation.is_none()));
        assert!(records.iter().any(|r| r.precipitation == Some(0.0)));
    }

    #[tokio::test]
    async fn test_window_is_relative_to_dataset_not_clock() {
        let dataset = Dataset::default()
            .with_station(climate_common::Station::new("OLD1", "OLD STATION"))
            .with_measurements([
                Measurement::new("OLD1", "1999-12-31", Some(1.0), Some(70.0)),
                Measurement::new("OLD1", "1999-01-01", Some(2.0), Some(71.0)),
                Measurement::new("OLD1", "1998-12-31", Some(3.0), Some(72.0)),
            ]);
        let (_db, store) = open(&dataset).await;

        let dates: Vec<String> = store
            .precipitation_last_year()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, vec!["1999-12-31", "1999-01-01"]);
    }

    #[tokio::test]
    async fn test_station_activity_order_and_counts() {
        let (_db, store) = open(&fixtures::two_station_dataset()).await;
        let activity = store.station_activity().await.unwrap();

        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].station, "USC1");
        assert_eq!(activity[0].name.as_deref(), Some("STATION ONE, HI US"));
        assert_eq!(activity[0].count, 5);
        assert_eq!(activity[1].station, "USC2");
        assert_eq!(activity[1].count, 3);
    }

    #[tokio::test]
    async fn test_station_activity_is_deterministic() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        let first = store.station_activity().await.unwrap();
        let second = store.station_activity().await.unwrap();
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[tokio::test]
    async fn test_station_without_metadata_has_null_name() {
        let dataset = fixtures::two_station_dataset()
            .with_measurements([Measurement::new("ORPHAN", "2017-01-01", None, Some(65.0))]);
        let (_db, store) = open(&dataset).await;

        let activity = store.station_activity().await.unwrap();
        let orphan = activity.iter().find(|a| a.station == "ORPHAN").unwrap();
        assert_eq!(orphan.name, None);
        assert_eq!(orphan.count, 1);
    }

    #[tokio::test]
    async fn test_count_ties_break_by_station_id() {
        let dataset = Dataset::default().with_measurements([
            Measurement::new("B", "2017-01-01", None, Some(60.0)),
            Measurement::new("A", "2017-01-01", None, Some(61.0)),
        ]);
        let (_db, store) = open(&dataset).await;

        let activity = store.station_activity().await.unwrap();
        assert_eq!(activity[0].station, "A");
        assert_eq!(store.most_active_station().await.unwrap().as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_most_active_matches_activity_ranking() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        let activity = store.station_activity().await.unwrap();
        let top = store.most_active_station().await.unwrap();
        assert_eq!(top.as_deref(), Some(activity[0].station.as_str()));
        assert_eq!(top.as_deref(), Some(fixtures::HAWAII_MOST_ACTIVE));
    }

    #[tokio::test]
    async fn test_temperature_last_year_for_most_active_station() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        let window = DateWindow::trailing_year(date(fixtures::HAWAII_LATEST_DATE));

        let observations = store.temperature_last_year().await.unwrap();
        assert!(!observations.is_empty());
        assert!(observations.iter().all(|o| window.contains(&o.date)));
        assert!(observations.windows(2).all(|w| w[0].date >= w[1].date));

        let expected = fixtures::hawaii_sample()
            .measurements
            .iter()
            .filter(|m| m.station == fixtures::HAWAII_MOST_ACTIVE && window.contains(&m.date))
            .count();
        assert_eq!(observations.len(), expected);
    }

    #[tokio::test]
    async fn test_stats_between_worked_example() {
        let (_db, store) = open(&fixtures::stats_example()).await;
        let stats = store
            .temperature_stats_between("2017-01-01", "2017-01-02")
            .await
            .unwrap();
        assert_eq!(stats.min, Some(60.0));
        assert_eq!(stats.avg, Some(61.0));
        assert_eq!(stats.max, Some(62.0));
    }

    #[tokio::test]
    async fn test_stats_between_inverted_range_is_null() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        let stats = store
            .temperature_stats_between("2017-06-01", "2017-01-01")
            .await
            .unwrap();
        assert!(stats.is_empty());
    }

    #[tokio::test]
    async fn test_stats_between_ordering_holds() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        let stats = store
            .temperature_stats_between("2016-01-01", "2017-12-31")
            .await
            .unwrap();
        let (min, avg, max) = (stats.min.unwrap(), stats.avg.unwrap(), stats.max.unwrap());
        assert!(min <= avg && avg <= max);
    }

    #[tokio::test]
    async fn test_stats_from_earliest_date_covers_everything() {
        let dataset = fixtures::hawaii_sample();
        let (_db, store) = open(&dataset).await;

        let earliest = dataset.measurements.iter().map(|m| m.date.as_str()).min().unwrap();
        let from_start = store.temperature_stats_from(earliest).await.unwrap();
        let everything = store
            .temperature_stats_between("0000-00-00", "9999-99-99")
            .await
            .unwrap();
        assert_eq!(from_start, everything);

        let temps: Vec<f64> = dataset.measurements.iter().filter_map(|m| m.tobs).collect();
        let min = temps.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(from_start.min, Some(min));
        assert_eq!(from_start.max, Some(max));
    }

    #[tokio::test]
    async fn test_malformed_start_is_not_an_error() {
        let (_db, store) = open(&fixtures::hawaii_sample()).await;
        // "zzzz" sorts after every stored date, so nothing matches.
        let stats = store.temperature_stats_from("zzzz").await.unwrap();
        assert!(stats.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_stored_date_is_server_error() {
        let dataset = Dataset::default()
            .with_measurements([Measurement::new("BAD", "last tuesday", None, Some(60.0))]);
        let (_db, store) = open(&dataset).await;

        let err = store.precipitation_last_year().await.unwrap_err();
        assert!(matches!(err, ClimateError::InvalidStoredDate(_)));
        assert_eq!(err.http_status_code(), 500);
    }
}
