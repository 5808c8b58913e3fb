//! Temporary SQLite databases for tests.
//!
//! Each `TestDatabase` lives in its own temp directory, removed on drop.
//! The services open it read-only, exactly like the production file.

use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use tempfile::TempDir;

use climate_common::{Measurement, Station};

use crate::fixtures::{MEASUREMENT_DDL, STATION_DDL};

/// Rows to load into a test database.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub measurements: Vec<Measurement>,
}

impl Dataset {
    pub fn with_station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    pub fn with_measurements(mut self, rows: impl IntoIterator<Item = Measurement>) -> Self {
        self.measurements.extend(rows);
        self
    }
}

/// A database file in a temporary directory.
pub struct TestDatabase {
    _dir: TempDir,
    path: PathBuf,
}

impl TestDatabase {
    /// Create the standard two tables and load `dataset` into them.
    pub async fn build(dataset: &Dataset) -> Result<Self, sqlx::Error> {
        let db = Self::build_with_ddl(&[MEASUREMENT_DDL, STATION_DDL]).await?;

        let mut conn = db.open_writable().await?;
        let mut tx = conn.begin().await?;

        for station in &dataset.stations {
            sqlx::query(
                "INSERT INTO station (station, name, latitude, longitude, elevation) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&station.station)
            .bind(&station.name)
            .bind(station.latitude)
            .bind(station.longitude)
            .bind(station.elevation)
            .execute(&mut *tx)
            .await?;
        }

        for m in &dataset.measurements {
            sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
                .bind(&m.station)
                .bind(&m.date)
                .bind(m.prcp)
                .bind(m.tobs)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        conn.close().await?;

        Ok(db)
    }

    /// Create a database by running arbitrary DDL, for malformed-schema tests.
    pub async fn build_with_ddl(statements: &[&str]) -> Result<Self, sqlx::Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("stations.sqlite");
        let db = Self { _dir: dir, path };

        let options = SqliteConnectOptions::new()
            .filename(&db.path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await?;
        for statement in statements {
            sqlx::query(statement).execute(&mut conn).await?;
        }
        conn.close().await?;

        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `sqlite://` url for this database.
    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }

    async fn open_writable(&self) -> Result<SqliteConnection, sqlx::Error> {
        let options = SqliteConnectOptions::new().filename(&self.path);
        SqliteConnection::connect_with(&options).await
    }
}
