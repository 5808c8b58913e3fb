//! Read-only SQLite pool over the station database.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tracing::info;

use climate_common::{ClimateError, ClimateResult};

use crate::catalog::SchemaCatalog;

/// Where the station database lives unless configured otherwise.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://Resources/hawaii.sqlite";

/// Connection settings for the station database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// `sqlite://path/to/file.sqlite` or a bare file path.
    #[serde(default = "default_url")]
    pub url: String,

    /// Upper bound on concurrently open connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

impl StoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Connect options for an existing file, opened read-only.
    pub fn connect_options(&self) -> ClimateResult<SqliteConnectOptions> {
        let options = if self.url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(&self.url).map_err(|e| {
                ClimateError::Config(format!("Invalid database url '{}': {}", self.url, e))
            })?
        } else {
            SqliteConnectOptions::new().filename(&self.url)
        };

        Ok(options.read_only(true).create_if_missing(false))
    }
}

/// Handle to the station database.
///
/// Cheap to clone; every clone shares the same pool and the same reflected
/// schema, which never changes after `connect`.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
    schema: Arc<SchemaCatalog>,
}

impl ClimateStore {
    /// Open the database and verify it has the tables the service reads.
    pub async fn connect(config: &StoreConfig) -> ClimateResult<Self> {
        if config.max_connections == 0 {
            return Err(ClimateError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| ClimateError::Database(format!("Connection failed: {}", e)))?;

        let store = Self::from_pool(pool).await?;

        for table in store.schema.tables() {
            info!(
                table = %table.name,
                columns = ?table.describe_columns(),
                "Reflected table"
            );
        }

        info!(
            url = %config.url,
            max_connections = config.max_connections,
            tables = store.schema.table_names().count(),
            "Opened station database"
        );

        Ok(store)
    }

    /// Wrap an existing pool, reflecting and validating its schema.
    pub async fn from_pool(pool: SqlitePool) -> ClimateResult<Self> {
        let schema = {
            let mut conn = acquire_from(&pool).await?;
            SchemaCatalog::reflect(&mut *conn).await?
        };
        schema.validate()?;

        Ok(Self {
            pool,
            schema: Arc::new(schema),
        })
    }

    /// Check out a connection for one request.
    ///
    /// The connection goes back to the pool when the returned guard is
    /// dropped, whether or not the query using it succeeded.
    pub async fn acquire(&self) -> ClimateResult<PoolConnection<Sqlite>> {
        acquire_from(&self.pool).await
    }

    pub fn schema(&self) -> &SchemaCatalog {
        &self.schema
    }

    /// Round-trip a trivial statement to prove the database is reachable.
    pub async fn ping(&self) -> ClimateResult<()> {
        let mut conn = self.acquire().await?;
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| ClimateError::Database(format!("Ping failed: {}", e)))?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn acquire_from(pool: &SqlitePool) -> ClimateResult<PoolConnection<Sqlite>> {
    pool.acquire().await.map_err(|e| match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            ClimateError::ServiceUnavailable(format!("No database connection available: {}", e))
        }
        other => ClimateError::Database(format!("Failed to acquire connection: {}", other)),
    })
}
