//! Schema reflection for the station database.
//!
//! The database is owned elsewhere; this module only discovers what it
//! contains and checks that the columns the queries rely on are present.

use std::collections::BTreeMap;

use sqlx::SqliteConnection;
use tracing::warn;

use climate_common::{ClimateError, ClimateResult};

pub const MEASUREMENT_TABLE: &str = "measurement";
pub const STATION_TABLE: &str = "station";

/// Columns read by the measurement queries.
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];

/// Columns read by the station join.
pub const STATION_COLUMNS: &[&str] = &["station", "name"];

/// Reflected structure of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    /// Column names and declared types, in declaration order.
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
}

impl TableSchema {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(column))
    }

    /// Columns as `name type` pairs, in declaration order.
    pub fn describe_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.declared_type))
            .collect()
    }
}

/// Immutable map from table name to reflected schema, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    tables: BTreeMap<String, TableSchema>,
}

impl SchemaCatalog {
    /// Introspect every user table in the database.
    pub async fn reflect(conn: &mut SqliteConnection) -> ClimateResult<Self> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| ClimateError::Database(format!("Schema reflection failed: {}", e)))?;

        let mut tables = BTreeMap::new();
        for name in names {
            let columns = sqlx::query_as::<_, (String, String)>(
                "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid",
            )
            .bind(&name)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                ClimateError::Database(format!("Failed to read columns of {}: {}", name, e))
            })?
            .into_iter()
            .map(|(name, declared_type)| ColumnInfo {
                name,
                declared_type,
            })
            .collect::<Vec<_>>();

            tables.insert(name.clone(), TableSchema { name, columns });
        }

        Ok(Self { tables })
    }

    /// Build a catalog from already known tables.
    pub fn from_tables(tables: impl IntoIterator<Item = TableSchema>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Fail unless `table` exists with every column in `columns`.
    pub fn require(&self, table: &str, columns: &[&str]) -> ClimateResult<&TableSchema> {
        let schema = self
            .table(table)
            .ok_or_else(|| ClimateError::MissingTable(table.to_string()))?;

        if let Some(missing) = columns.iter().find(|c| !schema.has_column(c)) {
            return Err(ClimateError::MissingColumn {
                table: table.to_string(),
                column: missing.to_string(),
            });
        }

        Ok(schema)
    }

    /// Check both tables the service is built on.
    pub fn validate(&self) -> ClimateResult<()> {
        self.require(MEASUREMENT_TABLE, MEASUREMENT_COLUMNS)?;
        self.require(STATION_TABLE, STATION_COLUMNS)?;

        let extra: Vec<&str> = self
            .table_names()
            .filter(|n| *n != MEASUREMENT_TABLE && *n != STATION_TABLE)
            .collect();
        if !extra.is_empty() {
            warn!(tables = ?extra, "Database contains tables the service does not read");
        }

        Ok(())
    }
}
