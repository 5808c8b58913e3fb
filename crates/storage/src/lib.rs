//! Storage abstractions for the station climate services.
//!
//! Provides:
//! - A read-only SQLite pool over the existing station database
//! - Schema reflection that validates the `measurement` and `station` tables
//! - One bounded query per served route

pub mod catalog;
pub mod queries;
pub mod store;

pub use catalog::{SchemaCatalog, TableSchema, MEASUREMENT_TABLE, STATION_TABLE};
pub use store::{ClimateStore, StoreConfig, DEFAULT_DATABASE_URL};
