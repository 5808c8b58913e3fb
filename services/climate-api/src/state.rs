//! Application state for the climate API.

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;

use storage::ClimateStore;

use crate::config::ServiceConfig;

/// Shared application state.
///
/// Built once at startup and never mutated afterwards; each request only
/// borrows the store to check out its own connection.
pub struct AppState {
    /// Station database handle.
    pub store: ClimateStore,

    /// Prometheus exporter handle, if a recorder was installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Connect to the configured database and validate its schema.
    pub async fn new(config: &ServiceConfig, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        let store = match ClimateStore::connect(&config.database).await {
            Ok(store) => store,
            Err(e) if e.is_fatal() => {
                return Err(anyhow::Error::new(e).context(format!(
                    "Station database {} cannot be served",
                    config.database.url
                )));
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!(
                    "Failed to open station database {}",
                    config.database.url
                )));
            }
        };

        Ok(Self { store, prometheus })
    }

    /// Wrap an already opened store.
    pub fn with_store(store: ClimateStore) -> Self {
        Self {
            store,
            prometheus: None,
        }
    }
}
