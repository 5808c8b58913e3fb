//! Service configuration loading and types.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use storage::StoreConfig;

/// Default listen address, matching the development server the API replaced.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

/// Full service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    /// Station database settings.
    #[serde(default)]
    pub database: StoreConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:5000`.
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

/// Values given on the command line or through the environment.
///
/// Anything set here wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub listen: Option<String>,
    pub max_connections: Option<u32>,
}

impl ServiceConfig {
    /// Load from a YAML file, or start from defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        tracing::info!(path = ?path, "Loaded service configuration");
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.database_url {
            self.database.url = url;
        }
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        }
        if let Some(max) = overrides.max_connections {
            self.database.max_connections = max;
        }
        self
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            bail!("database url must not be empty");
        }
        if self.database.max_connections == 0 {
            bail!("database max_connections must be at least 1");
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server
            .listen
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.server.listen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.database.url, storage::DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.listen, DEFAULT_LISTEN_ADDR);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_parsing_with_partial_sections() {
        let yaml = r#"
database:
  url: sqlite:///srv/data/hawaii.sqlite
"#;
        let config: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database.url, "sqlite:///srv/data/hawaii.sqlite");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.listen, DEFAULT_LISTEN_ADDR);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database:\n  url: sqlite://from-file.sqlite\n  max_connections: 2\nserver:\n  listen: 0.0.0.0:8080"
        )
        .unwrap();

        let config = ServiceConfig::load(Some(file.path()))
            .unwrap()
            .with_overrides(ConfigOverrides {
                database_url: Some("sqlite://from-env.sqlite".to_string()),
                listen: None,
                max_connections: Some(8),
            });

        assert_eq!(config.database.url, "sqlite://from-env.sqlite");
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.server.listen, "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ServiceConfig::load(Some(Path::new("/nonexistent/climate-api.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_listen = ServiceConfig::default().with_overrides(ConfigOverrides {
            listen: Some("localhost".to_string()),
            ..Default::default()
        });
        assert!(bad_listen.validate().is_err());

        let empty_url = ServiceConfig::default().with_overrides(ConfigOverrides {
            database_url: Some("  ".to_string()),
            ..Default::default()
        });
        assert!(empty_url.validate().is_err());

        let no_connections = ServiceConfig::default().with_overrides(ConfigOverrides {
            max_connections: Some(0),
            ..Default::default()
        });
        assert!(no_connections.validate().is_err());
    }
}
