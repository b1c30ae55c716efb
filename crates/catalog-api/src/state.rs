//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the product store and configuration.

use catalog_core::{CatalogError, CatalogResult, ProductStore, SeedCatalog};
use std::path::PathBuf;
use std::sync::Arc;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Optional TOML file with starting products
    pub seed_path: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> CatalogResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup.
    ///
    /// Recognized keys: `HOST`, `PORT`, `ENVIRONMENT`, `CATALOG_SEED`, `LOG_FORMAT`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CatalogResult<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                CatalogError::Configuration(format!("PORT must be a port number, got {:?}", raw))
            })?,
            None => 8080,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") | Some("") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(CatalogError::Configuration(format!(
                    "LOG_FORMAT must be \"pretty\" or \"json\", got {:?}",
                    other
                )))
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            seed_path: lookup("CATALOG_SEED")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            log_format,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> CatalogResult<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                CatalogError::Configuration(format!(
                    "invalid socket address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            seed_path: None,
            log_format: LogFormat::Pretty,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Product store
    pub catalog: Arc<ProductStore>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state for `config`, loading its seed catalog if set
    pub fn from_config(config: AppConfig) -> CatalogResult<Self> {
        let catalog = load_product_catalog(&config)?;
        Ok(Self::with_store(config, catalog))
    }

    /// Wrap an existing store
    pub fn with_store(config: AppConfig, catalog: ProductStore) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config,
        }
    }
}

/// Build the store, seeding it from `config.seed_path` when set
fn load_product_catalog(config: &AppConfig) -> CatalogResult<ProductStore> {
    let Some(path) = &config.seed_path else {
        tracing::info!("No seed catalog configured, starting empty");
        return Ok(ProductStore::new());
    };

    let drafts = SeedCatalog::load(path)?.into_drafts()?;
    let store = ProductStore::with_products(drafts);
    tracing::info!("Loaded {} products from {}", store.len(), path.display());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "development");
        assert!(config.seed_path.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.is_production());
    }

    #[test]
    fn test_app_config_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("ENVIRONMENT", "production"),
            ("CATALOG_SEED", "config/products.example.toml"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert!(config.is_production());
        assert_eq!(
            config.seed_path,
            Some(PathBuf::from("config/products.example.toml"))
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bad_values_are_configuration_errors() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, CatalogError::Configuration(_)));

        let err = AppConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, CatalogError::Configuration(_)));
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");

        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_state_without_seed_is_empty() {
        let state = AppState::from_config(AppConfig::default()).unwrap();
        assert!(state.catalog.is_empty());
    }

    #[test]
    fn test_state_loads_example_seed() {
        let config = AppConfig {
            seed_path: Some(
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/products.example.toml"),
            ),
            ..AppConfig::default()
        };

        let state = AppState::from_config(config).unwrap();
        let names: Vec<String> = state.catalog.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Widget", "Gadget"]);
    }

    #[test]
    fn test_state_with_missing_seed_fails() {
        let config = AppConfig {
            seed_path: Some(PathBuf::from("does/not/exist.toml")),
            ..AppConfig::default()
        };
        assert!(AppState::from_config(config).is_err());
    }
}
