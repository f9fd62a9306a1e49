//! Configuration for the catalog.
//!
//! Every setting has a default and can be overridden from the environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CATALOG_API_URL` | `http://localhost:4200` |
//! | `CATALOG_PRODUCTS_PATH` | `api/products` |
//! | `CATALOG_CATEGORIES_PATH` | `api/productCategories` |
//! | `CATALOG_SUPPLIERS_PATH` | `api/suppliers` |
//! | `CATALOG_LOG_LEVEL` | `info` |
//! | `CATALOG_BROADCAST_CAPACITY` | `16` |
//! | `CATALOG_SHUTDOWN_TIMEOUT_SECS` | `30` |
//!
//! # Example
//!
//! ```no_run
//! use product_catalog::config::CatalogConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::from_env()?;
//! println!("Products at {}", config.products_url());
//! # Ok(())
//! # }
//! ```

use catalog_runtime::StoreConfig;
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {var}: {value}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Backend base URL
    pub api_url: String,
    /// Product list path, relative to `api_url`
    pub products_path: String,
    /// Category list path, relative to `api_url`
    pub categories_path: String,
    /// Supplier path prefix, relative to `api_url`
    pub suppliers_path: String,
    /// Default `tracing` level when `RUST_LOG` is unset
    pub log_level: String,
    /// Buffered actions per action observer
    pub broadcast_capacity: usize,
    /// How long shutdown waits for running lookups
    pub shutdown_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4200".to_string(),
            products_path: "api/products".to_string(),
            categories_path: "api/productCategories".to_string(),
            suppliers_path: "api/suppliers".to_string(),
            log_level: "info".to_string(),
            broadcast_capacity: 16,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from `CATALOG_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable cannot be parsed or the result fails
    /// [`validate`](Self::validate).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns error if a variable cannot be parsed or the result fails
    /// [`validate`](Self::validate).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let broadcast_capacity = match lookup("CATALOG_BROADCAST_CAPACITY") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "CATALOG_BROADCAST_CAPACITY",
                value,
            })?,
            None => defaults.broadcast_capacity,
        };

        let shutdown_timeout = match lookup("CATALOG_SHUTDOWN_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    var: "CATALOG_SHUTDOWN_TIMEOUT_SECS",
                    value,
                })?,
            None => defaults.shutdown_timeout,
        };

        let config = Self {
            api_url: lookup("CATALOG_API_URL").unwrap_or(defaults.api_url),
            products_path: lookup("CATALOG_PRODUCTS_PATH").unwrap_or(defaults.products_path),
            categories_path: lookup("CATALOG_CATEGORIES_PATH")
                .unwrap_or(defaults.categories_path),
            suppliers_path: lookup("CATALOG_SUPPLIERS_PATH").unwrap_or(defaults.suppliers_path),
            log_level: lookup("CATALOG_LOG_LEVEL")
                .map_or(defaults.log_level, |level| level.to_lowercase()),
            broadcast_capacity,
            shutdown_timeout,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL, a path
    /// is empty, the log level is unknown, or the broadcast capacity is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api_url).map_err(|e| {
            ConfigError::ValidationError(format!("api_url {:?} is not a URL: {e}", self.api_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "api_url must use http or https, got {}",
                url.scheme()
            )));
        }

        for (name, path) in [
            ("products_path", &self.products_path),
            ("categories_path", &self.categories_path),
            ("suppliers_path", &self.suppliers_path),
        ] {
            if path.trim_matches('/').is_empty() {
                return Err(ConfigError::ValidationError(format!("{name} cannot be empty")));
            }
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of {LOG_LEVELS:?}, got {}",
                self.log_level
            )));
        }

        if self.broadcast_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "broadcast_capacity must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Full product list URL
    #[must_use]
    pub fn products_url(&self) -> String {
        self.join(&self.products_path)
    }

    /// Full category list URL
    #[must_use]
    pub fn categories_url(&self) -> String {
        self.join(&self.categories_path)
    }

    /// Supplier URL prefix; a supplier lives at `{prefix}/{id}`
    #[must_use]
    pub fn suppliers_url(&self) -> String {
        self.join(&self.suppliers_path)
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_broadcast_capacity(self.broadcast_capacity)
            .with_shutdown_timeout(self.shutdown_timeout)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_matches('/')
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = CatalogConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.products_url(), "http://localhost:4200/api/products");
        assert_eq!(
            config.categories_url(),
            "http://localhost:4200/api/productCategories"
        );
        assert_eq!(config.suppliers_url(), "http://localhost:4200/api/suppliers");
    }

    #[test]
    fn variables_override_defaults() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("CATALOG_API_URL", "https://shop.example.com/"),
            ("CATALOG_PRODUCTS_PATH", "/v2/products/"),
            ("CATALOG_LOG_LEVEL", "DEBUG"),
            ("CATALOG_BROADCAST_CAPACITY", "64"),
            ("CATALOG_SHUTDOWN_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.products_url(), "https://shop.example.com/v2/products");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.store_config().broadcast_capacity, 64);
        assert_eq!(
            config.store_config().default_shutdown_timeout,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn unparsable_capacity_is_rejected() {
        let error =
            CatalogConfig::from_lookup(lookup(&[("CATALOG_BROADCAST_CAPACITY", "lots")])).unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidValue {
                var: "CATALOG_BROADCAST_CAPACITY",
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn unparsable_shutdown_timeout_is_rejected() {
        let error = CatalogConfig::from_lookup(lookup(&[("CATALOG_SHUTDOWN_TIMEOUT_SECS", "-1")]))
            .unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidValue {
                var: "CATALOG_SHUTDOWN_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn validation_failures() {
        let cases = [
            ("CATALOG_API_URL", "not a url"),
            ("CATALOG_API_URL", "ftp://files.example.com"),
            ("CATALOG_SUPPLIERS_PATH", "/"),
            ("CATALOG_LOG_LEVEL", "loud"),
            ("CATALOG_BROADCAST_CAPACITY", "0"),
        ];

        for (var, value) in cases {
            let result = CatalogConfig::from_lookup(lookup(&[(var, value)]));
            assert!(
                matches!(result, Err(ConfigError::ValidationError(_))),
                "{var}={value} should fail validation, got {result:?}"
            );
        }
    }
}
