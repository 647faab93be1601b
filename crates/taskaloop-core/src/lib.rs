//! Shared domain types and configuration for TaskaLoop price comparison.
//!
//! Holds the store catalog (loaded from YAML or the bundled
//! `config/stores.yaml`), geographic helpers, and environment-driven
//! application configuration.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod stores;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_RADIUS_MILES};
pub use geo::{Coordinates, EARTH_RADIUS_MILES};
pub use stores::{load_catalog, ItemPrice, Store, StoreCatalog, StoreEntry, StoresFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read store catalog at {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse store catalog: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("store catalog validation failed: {0}")]
    Validation(String),
}
