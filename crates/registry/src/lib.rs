//! Operation catalog and user configuration for the dashboard.
//!
//! The catalog is data: the embedded `catalog/hashrateindex.yaml` lists every
//! operation, its parameter axes and its resolver. It is validated once at
//! load time and never mutated afterwards.

pub mod catalog;
pub mod config;

pub use catalog::{CatalogError, ParameterCatalog};
pub use config::{CATALOG_PATH_ENV, CONFIG_PATH_ENV, ConfigError, DashboardConfig, default_config_path};
