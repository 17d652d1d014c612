//! Error catalog and per-request error registry for web services.
//!
//! This crate provides:
//! - loading of the error catalog (`errors.json` / `errors.dist.json`)
//! - a per-request [`ErrorRegistry`] that renders catalog messages
//! - the `suppress_response_codes` decision ([`ResponseCodePolicy`])
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use websvc_errors::{CatalogConfig, CatalogLoader, ErrorRegistry, ProcessEnv, QueryParams, SharedCatalog};
//!
//! let config = CatalogConfig::from_environment(&ProcessEnv, "/srv/websvc/config");
//! let catalog = SharedCatalog::new(CatalogLoader::new(config));
//!
//! // per request
//! let mut errors = ErrorRegistry::new(catalog.get()?);
//! errors.add_error("301", &["limit", "1..100"]);
//! errors.check_suppress_response_codes(&QueryParams::from_uri(&uri)?);
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod config;
pub mod env;
pub mod error;
pub mod loader;
pub mod paths;
pub mod registry;
pub mod render;
pub mod response;
pub mod suppress;

pub use catalog::{Catalog, ErrorDefinition};
pub use config::{CONFIG_DIR_ENV, CatalogConfig, DIST_CATALOG_FILE, LIVE_CATALOG_FILE};
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::ConfigurationError;
pub use loader::{CatalogLoader, SharedCatalog};
pub use registry::{DEFAULT_RESPONSE_CODE, ErrorRecord, ErrorRegistry};
pub use render::{DEFAULT_PLACEHOLDER_POLICY, MessageRenderer, PlaceholderPolicy, render};
pub use response::ErrorResponse;
pub use suppress::{
    INVALID_SUPPRESSION_FLAG_CODE, ParamSource, QueryParams, ResponseCodePolicy, SUPPRESS_PARAM,
    SuppressFlag,
};
