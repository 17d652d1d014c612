//! Catalog location configuration.
//!
//! The catalog directory is chosen as follows:
//! 1. `override_dir`, normally taken from [`CONFIG_DIR_ENV`];
//! 2. otherwise `base_config_dir`, the directory shipped with the service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::Environment;

/// Environment variable that relocates the whole configuration directory.
pub const CONFIG_DIR_ENV: &str = "WEBSERVICE_CONFIG";

/// Operator-maintained catalog, preferred when present.
pub const LIVE_CATALOG_FILE: &str = "errors.json";

/// Catalog shipped with the distribution.
pub const DIST_CATALOG_FILE: &str = "errors.dist.json";

/// Where to look for the error catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Explicit configuration directory; wins over `base_config_dir`.
    #[serde(default)]
    pub override_dir: Option<PathBuf>,
    /// Default configuration directory of the deployment.
    pub base_config_dir: PathBuf,
}

impl CatalogConfig {
    #[must_use]
    pub fn new(base_config_dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: None,
            base_config_dir: base_config_dir.into(),
        }
    }

    #[must_use]
    pub fn with_override_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.override_dir = Some(dir.into());
        self
    }

    /// Build a config whose override directory comes from [`CONFIG_DIR_ENV`].
    ///
    /// An empty variable is treated as unset.
    #[must_use]
    pub fn from_environment(env: &dyn Environment, base_config_dir: impl Into<PathBuf>) -> Self {
        let override_dir = env
            .var(CONFIG_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self {
            override_dir,
            base_config_dir: base_config_dir.into(),
        }
    }

    /// The directory the catalog is read from, before normalization.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        self.override_dir
            .as_deref()
            .unwrap_or(self.base_config_dir.as_path())
    }
}
