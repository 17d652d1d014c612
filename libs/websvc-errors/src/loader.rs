//! Catalog resolution and loading.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::catalog::Catalog;
use crate::config::{CatalogConfig, DIST_CATALOG_FILE, LIVE_CATALOG_FILE};
use crate::env::{Environment, ProcessEnv};
use crate::error::ConfigurationError;
use crate::paths::normalize_dir;

/// Resolves the catalog file and reads it once per [`CatalogLoader::load`].
pub struct CatalogLoader {
    config: CatalogConfig,
    env: Arc<dyn Environment>,
}

impl CatalogLoader {
    /// Loader that expands `~` using the process environment.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self::with_environment(config, Arc::new(ProcessEnv))
    }

    #[must_use]
    pub fn with_environment(config: CatalogConfig, env: Arc<dyn Environment>) -> Self {
        Self { config, env }
    }

    /// Pick the catalog file: live `errors.json`, else `errors.dist.json`,
    /// inside the override directory if one is set, else the base directory.
    ///
    /// # Errors
    /// Returns `ConfigurationError` if the directory cannot be normalized or
    /// contains neither catalog file.
    pub fn resolve_path(&self) -> Result<PathBuf, ConfigurationError> {
        let dir = normalize_dir(self.config.config_dir(), self.env.as_ref())?;

        // Existence decides; an unreadable live file is reported by `load`.
        let live = dir.join(LIVE_CATALOG_FILE);
        if live.exists() {
            return Ok(live);
        }

        let dist = dir.join(DIST_CATALOG_FILE);
        if dist.exists() {
            return Ok(dist);
        }

        Err(ConfigurationError::CatalogNotFound { dir })
    }

    /// Resolve, read and parse the catalog.
    ///
    /// # Errors
    /// Returns `ConfigurationError` when no catalog file can be found, read,
    /// or parsed.
    pub fn load(&self) -> Result<Catalog, ConfigurationError> {
        let path = self.resolve_path()?;
        tracing::debug!(path = %path.display(), "Loading error catalog");

        let text = std::fs::read_to_string(&path).map_err(|source| {
            ConfigurationError::Unreadable {
                path: path.clone(),
                source,
            }
        })?;

        let catalog = Catalog::from_json_str(&text)
            .map_err(|source| ConfigurationError::Parse { path: path.clone(), source })?;

        tracing::info!(
            path = %path.display(),
            definitions = catalog.len(),
            "Error catalog loaded"
        );
        Ok(catalog)
    }
}

/// Lazily loaded catalog shared by all requests of a process.
///
/// The first successful [`SharedCatalog::get`] reads the file; concurrent
/// first callers wait for that single load. Failures are not cached.
pub struct SharedCatalog {
    loader: Option<CatalogLoader>,
    cell: OnceLock<Arc<Catalog>>,
    init: Mutex<()>,
}

impl SharedCatalog {
    #[must_use]
    pub fn new(loader: CatalogLoader) -> Self {
        Self {
            loader: Some(loader),
            cell: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Catalog that is already loaded, e.g. built in memory. Never touches
    /// the filesystem.
    #[must_use]
    pub fn preloaded(catalog: Catalog) -> Self {
        Self {
            loader: None,
            cell: OnceLock::from(Arc::new(catalog)),
            init: Mutex::new(()),
        }
    }

    /// Return the catalog, loading it on first use.
    ///
    /// # Errors
    /// Propagates the `ConfigurationError` of a failed load.
    pub fn get(&self) -> Result<Arc<Catalog>, ConfigurationError> {
        if let Some(catalog) = self.cell.get() {
            return Ok(Arc::clone(catalog));
        }

        let _guard = self.init.lock();
        if let Some(catalog) = self.cell.get() {
            return Ok(Arc::clone(catalog));
        }

        // Only loader-backed instances can reach this point with an empty cell.
        let catalog = match &self.loader {
            Some(loader) => Arc::new(loader.load()?),
            None => Arc::default(),
        };
        _ = self.cell.set(Arc::clone(&catalog));
        Ok(catalog)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
