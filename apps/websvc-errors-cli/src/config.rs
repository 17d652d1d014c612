//! Layered CLI configuration: defaults -> YAML file -> `WEBSVC_*` env.

use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix of environment variables overriding CLI configuration.
pub const ENV_PREFIX: &str = "WEBSVC_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding `errors.json` / `errors.dist.json`.
    /// `WEBSERVICE_CONFIG` still overrides it at load time.
    pub base_config_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_config_dir: PathBuf::from("config"),
            log_level: "warn".to_owned(),
        }
    }
}

impl CliConfig {
    /// Merge defaults, the optional YAML file and `WEBSVC_*` variables.
    ///
    /// # Errors
    /// Returns an error if a source holds values of the wrong type.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .context("invalid websvc-errors configuration")
    }
}
