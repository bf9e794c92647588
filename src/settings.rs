use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "ru_supplier_link";

/// Default location of the preference store
pub const DEFAULT_STORAGE_PATH: &str = "ru_supplier_preferences.json";

/// Environment variable prefix, e.g. `RU_SUPPLIER_STORAGE_PATH`
pub const ENV_PREFIX: &str = "RU_SUPPLIER";

/// Configuration for the command line front end
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// JSON file holding the saved preferences
    pub storage_path: PathBuf,

    /// Directory for log files; logs go to stderr when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads defaults, then `ru_supplier_link.{toml,json,...}` if present,
    /// then an explicit file, then `RU_SUPPLIER_*` variables
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("storage_path", DEFAULT_STORAGE_PATH)?
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
