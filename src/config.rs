//! Application configuration management.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory (or `--config PATH`)
//! 3. `FS_SEARCH_*` environment variables (e.g. `FS_SEARCH_CACHE_FILE`)
//! 4. Command-line flags, applied by [`Config::merge_cli`]

use anyhow::Result;
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "FS_SEARCH_";

/// File name of the result cache inside the platform cache directory.
pub const CACHE_FILE_NAME: &str = "search_cache.json";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the result cache. `None` selects the platform default.
    pub cache_file: Option<PathBuf>,

    /// Whether search results are cached.
    pub use_cache: bool,

    /// Extensions always excluded, in addition to any given with `-e`.
    pub exclude: Vec<String>,

    /// Directory names always excluded, in addition to any given with `-E`.
    pub exclude_dirs: Vec<String>,

    /// Report paths relative to the base path.
    pub relative: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_file: None,
            use_cache: true,
            exclude: Vec::new(),
            exclude_dirs: Vec::new(),
            relative: false,
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Any failure falls back to the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from_path(&path),
            Err(e) => {
                log::debug!("No config directory, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration layered over the TOML file at `path`.
    ///
    /// A missing file is not an error. An unreadable or malformed file is
    /// reported and the defaults are used instead.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::figment(path).extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to load config from {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// The layered provider stack for a config file at `path`.
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Apply command-line flags on top of the loaded settings.
    ///
    /// Exclusions from the command line are added to the configured ones.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(ref cache) = cli.cache {
            self.cache_file = Some(cache.clone());
        }
        if cli.no_cache {
            self.use_cache = false;
        }
        self.exclude.extend(cli.exclude.iter().cloned());
        self.exclude_dirs.extend(cli.exclude_dirs.iter().cloned());
        self.relative |= cli.relative;
    }

    /// Path of the result cache file.
    ///
    /// # Errors
    ///
    /// Fails if no cache file is configured and the platform cache directory
    /// cannot be determined.
    pub fn cache_file_path(&self) -> Result<PathBuf> {
        match self.cache_file {
            Some(ref path) => Ok(path.clone()),
            None => Ok(project_dirs()?.cache_dir().join(CACHE_FILE_NAME)),
        }
    }

    /// Default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Fails if the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "fs-search", "fs-search")
        .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))
}
