//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/doxyindex/config.toml` (XDG) or platform config dir
//! 2. Project config: `.doxyindex.toml`
//! 3. Environment variables: `DOXYINDEX_*`, nested with `__`
//!    (e.g. `DOXYINDEX_INDEX__INCLUDE_PARENT_SCOPES=true`)
//!
//! Every key is optional; an empty configuration reproduces the plain
//! command-line defaults.
//!
//! ```toml
//! [index]
//! include_function_signatures = true
//! include_parent_scopes = true
//! update_info_plist = false
//! fresh = true
//! ```
//!
//! Command-line switches are applied on top: they can enable naming options
//! and `--fresh`, or suppress the Info.plist edit, but never undo a setting
//! made here in the other direction.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::models::ClassifierOptions;

/// File name of the per-project config.
pub const PROJECT_CONFIG_FILE: &str = ".doxyindex.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DOXYINDEX_";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&*self.0)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
}

/// Defaults for the `index` and `dump` commands.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Append parameter lists and return types to callable names.
    #[serde(default)]
    pub include_function_signatures: bool,
    /// Qualify members with their enclosing class/namespace.
    #[serde(default)]
    pub include_parent_scopes: bool,
    /// Set `isDashDocset` in the docset's Info.plist after indexing.
    #[serde(default = "default_true")]
    pub update_info_plist: bool,
    /// Drop existing rows before indexing.
    #[serde(default)]
    pub fresh: bool,
}

fn default_true() -> bool {
    true
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            include_function_signatures: false,
            include_parent_scopes: false,
            update_info_plist: true,
            fresh: false,
        }
    }
}

impl IndexConfig {
    /// Naming options configured for classifiers.
    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions::new(self.include_function_signatures, self.include_parent_scopes)
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::user_config_path(), Path::new(PROJECT_CONFIG_FILE))
    }

    /// Load config from explicit user and project files plus the environment.
    /// Missing files are skipped.
    pub fn load_from(user_config: &Path, project_config: &Path) -> Result<Self, ConfigError> {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(project_config))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/doxyindex/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("doxyindex").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("doxyindex").join("config.toml"))
            .unwrap_or_default()
    }
}
