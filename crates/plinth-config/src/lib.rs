//! # plinth-config
//!
//! Layered configuration loading for Plinth using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PLINTH_*` prefix, `__` as separator)
//! 2. Project-level `.plinth/config.toml`
//! 3. User-level `~/.config/plinth/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PLINTH_SYNC__BACKEND_URL` -> `sync.backend_url`,
//! `PLINTH_ROUTING__MAX_DEPTH` -> `routing.max_depth`, etc. The `__`
//! (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use plinth_config::PlinthConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = PlinthConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = PlinthConfig::load().expect("config");
//!
//! println!("backend: {}", config.sync.backend_url);
//! ```

mod build;
mod error;
mod routing;
mod sync;

pub use build::BuildConfig;
pub use error::ConfigError;
pub use routing::RoutingConfig;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlinthConfig {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

impl PlinthConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root
    /// before building the figment. This is the typical entry point for
    /// the CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".plinth/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("PLINTH_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("plinth").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is
    /// found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = PlinthConfig::default();
        assert_eq!(config.sync.backend_url, "http://localhost:8000");
        assert_eq!(config.routing.max_depth, 3);
        assert_eq!(config.build.blocks_dir, "blocks");
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = PlinthConfig::figment();
        let config: PlinthConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.routing.child_page_size, 12);
        assert_eq!(config.sync.timeout_secs, 10);
    }
}
