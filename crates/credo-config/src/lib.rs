//! # credo-config
//!
//! Layered configuration loading for Credo using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CREDO_*` prefix, `__` as separator)
//! 2. Project-level `.credo/config.toml`
//! 3. User-level `~/.config/credo/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CREDO_RETRIEVAL__TIMEOUT_MS` -> `retrieval.timeout_ms`,
//! `CREDO_SOURCES__FACTCHECK__API_KEY` -> `sources.factcheck.api_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use credo_config::CredoConfig;
//!
//! let config = CredoConfig::load_with_dotenv().expect("config");
//! println!("max input: {} chars", config.analysis.max_input_chars);
//! ```

mod analysis;
mod error;
mod retrieval;
mod sources;

pub use analysis::AnalysisConfig;
pub use error::ConfigError;
pub use retrieval::RetrievalConfig;
pub use sources::{CorpusConfig, CrossrefConfig, FactCheckConfig, SourcesConfig, WikipediaConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const REDACTED: &str = "********";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredoConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

impl CredoConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a provider fails to parse, or
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load configuration from defaults, one explicit TOML file, and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if `path` does not exist, otherwise
    /// the same errors as [`Self::load`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("CREDO_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
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
        let local_path = PathBuf::from(".credo/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CREDO_").split("__"))
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.retrieval.validate()?;
        Ok(())
    }

    /// Copy of the config with credentials masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.sources.factcheck.api_key.is_empty() {
            copy.sources.factcheck.api_key = REDACTED.to_string();
        }
        copy
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("credo").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Silently does nothing
    /// if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace)
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

        let _ = dotenvy::dotenv();
    }
}
