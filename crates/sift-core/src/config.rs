//! TOML configuration: scoring weights, ranking policy, and output mode.
//!
//! Every field has a serde default, so a missing file, a missing section, or
//! a missing key all fall back to the built-in defaults.
//!
//! ```toml
//! output = "json"
//!
//! [scoring]
//! start = 0.20
//! compactness = 0.50
//! coverage = 0.30
//!
//! [ranking]
//! drop_unmatched = true
//! limit = 20
//! ```

use crate::error::{ConfigError, WeightsError};
use crate::score::{Scorer, Weights};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SIFT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Preferred output mode (`pretty`, `text`, or `json`).
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub scoring: Weights,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Drop candidates the query cannot match instead of listing them last.
    #[serde(default)]
    pub drop_unmatched: bool,
    /// Maximum number of ranked rows to emit.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Config {
    /// Build a scorer from the `[scoring]` weights.
    ///
    /// # Errors
    ///
    /// Returns [`WeightsError`] if the weights are invalid.
    pub fn scorer(&self) -> Result<Scorer, WeightsError> {
        Scorer::new(self.scoring)
    }
}

/// Load and validate a config file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, is not valid TOML for
/// [`Config`], or carries invalid scoring weights.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    config
        .scoring
        .validate()
        .map_err(|source| ConfigError::InvalidWeights {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(config)
}

/// Default per-user config location: `<config dir>/sift/config.toml`.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sift/config.toml"))
}

/// Resolve the effective config.
///
/// Precedence (highest wins):
/// 1. `explicit` path (from `--config`); must exist
/// 2. `SIFT_CONFIG` env var; must exist
/// 3. the user config file, if present
/// 4. built-in defaults
///
/// # Errors
///
/// Returns [`ConfigError`] if the selected file fails to load.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let env_path = env::var_os(CONFIG_ENV).map(PathBuf::from);
    resolve_config_inner(explicit, env_path, user_config_path())
}

fn resolve_config_inner(
    explicit: Option<&Path>,
    env_path: Option<PathBuf>,
    user_path: Option<PathBuf>,
) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config from --config");
        return load_config(path);
    }

    if let Some(path) = env_path {
        debug!(path = %path.display(), "loading config from {CONFIG_ENV}");
        return load_config(&path);
    }

    match user_path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading user config");
            load_config(&path)
        }
        _ => {
            debug!("no config file found; using defaults");
            Ok(Config::default())
        }
    }
}
