use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the repository root.
pub const LOCAL_CONFIG_FILE: &str = "release.toml";

/// File name looked up in the user's config directory.
pub const USER_CONFIG_FILE: &str = ".release.toml";

/// Branch used when none is configured and the remote HEAD cannot be resolved.
pub const FALLBACK_BRANCH: &str = "master";

/// Represents the complete configuration for create-release.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote that tags are pulled from and pushed to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch checked out and pulled before reading tags.
    /// When unset, it is resolved from `<remote>/HEAD`.
    #[serde(default)]
    pub branch: Option<String>,

    /// Annotation message for new tags; `{version}` is substituted.
    #[serde(default = "default_message")]
    pub message: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_message() -> String {
    "Release {version}".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            branch: None,
            message: default_message(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in `project_dir` (the repository root)
/// 3. `.release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists (or was named explicitly) but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, project_dir: &Path) -> Result<Config> {
    match locate_config(config_path, project_dir) {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            let contents = fs::read_to_string(&path).map_err(|e| {
                ReleaseError::config(format!("Cannot read '{}': {}", path.display(), e))
            })?;
            parse_config(&contents)
                .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
        }
        None => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(contents: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

fn locate_config(config_path: Option<&str>, project_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = project_dir.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}
