//! Configuration file loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Directory under the home directory holding the user configuration.
pub const USER_CONFIG_DIR: &str = ".pathstream";

/// File name of the user configuration.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Loads configuration from YAML.
///
/// # Examples
///
/// ```
/// use pathstream::config::ConfigLoader;
///
/// let config = ConfigLoader::load_str("shell: /bin/bash\n").unwrap();
/// assert_eq!(config.shell().unwrap().to_str(), Some("/bin/bash"));
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the file cannot be read and
    /// [`Error::Configuration`] if the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("failed to read configuration file: {e}"),
        })?;
        log::debug!("loading configuration from {}", path.display());
        Self::load_str(&contents)
    }

    /// Parse YAML configuration text.
    ///
    /// An empty document is the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the YAML is invalid.
    pub fn load_str(contents: &str) -> Result<Config> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load the user configuration if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_user_config() -> Result<Option<Config>> {
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_file(&path).map(Some),
            _ => Ok(None),
        }
    }

    /// `~/.pathstream/config.yaml`, when a home directory is known.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
    }
}
