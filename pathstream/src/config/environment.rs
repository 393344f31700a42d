//! Environment variable handling for configuration overrides.
//!
//! `PATHSTREAM_*` variables override values loaded from files.

use std::env;
use std::path::PathBuf;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::logging::{LogLevel, LOG_MODE_VAR};

/// Overrides [`Config::platform`].
pub const PLATFORM_VAR: &str = "PATHSTREAM_PLATFORM";
/// Overrides [`Config::leading_slashes`].
pub const LEADING_SLASHES_VAR: &str = "PATHSTREAM_LEADING_SLASHES";
/// Overrides [`Config::passwd_file`].
pub const PASSWD_FILE_VAR: &str = "PATHSTREAM_PASSWD_FILE";
/// Overrides [`Config::shell`].
pub const SHELL_VAR: &str = "PATHSTREAM_SHELL";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathstream::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `PATHSTREAM_*` overrides to `config`.
    ///
    /// Unset and empty variables leave the field alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a variable holds an unknown value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(platform) = Self::var(PLATFORM_VAR) {
            config.platform = Some(platform.parse()?);
        }

        if let Some(policy) = Self::var(LEADING_SLASHES_VAR) {
            config.leading_slashes = Some(policy.parse()?);
        }

        if let Some(path) = Self::var(PASSWD_FILE_VAR) {
            config.passwd_file = Some(PathBuf::from(path));
        }

        if let Some(shell) = Self::var(SHELL_VAR) {
            config.shell = Some(PathBuf::from(shell));
        }

        if let Some(mode) = Self::var(LOG_MODE_VAR) {
            config.log_mode =
                Some(LogLevel::parse(&mode).map_err(|message| Error::Validation {
                    field: LOG_MODE_VAR.into(),
                    message,
                })?);
        }

        Ok(())
    }

    fn var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }
}
