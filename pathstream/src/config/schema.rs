//! Configuration schema definitions.
//!
//! Every field is optional so that partial configurations from different
//! sources can be layered; the accessor methods supply the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::path::users::DEFAULT_PASSWD_FILE;
use crate::path::{LeadingSlashPolicy, Platform};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use pathstream::config::Config;
/// use pathstream::path::{LeadingSlashPolicy, Platform};
///
/// let config: Config = serde_yaml::from_str("platform: windows\n").unwrap();
/// assert_eq!(config.platform(), Platform::Windows);
/// assert_eq!(config.leading_slashes(), LeadingSlashPolicy::Preserve);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path syntax used by resolution.
    pub platform: Option<Platform>,

    /// Handling of a leading run of slashes on POSIX.
    pub leading_slashes: Option<LeadingSlashPolicy>,

    /// `passwd(5)`-format file consulted for `~name`.
    pub passwd_file: Option<PathBuf>,

    /// Shell used to run pipe commands.
    pub shell: Option<PathBuf>,

    /// Logging verbosity.
    pub log_mode: Option<LogLevel>,
}

impl Config {
    /// Configured platform, or the one this binary targets.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_default()
    }

    /// Configured leading-slash policy, or [`LeadingSlashPolicy::Preserve`].
    #[must_use]
    pub fn leading_slashes(&self) -> LeadingSlashPolicy {
        self.leading_slashes.unwrap_or_default()
    }

    /// Configured passwd file, or `/etc/passwd`.
    #[must_use]
    pub fn passwd_file(&self) -> &Path {
        self.passwd_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_PASSWD_FILE))
    }

    /// Configured shell; `None` means the platform default.
    #[must_use]
    pub fn shell(&self) -> Option<&Path> {
        self.shell.as_deref()
    }

    /// Configured log mode, or [`LogLevel::Normal`].
    #[must_use]
    pub fn log_mode(&self) -> LogLevel {
        self.log_mode.unwrap_or_default()
    }

    /// Overlay `other` on `self`: every field set in `other` wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathstream::config::Config;
    /// use pathstream::path::Platform;
    ///
    /// let mut base = Config { platform: Some(Platform::Posix), ..Default::default() };
    /// base.merge(&Config { platform: Some(Platform::Windows), ..Default::default() });
    /// assert_eq!(base.platform, Some(Platform::Windows));
    /// ```
    pub fn merge(&mut self, other: &Self) {
        if other.platform.is_some() {
            self.platform = other.platform;
        }
        if other.leading_slashes.is_some() {
            self.leading_slashes = other.leading_slashes;
        }
        if other.passwd_file.is_some() {
            self.passwd_file.clone_from(&other.passwd_file);
        }
        if other.shell.is_some() {
            self.shell.clone_from(&other.shell);
        }
        if other.log_mode.is_some() {
            self.log_mode = other.log_mode;
        }
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `passwd_file` or `shell` is empty.
    pub fn validate(&self) -> Result<()> {
        Self::validate_path("passwd_file", self.passwd_file.as_deref())?;
        Self::validate_path("shell", self.shell.as_deref())?;
        Ok(())
    }

    fn validate_path(field: &str, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) if path.as_os_str().is_empty() => Err(Error::Validation {
                field: field.into(),
                message: "must not be empty".into(),
            }),
            _ => Ok(()),
        }
    }
}
