//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::schema::Config;
use crate::error::Result;

/// Builds a [`Config`] from defaults, files, the environment and
/// programmatic overrides, in increasing precedence.
///
/// # Examples
///
/// ```
/// use pathstream::config::{Config, ConfigBuilder};
/// use pathstream::path::LeadingSlashPolicy;
///
/// let config = ConfigBuilder::new()
///     .skip_env()
///     .with_config(Config {
///         leading_slashes: Some(LeadingSlashPolicy::Collapse),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.leading_slashes(), LeadingSlashPolicy::Collapse);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    files: Vec<PathBuf>,
    user_config: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// A builder that reads only the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer a YAML file. Later files override earlier ones.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// Include `~/.pathstream/config.yaml`, below any explicit files.
    #[must_use]
    pub fn with_user_config(mut self) -> Self {
        self.user_config = true;
        self
    }

    /// Ignore `PATHSTREAM_*` variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Apply `config` last, above every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merge all sources and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is invalid, or the merged configuration fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if self.user_config {
            if let Some(user) = ConfigLoader::load_user_config()? {
                config.merge(&user);
            }
        }

        for path in &self.files {
            config.merge(&ConfigLoader::load_file(path)?);
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = &self.overrides {
            config.merge(overrides);
        }

        config.validate()?;
        Ok(config)
    }
}
