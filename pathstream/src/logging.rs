//! Logging backend for the pathstream library.
//!
//! Library code logs through the `log` facade. This module provides a small
//! stderr backend for it with three coarse verbosity levels, selected from
//! caller flags or the `PATHSTREAM_LOG_MODE` environment variable.

use std::env;
use std::fmt;

use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_VAR: &str = "PATHSTREAM_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use pathstream::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Suppress all output.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything down to debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathstream::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` crate filter this level corresponds to.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// A `log::Log` implementation that writes to stderr.
///
/// # Examples
///
/// ```
/// use log::Log;
/// use pathstream::{LogLevel, StderrLogger};
///
/// let logger = StderrLogger::new(LogLevel::Normal);
/// let warn = log::Metadata::builder().level(log::Level::Warn).build();
/// let debug = log::Metadata::builder().level(log::Level::Debug).build();
/// assert!(logger.enabled(&warn));
/// assert!(!logger.enabled(&debug));
/// ```
#[derive(Debug)]
pub struct StderrLogger {
    level: LogLevel,
}

impl StderrLogger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.level_filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Picks a log level from CLI-style flags and the environment.
///
/// The priority order is:
/// 1. `verbose` / `quiet` flags (`verbose` wins if both are set)
/// 2. `PATHSTREAM_LOG_MODE`
/// 3. [`LogLevel::Normal`]
#[must_use]
pub fn select_level(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        return LogLevel::Verbose;
    }
    if quiet {
        return LogLevel::Quiet;
    }

    if let Ok(env_value) = env::var(LOG_MODE_VAR) {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return level;
        }
    }

    LogLevel::Normal
}

/// Installs [`StderrLogger`] as the global `log` backend.
///
/// Only the first call installs a logger; later calls just adjust the
/// maximum level. Returns the level now in effect.
///
/// # Examples
///
/// ```
/// use pathstream::{init_logger, LogLevel};
///
/// let level = init_logger(false, true);
/// assert_eq!(level, LogLevel::Quiet);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> LogLevel {
    install(select_level(verbose, quiet))
}

/// Installs [`StderrLogger`] at the level a [`Config`] names.
///
/// A [`ConfigBuilder`](crate::ConfigBuilder) has already folded
/// `PATHSTREAM_LOG_MODE` into `log_mode`, so the environment is not read
/// again here. An unset `log_mode` means [`LogLevel::Normal`].
///
/// # Examples
///
/// ```
/// use pathstream::{init_logger_from_config, Config, LogLevel};
///
/// let config = Config {
///     log_mode: Some(LogLevel::Quiet),
///     ..Default::default()
/// };
/// assert_eq!(init_logger_from_config(&config), LogLevel::Quiet);
/// ```
pub fn init_logger_from_config(config: &Config) -> LogLevel {
    install(config.log_mode())
}

fn install(level: LogLevel) -> LogLevel {
    if log::set_boxed_logger(Box::new(StderrLogger::new(level))).is_err() {
        log::debug!("logger already installed; updating max level to {level}");
    }
    log::set_max_level(level.level_filter());
    level
}
