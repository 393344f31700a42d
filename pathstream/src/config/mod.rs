//! Configuration system for pathstream.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files
//! - `PATHSTREAM_*` environment variable overrides
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Sources are merged with the following precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHSTREAM_*`)
//! 3. Files added with `ConfigBuilder::with_file`, later over earlier
//! 4. User config (`~/.pathstream/config.yaml`), when requested
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use pathstream::config::ConfigBuilder;
//! use pathstream::{PathResolver, StreamLifecycle};
//!
//! let config = ConfigBuilder::new()
//!     .with_user_config()
//!     .build()
//!     .unwrap();
//!
//! let resolver = PathResolver::from_config(&config);
//! let streams = StreamLifecycle::from_config(&config);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod schema;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::ConfigLoader;
pub use schema::Config;
