#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathstream
//!
//! Lexical absolute-path resolution and a file/pipe stream lifecycle.
//!
//! ## Core Types
//!
//! - [`PathResolver`] and [`ToPath`]: absolute path resolution with `~`
//!   expansion and `.`/`..` normalization
//! - [`StreamLifecycle`] and [`FileHandle`]: opening files and pipes, and
//!   closing them exactly once
//! - [`ProcessStatus`] and [`last_status`]: how pipe children ended
//! - [`Config`] and [`ConfigBuilder`]: layered configuration
//! - [`Error`] and [`Result`]: Error handling types
//! - [`StderrLogger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathstream::PathResolver;
//!
//! let resolver = PathResolver::new();
//! assert_eq!(resolver.resolve("../../bin", Some("/tmp/x")).unwrap(), "/bin");
//! assert_eq!(resolver.resolve("", Some("/usr/local")).unwrap(), "/usr/local");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod stream;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, init_logger_from_config, LogLevel, StderrLogger};
pub use path::{PathResolver, ToPath};
pub use stream::{
    last_status, Access, BackingKind, FileHandle, OpenMode, ProcessStatus, StreamLifecycle,
    StreamState,
};
