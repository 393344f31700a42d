//! Error types for the pathstream library.
//!
//! Every fallible operation in the crate returns [`Result`], built on a single
//! `thiserror`-derived [`Error`] enum. Callers that only care about the broad
//! category of a failure can use [`Error::kind`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a pathstream error.
///
/// # Examples
///
/// ```
/// use pathstream::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/tmp".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathstream library.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be interpreted as a textual path.
    #[error("type error: {reason}")]
    Type {
        /// Why the input was rejected.
        reason: String,
    },

    /// An argument was well-typed but refers to something that does not exist,
    /// such as an unknown user in `~name`.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The offending argument.
        argument: String,
        /// The reason it was rejected.
        reason: String,
    },

    /// A path could not be resolved.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The path being resolved.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An operation was attempted on a stream that has already been closed.
    #[error("closed stream")]
    StreamClosed,

    /// An I/O error occurred while acquiring, using or releasing a resource.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

/// Broad category of an [`Error`].
///
/// `StreamClosed` and `Io` both report [`ErrorKind::Io`]: using a closed stream
/// is an I/O failure from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input was not path-like.
    Type,
    /// Argument referred to something that does not exist.
    InvalidArgument,
    /// Path could not be resolved.
    InvalidPath,
    /// Stream closed, or resource acquisition/release failed.
    Io,
    /// Configuration could not be loaded or validated.
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::InvalidPath => write!(f, "invalid path"),
            Self::Io => write!(f, "io"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

impl Error {
    /// Returns the broad category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathstream::{Error, ErrorKind};
    ///
    /// assert_eq!(Error::StreamClosed.kind(), ErrorKind::Io);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type { .. } => ErrorKind::Type,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::StreamClosed | Self::Io(_) => ErrorKind::Io,
            Self::Configuration(_) | Self::Validation { .. } => ErrorKind::Configuration,
        }
    }

    /// Check if error is the closed-stream error.
    #[must_use]
    pub fn is_closed_stream(&self) -> bool {
        matches!(self, Self::StreamClosed)
    }

    /// Check if error belongs to the I/O category.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathstream::Error;
    ///
    /// let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    /// assert!(err.is_io());
    /// assert!(Error::StreamClosed.is_io());
    /// ```
    #[must_use]
    pub fn is_io(&self) -> bool {
        self.kind() == ErrorKind::Io
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(inner) => inner,
            other => Self::new(std::io::ErrorKind::Other, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_error() {
        let err = Error::Type {
            reason: "path is not valid UTF-8".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("type error"));
        assert!(display.contains("UTF-8"));
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = Error::InvalidArgument {
            argument: "~nobody_here".to_string(),
            reason: "user nobody_here doesn't exist".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid argument"));
        assert!(display.contains("~nobody_here"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_invalid_path_error() {
        let err = Error::InvalidPath {
            path: PathBuf::from("~"),
            reason: "HOME is not set".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid path"));
        assert!(display.contains("HOME is not set"));
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn test_stream_closed_error() {
        let err = Error::StreamClosed;
        assert_eq!(format!("{err}"), "closed stream");
        assert!(err.is_closed_stream());
        assert!(err.is_io());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
        assert!(err.is_io());
        assert!(!err.is_closed_stream());
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "shell".to_string(),
            message: "must not be empty".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("shell"));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_into_io_error() {
        let io_err: std::io::Error = Error::StreamClosed.into();
        assert_eq!(io_err.to_string(), "closed stream");

        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let io_err: std::io::Error = Error::Io(inner).into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::Io.to_string(), "io");
        assert_eq!(ErrorKind::InvalidPath.to_string(), "invalid path");
    }
}
