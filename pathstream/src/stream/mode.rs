//! Stream open modes.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use crate::error::Error;

/// What a stream may be used for, spelled the `fopen(3)` way.
///
/// # Examples
///
/// ```
/// use pathstream::Access;
///
/// let access: Access = "r+".parse().unwrap();
/// assert_eq!(access, Access::ReadWrite);
/// assert!(access.readable() && access.writable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// `r`: read from an existing file.
    Read,
    /// `w`: write, creating or truncating.
    Write,
    /// `a`: append, creating if missing.
    Append,
    /// `r+`: read and write an existing file.
    ReadWrite,
    /// `w+`: read and write, creating or truncating.
    WriteRead,
    /// `a+`: read anywhere, append writes, creating if missing.
    ReadAppend,
}

impl Access {
    /// Whether the stream can be read.
    #[must_use]
    pub const fn readable(self) -> bool {
        !matches!(self, Self::Write | Self::Append)
    }

    /// Whether the stream can be written.
    #[must_use]
    pub const fn writable(self) -> bool {
        !matches!(self, Self::Read)
    }

    /// `std::fs` options that open a file with this access.
    #[must_use]
    pub fn open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Self::Read => options.read(true),
            Self::Write => options.write(true).create(true).truncate(true),
            Self::Append => options.append(true).create(true),
            Self::ReadWrite => options.read(true).write(true),
            Self::WriteRead => options.read(true).write(true).create(true).truncate(true),
            Self::ReadAppend => options.read(true).append(true).create(true),
        };
        options
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelled = match self {
            Self::Read => "r",
            Self::Write => "w",
            Self::Append => "a",
            Self::ReadWrite => "r+",
            Self::WriteRead => "w+",
            Self::ReadAppend => "a+",
        };
        f.write_str(spelled)
    }
}

impl FromStr for Access {
    type Err = Error;

    /// Parses `r`, `w`, `a`, `r+`, `w+`, `a+`; `b` and `t` flags are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let core: String = s.chars().filter(|c| !matches!(c, 'b' | 't')).collect();
        match core.as_str() {
            "r" => Ok(Self::Read),
            "w" => Ok(Self::Write),
            "a" => Ok(Self::Append),
            "r+" => Ok(Self::ReadWrite),
            "w+" => Ok(Self::WriteRead),
            "a+" => Ok(Self::ReadAppend),
            _ => Err(Error::InvalidArgument {
                argument: s.to_string(),
                reason: "invalid access mode".to_string(),
            }),
        }
    }
}

/// How to open a stream: the access, and whether the target is a file path
/// or a command to run with its standard streams piped to the handle.
///
/// # Examples
///
/// ```
/// use pathstream::{Access, OpenMode};
///
/// let file = OpenMode::from(Access::Read);
/// assert!(!file.is_pipe());
///
/// let pipe = OpenMode::pipe(Access::Read);
/// assert!(pipe.is_pipe());
/// assert_eq!(pipe.to_string(), "|r");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenMode {
    access: Access,
    pipe: bool,
}

impl OpenMode {
    /// Open a file with `access`.
    #[must_use]
    pub const fn file(access: Access) -> Self {
        Self {
            access,
            pipe: false,
        }
    }

    /// Spawn a command and talk to it with `access`.
    ///
    /// Readable pipes read the child's stdout; writable pipes write its stdin.
    #[must_use]
    pub const fn pipe(access: Access) -> Self {
        Self { access, pipe: true }
    }

    /// The access mode.
    #[must_use]
    pub const fn access(self) -> Access {
        self.access
    }

    /// Whether the target is a command.
    #[must_use]
    pub const fn is_pipe(self) -> bool {
        self.pipe
    }

    /// Whether the stream can be read.
    #[must_use]
    pub const fn readable(self) -> bool {
        self.access.readable()
    }

    /// Whether the stream can be written.
    #[must_use]
    pub const fn writable(self) -> bool {
        self.access.writable()
    }
}

impl From<Access> for OpenMode {
    fn from(access: Access) -> Self {
        Self::file(access)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pipe {
            write!(f, "|{}", self.access)
        } else {
            write!(f, "{}", self.access)
        }
    }
}

impl FromStr for OpenMode {
    type Err = Error;

    /// Parses an [`Access`], with a leading `|` selecting a pipe.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('|') {
            Some(access) => Ok(Self::pipe(access.parse()?)),
            None => Ok(Self::file(s.parse()?)),
        }
    }
}
