//! Lexical absolute-path resolution.
//!
//! # Key Concepts
//!
//! ## Resolution
//!
//! [`PathResolver::resolve`] turns a path and an optional base directory into
//! an absolute path by:
//! - Expanding a leading `~` (current user) or `~name` (named user)
//! - Anchoring relative paths at the base, or the current directory
//! - Resolving `.` and `..` segments and collapsing repeated separators
//!
//! Resolution never touches the filesystem: `..` is purely textual.
//!
//! ## Syntax
//!
//! Platform differences live behind [`PathSyntax`]. [`PosixSyntax`] and
//! [`WindowsSyntax`] are chosen by [`Platform`]; the POSIX handling of a
//! leading `//` is governed by [`LeadingSlashPolicy`].
//!
//! ## Path-like input
//!
//! Anything implementing [`ToPath`] can be resolved.
//!
//! # Examples
//!
//! ```
//! use pathstream::path::PathResolver;
//!
//! let resolver = PathResolver::new();
//! assert_eq!(resolver.resolve("a", Some("/tmp")).unwrap(), "/tmp/a");
//! assert_eq!(resolver.resolve("/a/./b/../c", None).unwrap(), "/a/c");
//! ```

pub mod normalize;
pub mod pathlike;
pub mod resolver;
pub mod syntax;
pub mod tilde;
pub mod users;

#[cfg(test)]
pub(crate) mod test_util;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use pathlike::ToPath;
pub use resolver::PathResolver;
pub use syntax::{LeadingSlashPolicy, PathSyntax, Platform, PosixSyntax, WindowsSyntax};
pub use users::{PasswdFile, UserDirectory};
