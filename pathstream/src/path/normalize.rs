//! Lexical path normalization.
//!
//! Normalization is purely textual: no filesystem access, no symlink
//! resolution. Given an absolute path it:
//! - keeps the root exactly as the syntax reports it
//! - drops empty segments (collapsing interior `//`) and `.` segments
//! - resolves `..` by popping the previous segment, clamping at the root
//!
//! Segments that merely contain dots (`a.`, `..a`, `a..`) are ordinary names.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::path::syntax::PathSyntax;

/// Resolve `.`, `..` and empty segments in a relative segment list.
///
/// `..` with nothing left to pop is dropped, which is what clamping at the
/// root means once the root has been split off.
///
/// # Examples
///
/// ```
/// use pathstream::path::normalize::collapse_segments;
///
/// assert_eq!(collapse_segments("a/./b/../c"), vec!["a", "c"]);
/// assert_eq!(collapse_segments("../../bin"), vec!["bin"]);
/// assert_eq!(collapse_segments("a////b/"), vec!["a", "b"]);
/// assert_eq!(collapse_segments("a./..b"), vec!["a.", "..b"]);
/// ```
#[must_use]
pub fn collapse_segments(rest: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name),
        }
    }
    segments
}

/// Normalize an absolute, canonical path.
///
/// The output has no trailing slash unless it is the root itself.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `path` is not absolute under `syntax`.
///
/// # Examples
///
/// ```
/// use pathstream::path::normalize::normalize;
/// use pathstream::path::PosixSyntax;
///
/// let posix = PosixSyntax::default();
/// assert_eq!(normalize(&posix, "/a/./b/../c").unwrap(), "/a/c");
/// assert_eq!(normalize(&posix, "/tmp/../../../tmp").unwrap(), "/tmp");
/// assert_eq!(normalize(&posix, "/some////path").unwrap(), "/some/path");
/// assert!(normalize(&posix, "relative").is_err());
/// ```
pub fn normalize(syntax: &dyn PathSyntax, path: &str) -> Result<String> {
    let (root, rest) = syntax.split_root(path).ok_or_else(|| Error::InvalidPath {
        path: PathBuf::from(path),
        reason: "Path must be absolute before normalization".to_string(),
    })?;

    let segments = collapse_segments(rest);
    if segments.is_empty() {
        return Ok(root.into_owned());
    }

    let mut normalized = root.into_owned();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized.push_str(&segments.join("/"));
    Ok(normalized)
}
