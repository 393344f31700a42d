//! Platform path syntaxes.
//!
//! Everything that differs between POSIX and Windows path spelling lives
//! behind the [`PathSyntax`] trait: which separators exist, what a root
//! looks like, how a relative path hangs off a base directory, and which
//! environment variables name the home directory. The resolver and the
//! normalizer only ever talk to the trait.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which path syntax a resolver uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// `/`-separated paths rooted at `/`.
    Posix,
    /// Drive-letter (`C:/`) and UNC (`//server/share`) roots, `\` accepted as a separator.
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Builds the syntax strategy for this platform.
    ///
    /// `leading_slashes` only affects [`Platform::Posix`].
    #[must_use]
    pub fn syntax(self, leading_slashes: LeadingSlashPolicy) -> Box<dyn PathSyntax> {
        match self {
            Self::Posix => Box::new(PosixSyntax::new(leading_slashes)),
            Self::Windows => Box::new(WindowsSyntax),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posix" | "unix" => Ok(Self::Posix),
            "windows" => Ok(Self::Windows),
            _ => Err(Error::Validation {
                field: "platform".into(),
                message: format!("unknown platform '{s}' (expected posix or windows)"),
            }),
        }
    }
}

/// What to do with a run of two or more slashes at the start of a POSIX path.
///
/// POSIX leaves the meaning of a leading `//` implementation-defined, and
/// runtimes disagree on whether `////a` should stay as written. The choice
/// is left to configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadingSlashPolicy {
    /// Keep the leading run verbatim: `////a` stays `////a`.
    #[default]
    Preserve,
    /// Collapse the leading run to one slash: `////a` becomes `/a`.
    Collapse,
}

impl fmt::Display for LeadingSlashPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preserve => write!(f, "preserve"),
            Self::Collapse => write!(f, "collapse"),
        }
    }
}

impl FromStr for LeadingSlashPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "collapse" => Ok(Self::Collapse),
            _ => Err(Error::Validation {
                field: "leading_slashes".into(),
                message: format!("unknown policy '{s}' (expected preserve or collapse)"),
            }),
        }
    }
}

/// A platform's path spelling rules.
pub trait PathSyntax: fmt::Debug + Send + Sync {
    /// The platform this syntax implements.
    fn platform(&self) -> Platform;

    /// Rewrites alternate separators to `/`.
    fn canonical<'a>(&self, path: &'a str) -> Cow<'a, str>;

    /// Splits an absolute, canonical path into its root and the remainder.
    ///
    /// Returns `None` for relative paths.
    fn split_root<'a>(&self, path: &'a str) -> Option<(Cow<'a, str>, &'a str)>;

    /// Hangs a relative canonical `path` off an absolute normalized `base`.
    fn anchor(&self, path: &str, base: &str) -> String {
        join(base, path)
    }

    /// Environment variables naming the current user's home, in lookup order.
    fn home_variables(&self) -> &'static [&'static str] {
        &["HOME"]
    }

    /// Whether `path` is absolute under this syntax.
    fn is_absolute(&self, path: &str) -> bool {
        self.split_root(path).is_some()
    }
}

fn join(base: &str, path: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// POSIX path syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PosixSyntax {
    leading_slashes: LeadingSlashPolicy,
}

impl PosixSyntax {
    /// Creates a POSIX syntax with the given leading-slash policy.
    #[must_use]
    pub const fn new(leading_slashes: LeadingSlashPolicy) -> Self {
        Self { leading_slashes }
    }

    /// The configured leading-slash policy.
    #[must_use]
    pub const fn leading_slashes(&self) -> LeadingSlashPolicy {
        self.leading_slashes
    }
}

impl PathSyntax for PosixSyntax {
    fn platform(&self) -> Platform {
        Platform::Posix
    }

    fn canonical<'a>(&self, path: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(path)
    }

    fn split_root<'a>(&self, path: &'a str) -> Option<(Cow<'a, str>, &'a str)> {
        let slashes = path.len() - path.trim_start_matches('/').len();
        match slashes {
            0 => None,
            n if n >= 2 && self.leading_slashes == LeadingSlashPolicy::Preserve => {
                Some((Cow::Borrowed(&path[..n]), &path[n..]))
            }
            n => Some((Cow::Borrowed("/"), &path[n..])),
        }
    }
}

/// Windows path syntax.
///
/// Only the spelling is handled: drive roots (`C:/`), UNC roots
/// (`//server/share`), drive-relative (`C:foo`) and root-relative (`/foo`)
/// forms. Backslashes are read as forward slashes and output always uses `/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowsSyntax;

impl WindowsSyntax {
    fn drive(path: &str) -> Option<char> {
        let mut chars = path.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Some(letter),
            _ => None,
        }
    }
}

impl PathSyntax for WindowsSyntax {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn canonical<'a>(&self, path: &'a str) -> Cow<'a, str> {
        if path.contains('\\') {
            Cow::Owned(path.replace('\\', "/"))
        } else {
            Cow::Borrowed(path)
        }
    }

    fn split_root<'a>(&self, path: &'a str) -> Option<(Cow<'a, str>, &'a str)> {
        if Self::drive(path).is_some() && path[2..].starts_with('/') {
            return Some((Cow::Borrowed(&path[..3]), &path[3..]));
        }

        let unc = path.strip_prefix("//")?;
        let unc = unc.trim_start_matches('/');
        let server_end = unc.find('/').unwrap_or(unc.len());
        let (server, after_server) = unc.split_at(server_end);
        if server.is_empty() {
            return None;
        }
        let after_server = after_server.trim_start_matches('/');
        let share_end = after_server.find('/').unwrap_or(after_server.len());
        let (share, rest) = after_server.split_at(share_end);
        let rest = rest.trim_start_matches('/');

        let root = if share.is_empty() {
            format!("//{server}")
        } else {
            format!("//{server}/{share}")
        };
        Some((Cow::Owned(root), rest))
    }

    fn anchor(&self, path: &str, base: &str) -> String {
        if path.starts_with('/') {
            let root = self
                .split_root(base)
                .map_or(Cow::Borrowed(base), |(root, _)| root);
            return join(&root, path.trim_start_matches('/'));
        }

        if let Some(letter) = Self::drive(path) {
            let rest = &path[2..];
            let same_drive = Self::drive(base)
                .is_some_and(|base_letter| base_letter.eq_ignore_ascii_case(&letter));
            return if same_drive {
                join(base, rest)
            } else {
                format!("{letter}:/{rest}")
            };
        }

        join(base, path)
    }

    fn home_variables(&self) -> &'static [&'static str] {
        &["HOME", "USERPROFILE"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_of<'a>(syntax: &dyn PathSyntax, path: &'a str) -> Option<(String, &'a str)> {
        syntax
            .split_root(path)
            .map(|(root, rest)| (root.into_owned(), rest))
    }

    #[test]
    fn test_posix_relative_has_no_root() {
        let posix = PosixSyntax::default();
        assert_eq!(root_of(&posix, "a/b"), None);
        assert_eq!(root_of(&posix, ""), None);
        assert_eq!(root_of(&posix, "~/a"), None);
    }

    #[test]
    fn test_posix_single_slash_root() {
        let posix = PosixSyntax::default();
        assert_eq!(root_of(&posix, "/a/b"), Some(("/".to_string(), "a/b")));
    }

    #[test]
    fn test_posix_leading_slashes_preserved() {
        let posix = PosixSyntax::new(LeadingSlashPolicy::Preserve);
        assert_eq!(
            root_of(&posix, "////some/path"),
            Some(("////".to_string(), "some/path"))
        );
    }

    #[test]
    fn test_posix_leading_slashes_collapsed() {
        let posix = PosixSyntax::new(LeadingSlashPolicy::Collapse);
        assert_eq!(
            root_of(&posix, "////some/path"),
            Some(("/".to_string(), "some/path"))
        );
    }

    #[test]
    fn test_posix_anchor_avoids_double_slash() {
        let posix = PosixSyntax::default();
        assert_eq!(posix.anchor("a", "/"), "/a");
        assert_eq!(posix.anchor("a", "/tmp"), "/tmp/a");
    }

    #[test]
    fn test_windows_canonical_separators() {
        assert_eq!(WindowsSyntax.canonical(r"C:\Users\me"), "C:/Users/me");
        assert!(matches!(WindowsSyntax.canonical("C:/x"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_windows_drive_root() {
        assert_eq!(
            root_of(&WindowsSyntax, "C:/tmp/x"),
            Some(("C:/".to_string(), "tmp/x"))
        );
        assert_eq!(root_of(&WindowsSyntax, "C:tmp"), None);
        assert_eq!(root_of(&WindowsSyntax, "/tmp"), None);
    }

    #[test]
    fn test_windows_unc_root() {
        assert_eq!(
            root_of(&WindowsSyntax, "//server/share/dir"),
            Some(("//server/share".to_string(), "dir"))
        );
        assert_eq!(
            root_of(&WindowsSyntax, "//server"),
            Some(("//server".to_string(), ""))
        );
    }

    #[test]
    fn test_windows_anchor_root_relative_takes_base_drive() {
        assert_eq!(WindowsSyntax.anchor("/dir", "D:/work/src"), "D:/dir");
    }

    #[test]
    fn test_windows_anchor_drive_relative() {
        assert_eq!(WindowsSyntax.anchor("c:foo", "C:/work"), "C:/work/foo");
        assert_eq!(WindowsSyntax.anchor("E:foo", "C:/work"), "E:/foo");
    }

    #[test]
    fn test_windows_home_variables() {
        assert_eq!(WindowsSyntax.home_variables(), &["HOME", "USERPROFILE"]);
        assert_eq!(PosixSyntax::default().home_variables(), &["HOME"]);
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("posix".parse::<Platform>().unwrap(), Platform::Posix);
        assert_eq!("Windows".parse::<Platform>().unwrap(), Platform::Windows);
        assert!("beos".parse::<Platform>().is_err());
    }

    #[test]
    fn test_leading_slash_policy_parse() {
        assert_eq!(
            "collapse".parse::<LeadingSlashPolicy>().unwrap(),
            LeadingSlashPolicy::Collapse
        );
        assert!("squash".parse::<LeadingSlashPolicy>().is_err());
    }

    #[test]
    fn test_platform_syntax_selection() {
        assert_eq!(
            Platform::Posix.syntax(LeadingSlashPolicy::Collapse).platform(),
            Platform::Posix
        );
        assert_eq!(
            Platform::Windows.syntax(LeadingSlashPolicy::Preserve).platform(),
            Platform::Windows
        );
    }
}
