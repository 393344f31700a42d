//! Absolute path resolution.
//!
//! This module provides the `PathResolver` type, which turns any path-like
//! input into an absolute, lexically normalized path string.

use std::fmt;
use std::path::PathBuf;

use home::env::{Env, OS_ENV};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::path::normalize::normalize;
use crate::path::pathlike::ToPath;
use crate::path::syntax::{LeadingSlashPolicy, PathSyntax, Platform};
use crate::path::tilde::expand_tilde;
use crate::path::users::{PasswdFile, UserDirectory};

/// Resolves paths to absolute form.
///
/// Resolution is lexical: `..` removes the previous segment without looking
/// at the filesystem, so symlinks are never followed. The only outside state
/// consulted is the home variable, the user directory (for `~name`) and the
/// current working directory (when no base is given).
///
/// # Examples
///
/// ```
/// use pathstream::path::PathResolver;
///
/// let resolver = PathResolver::new();
///
/// assert_eq!(resolver.resolve("../a", Some("/tmp/x")).unwrap(), "/tmp/a");
/// assert_eq!(resolver.resolve("../../bin", Some("/")).unwrap(), "/bin");
/// assert_eq!(resolver.resolve("/a////b", None).unwrap(), "/a/b");
/// ```
pub struct PathResolver {
    syntax: Box<dyn PathSyntax>,
    env: Box<dyn Env + Send + Sync>,
    users: Box<dyn UserDirectory>,
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("syntax", &self.syntax)
            .finish_non_exhaustive()
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self {
            syntax: Platform::current().syntax(LeadingSlashPolicy::default()),
            env: Box::new(OS_ENV),
            users: Box::new(PasswdFile::system()),
        }
    }
}

impl PathResolver {
    /// Create a resolver for the current platform using the process
    /// environment and `/etc/passwd`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver from configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathstream::config::Config;
    /// use pathstream::path::{LeadingSlashPolicy, PathResolver, Platform};
    ///
    /// let config = Config {
    ///     platform: Some(Platform::Posix),
    ///     leading_slashes: Some(LeadingSlashPolicy::Collapse),
    ///     ..Default::default()
    /// };
    /// let resolver = PathResolver::from_config(&config);
    /// assert_eq!(resolver.resolve("////some/path", None).unwrap(), "/some/path");
    /// ```
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_syntax(config.platform().syntax(config.leading_slashes()))
            .with_users(PasswdFile::new(config.passwd_file()))
    }

    /// Use a different path syntax.
    #[must_use]
    pub fn with_syntax(mut self, syntax: Box<dyn PathSyntax>) -> Self {
        self.syntax = syntax;
        self
    }

    /// Read variables and the working directory from `env` instead of the
    /// process.
    #[must_use]
    pub fn with_env(mut self, env: impl Env + Send + Sync + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Look up `~name` homes in `users`.
    #[must_use]
    pub fn with_users(mut self, users: impl UserDirectory + 'static) -> Self {
        self.users = Box::new(users);
        self
    }

    /// The path syntax in use.
    #[must_use]
    pub fn syntax(&self) -> &dyn PathSyntax {
        self.syntax.as_ref()
    }

    /// Resolve `path` against `base`, or against the current directory when
    /// `base` is `None`.
    ///
    /// A relative `base` is itself resolved against the current directory,
    /// and may use `~`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `~` expansion fails (no home, unknown user)
    /// - the current directory is needed but unavailable or not UTF-8
    pub fn resolve(&self, path: &str, base: Option<&str>) -> Result<String> {
        let path = self.syntax.canonical(path);
        if path.is_empty() {
            return self.resolve_base(base);
        }

        let expanded = expand_tilde(
            &path,
            self.syntax.as_ref(),
            self.env.as_ref(),
            self.users.as_ref(),
        )?;
        let absolute = if self.syntax.is_absolute(&expanded) {
            expanded.into_owned()
        } else {
            let base = self.resolve_base(base)?;
            self.syntax.anchor(&expanded, &base)
        };

        let resolved = normalize(self.syntax.as_ref(), &absolute)?;
        log::trace!("resolved '{path}' (base {base:?}) to '{resolved}'");
        Ok(resolved)
    }

    /// Resolve any path-like value against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if `path` is not textual, otherwise as
    /// [`PathResolver::resolve`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathstream::path::PathResolver;
    /// use std::path::Path;
    ///
    /// let resolver = PathResolver::new();
    /// let cwd = resolver.expand(".").unwrap();
    /// assert_eq!(resolver.expand(Path::new("")).unwrap(), cwd);
    /// ```
    pub fn expand<P: ToPath + ?Sized>(&self, path: &P) -> Result<String> {
        self.resolve(&path.to_path()?, None)
    }

    /// Resolve any path-like value against a path-like base.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if either input is not textual, otherwise as
    /// [`PathResolver::resolve`].
    pub fn expand_from<P, B>(&self, path: &P, base: &B) -> Result<String>
    where
        P: ToPath + ?Sized,
        B: ToPath + ?Sized,
    {
        let base = base.to_path()?;
        self.resolve(&path.to_path()?, Some(base.as_ref()))
    }

    /// The current working directory, normalized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the directory cannot be determined
    /// or is not valid UTF-8.
    pub fn current_dir(&self) -> Result<String> {
        let cwd = self.env.current_dir().map_err(|e| Error::InvalidPath {
            path: PathBuf::from("."),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        let cwd = cwd.to_str().ok_or_else(|| Error::InvalidPath {
            path: cwd.clone(),
            reason: "Current directory contains invalid UTF-8".to_string(),
        })?;
        normalize(self.syntax.as_ref(), &self.syntax.canonical(cwd))
    }

    fn resolve_base(&self, base: Option<&str>) -> Result<String> {
        match base {
            Some(base) => self.resolve(base, None),
            None => self.current_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::syntax::{PosixSyntax, WindowsSyntax};
    use crate::path::test_util::FakeEnv;
    use crate::ErrorKind;
    use std::collections::HashMap;

    const CWD: &str = "/work/project";
    const HOME: &str = "/home/gumby";

    fn users() -> HashMap<String, String> {
        let mut users = HashMap::new();
        users.insert("gumby".to_string(), HOME.to_string());
        users.insert("pokey".to_string(), "/home/pokey".to_string());
        users
    }

    fn resolver() -> PathResolver {
        PathResolver::new()
            .with_syntax(Box::new(PosixSyntax::default()))
            .with_env(FakeEnv::new(CWD).home(HOME).var("USER", "gumby"))
            .with_users(users())
    }

    fn resolve(path: &str, base: Option<&str>) -> String {
        resolver().resolve(path, base).unwrap()
    }

    #[test]
    fn test_empty_is_cwd() {
        assert_eq!(resolve("", None), CWD);
        assert_eq!(resolve("", Some("/tmp")), "/tmp");
    }

    #[test]
    fn test_relative_against_cwd() {
        assert_eq!(resolve("a", None), "/work/project/a");
        assert_eq!(resolve(".", None), CWD);
        assert_eq!(resolve("./////", None), CWD);
        assert_eq!(resolve("..", None), "/work");
    }

    #[test]
    fn test_dotted_names_are_ordinary() {
        assert_eq!(resolve(".a", None), "/work/project/.a");
        assert_eq!(resolve("..a", None), "/work/project/..a");
        assert_eq!(resolve("a../b", None), "/work/project/a../b");
        assert_eq!(resolve("a.", None), "/work/project/a.");
        assert_eq!(resolve("a..", None), "/work/project/a..");
    }

    #[test]
    fn test_complete_base() {
        assert_eq!(resolve("a", Some("/tmp")), "/tmp/a");
        assert_eq!(resolve("../a", Some("/tmp/xxx")), "/tmp/a");
        assert_eq!(resolve(".", Some("/")), "/");
        assert_eq!(resolve("..", Some("/")), "/");
    }

    #[test]
    fn test_parent_segments_clamp_at_root() {
        assert_eq!(resolve("../../bin", Some("/tmp/x")), "/bin");
        assert_eq!(resolve("../../bin", Some("/tmp")), "/bin");
        assert_eq!(resolve("../../bin", Some("/")), "/bin");
        assert_eq!(resolve("/tmp/../../../tmp", None), "/tmp");
    }

    #[test]
    fn test_relative_base_resolves_against_cwd() {
        assert_eq!(resolve("../bin", Some("tmp/x")), "/work/project/tmp/bin");
        assert_eq!(resolve("../bin", Some("x/../tmp")), "/work/project/bin");
    }

    #[test]
    fn test_absolute_paths() {
        assert_eq!(resolve("/tmp/", None), "/tmp");
        assert_eq!(resolve(CWD, None), CWD);
        assert_eq!(resolve("/./dir", None), "/dir");
        assert_eq!(resolve("/some////path", None), "/some/path");
    }

    #[test]
    fn test_leading_slashes_follow_policy() {
        assert_eq!(resolve("////some/path", None), "////some/path");
        assert_eq!(resolve("//a/b", None), "//a/b");

        let collapsing = resolver()
            .with_syntax(Box::new(PosixSyntax::new(LeadingSlashPolicy::Collapse)));
        assert_eq!(
            collapsing.resolve("////some/path", None).unwrap(),
            "/some/path"
        );
    }

    #[test]
    fn test_home_expansion() {
        assert_eq!(resolve("~", None), HOME);
        assert_eq!(resolve("~", Some("/tmp/gumby/ddd")), HOME);
        assert_eq!(resolve("~/a", Some("/tmp/gumby/ddd")), "/home/gumby/a");
        assert_eq!(resolve("~/", None), HOME);
        assert_eq!(resolve("~/..badfilename", None), "/home/gumby/..badfilename");
    }

    #[test]
    fn test_home_as_base() {
        assert_eq!(resolve("~/a", Some("~/b")), "/home/gumby/a");
        assert_eq!(resolve("../foo", Some("~/dir")), "/home/gumby/foo");
    }

    #[test]
    fn test_named_user_expansion() {
        assert_eq!(resolve("~gumby", None), HOME);
        assert_eq!(resolve("~gumby/a", None), "/home/gumby/a");
        assert_eq!(resolve("~pokey/../x", None), "/home/x");
    }

    #[test]
    fn test_tilde_not_at_start_is_literal() {
        assert_eq!(resolve("/~gumby/a", None), "/~gumby/a");
        assert_eq!(resolve("a/~", None), "/work/project/a/~");
    }

    #[test]
    fn test_unknown_user_is_invalid_argument() {
        let err = resolver().resolve("~a_not_existing_user", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_home_unset_is_invalid_path() {
        let resolver = resolver().with_env(FakeEnv::new(CWD));
        assert_eq!(
            resolver.resolve("~", None).unwrap_err().kind(),
            ErrorKind::InvalidPath
        );
        assert_eq!(
            resolver.resolve("~/", None).unwrap_err().kind(),
            ErrorKind::InvalidPath
        );
        // Paths that don't need HOME still resolve.
        assert_eq!(resolver.resolve("a", None).unwrap(), "/work/project/a");
    }

    #[test]
    fn test_home_empty_is_invalid_path() {
        let resolver = resolver().with_env(FakeEnv::new(CWD).home(""));
        assert_eq!(
            resolver.resolve("~", None).unwrap_err().kind(),
            ErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_missing_cwd_is_invalid_path() {
        let resolver = resolver().with_env(FakeEnv::new(CWD).without_cwd());
        assert_eq!(
            resolver.resolve("a", None).unwrap_err().kind(),
            ErrorKind::InvalidPath
        );
        // An absolute path never needs the working directory.
        assert_eq!(resolver.resolve("/a", None).unwrap(), "/a");
    }

    #[test]
    fn test_input_is_not_modified() {
        let input = String::from("./a/b/../c");
        let resolved = resolver().expand_from(&input, CWD).unwrap();
        assert_eq!(resolved, "/work/project/a/c");
        assert_eq!(input, "./a/b/../c");

        let home_input = String::from("~/a");
        assert_eq!(resolver().expand(&home_input).unwrap(), "/home/gumby/a");
        assert_eq!(home_input, "~/a");
    }

    #[test]
    fn test_expand_accepts_path_like() {
        let resolver = resolver();
        assert_eq!(
            resolver
                .expand_from(std::path::Path::new("a"), &PathBuf::from("/tmp"))
                .unwrap(),
            "/tmp/a"
        );
    }

    #[test]
    fn test_windows_syntax() {
        let resolver = PathResolver::new()
            .with_syntax(Box::new(WindowsSyntax))
            .with_env(FakeEnv::new(r"C:\work\project").home(r"C:\Users\gumby"))
            .with_users(users());

        assert_eq!(resolver.resolve("", None).unwrap(), "C:/work/project");
        assert_eq!(resolver.resolve("C:/./dir", None).unwrap(), "C:/dir");
        assert_eq!(resolver.resolve(r"a\b\..\c", None).unwrap(), "C:/work/project/a/c");
        assert_eq!(resolver.resolve("/tmp", None).unwrap(), "C:/tmp");
        assert_eq!(resolver.resolve("~", None).unwrap(), "C:/Users/gumby");
        assert_eq!(resolver.resolve("..", Some("c:/")).unwrap(), "c:/");
        assert_eq!(resolver.resolve("a", Some("//srv/share")).unwrap(), "//srv/share/a");
    }

    #[test]
    fn test_debug_does_not_require_env_debug() {
        let debug = format!("{:?}", resolver());
        assert!(debug.contains("PathResolver"));
        assert!(debug.contains("PosixSyntax"));
    }

    // Property-based tests
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn relative_path_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    Just(".".to_string()),
                    Just("..".to_string()),
                    "[a-zA-Z0-9_.~-]{1,10}".prop_map(|s| s),
                ],
                1..=6,
            )
            .prop_map(|parts| parts.join("/"))
            .prop_filter("tilde prefix", |s| !s.starts_with('~'))
        }

        fn base_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec("[a-z0-9_-]{1,10}", 0..=4)
                .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        proptest! {
            /// Relative paths resolve to absolute paths under the base's root
            #[test]
            fn relative_resolves_absolute(path in relative_path_strategy(), base in base_strategy()) {
                let resolved = resolver().resolve(&path, Some(base.as_str())).unwrap();
                prop_assert!(resolved.starts_with('/'));
                prop_assert!(!resolved.starts_with("//"));
            }

            /// Resolution is idempotent
            #[test]
            fn resolve_idempotent(path in relative_path_strategy(), base in base_strategy()) {
                let resolver = resolver();
                let once = resolver.resolve(&path, Some(base.as_str())).unwrap();
                let twice = resolver.resolve(&once, Some("/elsewhere")).unwrap();
                prop_assert_eq!(once, twice);
            }

            /// Resolving against a base never escapes upward past what `..` allows
            #[test]
            fn plain_names_stay_under_base(name in "[a-z0-9_-]{1,10}", base in base_strategy()) {
                let resolved = resolver().resolve(&name, Some(base.as_str())).unwrap();
                let expected = if base == "/" { format!("/{name}") } else { format!("{base}/{name}") };
                prop_assert_eq!(resolved, expected);
            }
        }
    }
}
