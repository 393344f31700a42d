//! User home-directory lookup for `~name` expansion.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default location of the account database.
pub const DEFAULT_PASSWD_FILE: &str = "/etc/passwd";

/// Maps a user name to that user's home directory.
///
/// `Ok(None)` means the user does not exist; `Err` means the lookup itself
/// failed.
#[cfg_attr(test, mockall::automock)]
pub trait UserDirectory: Send + Sync {
    /// Look up the home directory of `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying account database cannot be read.
    fn home_dir(&self, user: &str) -> Result<Option<String>>;
}

/// Reads home directories from a `passwd(5)`-format file.
///
/// # Examples
///
/// ```no_run
/// use pathstream::path::{PasswdFile, UserDirectory};
///
/// let users = PasswdFile::system();
/// let home = users.home_dir("root").unwrap();
/// assert_eq!(home.as_deref(), Some("/root"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswdFile {
    path: PathBuf,
}

impl PasswdFile {
    /// Use the account database at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `/etc/passwd`.
    #[must_use]
    pub fn system() -> Self {
        Self::new(DEFAULT_PASSWD_FILE)
    }

    /// The file this directory reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finds `user`'s home directory in passwd-formatted `contents`.
    ///
    /// Lines are `name:password:uid:gid:gecos:home:shell`; blank lines and
    /// `#` comments are skipped, as are lines with too few fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathstream::path::PasswdFile;
    ///
    /// let db = "root:x:0:0:root:/root:/bin/sh\nalice:x:1000:1000::/home/alice:/bin/zsh\n";
    /// assert_eq!(PasswdFile::parse_home(db, "alice"), Some("/home/alice"));
    /// assert_eq!(PasswdFile::parse_home(db, "bob"), None);
    /// ```
    #[must_use]
    pub fn parse_home<'a>(contents: &'a str, user: &str) -> Option<&'a str> {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let fields: Vec<&str> = line.split(':').collect();
                (fields.len() >= 6).then(|| (fields[0], fields[5]))
            })
            .find_map(|(name, home)| (name == user).then_some(home))
    }
}

impl Default for PasswdFile {
    fn default() -> Self {
        Self::system()
    }
}

impl UserDirectory for PasswdFile {
    fn home_dir(&self, user: &str) -> Result<Option<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(
                    "account database {} not found; treating '{user}' as unknown",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::parse_home(&contents, user).map(str::to_string))
    }
}

/// A fixed user table, for embedding and tests.
impl UserDirectory for HashMap<String, String> {
    fn home_dir(&self, user: &str) -> Result<Option<String>> {
        Ok(self.get(user).cloned())
    }
}
