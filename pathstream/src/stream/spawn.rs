//! Starting the child process behind a pipe-backed stream.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::error::Result;
use crate::stream::mode::Access;

#[cfg(windows)]
const DEFAULT_SHELL: &str = "cmd";
#[cfg(windows)]
const DEFAULT_SHELL_FLAG: &str = "/C";

#[cfg(not(windows))]
const DEFAULT_SHELL: &str = "/bin/sh";
#[cfg(not(windows))]
const DEFAULT_SHELL_FLAG: &str = "-c";

/// Characters that make a command need the shell.
const SHELL_META_CHARS: &[char] = &[
    '*', '?', '[', ']', '{', '}', '<', '>', '(', ')', '~', '&', '|', '\\', '$', ';', '\'',
    '`', '"', '\n', '#', '=', '%',
];

/// Reserved words and builtins that have no program of their own.
const SHELL_WORDS: &[&str] = &[
    "!", ".", ":", "alias", "bg", "break", "case", "cd", "command", "continue", "do", "done",
    "elif", "else", "esac", "eval", "exec", "exit", "export", "fc", "fg", "fi", "for",
    "function", "getopts", "hash", "if", "in", "jobs", "local", "read", "readonly", "return",
    "select", "set", "shift", "then", "times", "trap", "type", "ulimit", "umask", "unalias",
    "unset", "until", "wait", "while",
];

/// Starts a command with its standard streams wired for `access`.
///
/// A readable pipe must pipe the child's stdout; a writable pipe must pipe
/// its stdin. Other streams are the implementor's choice.
#[cfg_attr(test, mockall::automock)]
pub trait Spawner: Send + Sync {
    /// Start `command`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the process cannot be
    /// started.
    fn spawn(&self, command: &str, access: Access) -> Result<Child>;
}

/// Runs commands through a shell (`/bin/sh -c` by default, `cmd /C` on
/// Windows).
///
/// On Unix a plain command (whitespace-separated words, no shell syntax, not
/// starting with a builtin) is started directly instead, so a child killed
/// by a signal reports that signal rather than the shell's `128 + n` exit
/// code. Anything else goes through the shell.
///
/// The child inherits stderr. When the stream is write-only the child also
/// inherits stdout; when it is read-only its stdin is null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSpawner {
    shell: PathBuf,
    flag: String,
}

impl Default for ShellSpawner {
    fn default() -> Self {
        Self {
            shell: PathBuf::from(DEFAULT_SHELL),
            flag: DEFAULT_SHELL_FLAG.to_string(),
        }
    }
}

impl ShellSpawner {
    /// Use `shell` with the platform's command flag.
    #[must_use]
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
            ..Self::default()
        }
    }

    /// Override the flag that precedes the command (`-c`, `/C`).
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = flag.into();
        self
    }

    /// The shell program.
    #[must_use]
    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// The command flag.
    #[must_use]
    pub fn flag(&self) -> &str {
        &self.flag
    }
}

/// Splits `command` into program and arguments when it can run without a
/// shell, or returns `None` when it needs one.
///
/// # Examples
///
/// ```
/// use pathstream::stream::spawn::direct_argv;
///
/// assert_eq!(direct_argv("tr a-z A-Z"), Some(vec!["tr", "a-z", "A-Z"]));
/// assert_eq!(direct_argv("exit 3"), None);
/// assert_eq!(direct_argv("ls | wc -l"), None);
/// ```
#[must_use]
pub fn direct_argv(command: &str) -> Option<Vec<&str>> {
    if command.contains(SHELL_META_CHARS) {
        return None;
    }
    let argv: Vec<&str> = command.split_whitespace().collect();
    match argv.first() {
        Some(program) if !SHELL_WORDS.contains(program) => Some(argv),
        _ => None,
    }
}

impl ShellSpawner {
    fn command(&self, command: &str) -> Command {
        if cfg!(unix) {
            if let Some(argv) = direct_argv(command) {
                let mut cmd = Command::new(argv[0]);
                cmd.args(&argv[1..]);
                return cmd;
            }
        }

        let mut cmd = Command::new(&self.shell);
        cmd.arg(&self.flag).arg(command);
        cmd
    }
}

impl Spawner for ShellSpawner {
    fn spawn(&self, command: &str, access: Access) -> Result<Child> {
        let mut cmd = self.command(command);
        cmd.stdin(if access.writable() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(if access.readable() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        let child = cmd.spawn()?;
        log::debug!(
            "spawned pid {} as {:?} {:?} ({access})",
            child.id(),
            cmd.get_program(),
            cmd.get_args().collect::<Vec<_>>()
        );
        Ok(child)
    }
}
