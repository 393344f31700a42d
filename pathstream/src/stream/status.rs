//! Child process termination status.
//!
//! Closing a pipe-backed handle waits for its child and records the result
//! twice: on the handle itself ([`FileHandle::exit_status`]) and in a single
//! process-wide slot read by [`last_status`]. The slot holds only the most
//! recent status; the next pipe close anywhere in the process overwrites it,
//! so read it immediately after the close you care about.
//!
//! [`FileHandle::exit_status`]: crate::stream::FileHandle::exit_status

use std::fmt;
use std::process::ExitStatus;
use std::sync::Mutex;

static LAST_STATUS: Mutex<Option<ProcessStatus>> = Mutex::new(None);

/// How a child process ended.
///
/// # Examples
///
/// ```
/// use pathstream::ProcessStatus;
///
/// let status = ProcessStatus::new(4242, Some(1), None);
/// assert_eq!(status.code(), Some(1));
/// assert!(!status.success());
/// assert_eq!(status.to_string(), "pid 4242 exit 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessStatus {
    pid: u32,
    code: Option<i32>,
    signal: Option<i32>,
}

impl ProcessStatus {
    /// Build a status from its parts.
    #[must_use]
    pub const fn new(pid: u32, code: Option<i32>, signal: Option<i32>) -> Self {
        Self { pid, code, signal }
    }

    /// Capture a waited child's status.
    #[must_use]
    pub fn from_exit_status(pid: u32, status: ExitStatus) -> Self {
        Self::new(pid, status.code(), terminating_signal(status))
    }

    /// The child's process id.
    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.pid
    }

    /// Exit code, if the child exited normally.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// Terminating signal, if the child was killed by one.
    #[must_use]
    pub const fn signal(&self) -> Option<i32> {
        self.signal
    }

    /// Whether the child exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "pid {} exit {code}", self.pid),
            (None, Some(signal)) => write!(f, "pid {} signal {signal}", self.pid),
            (None, None) => write!(f, "pid {} unknown status", self.pid),
        }
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

/// The status of the most recently closed pipe child in this process.
///
/// # Examples
///
/// ```no_run
/// use pathstream::{last_status, Access, StreamLifecycle};
///
/// let streams = StreamLifecycle::new();
/// let mut pipe = streams.popen("false", Access::Read).unwrap();
/// pipe.close().unwrap();
/// assert_eq!(last_status().unwrap().code(), Some(1));
/// ```
#[must_use]
pub fn last_status() -> Option<ProcessStatus> {
    *LAST_STATUS
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub(crate) fn record(status: ProcessStatus) {
    log::debug!("child {status}");
    *LAST_STATUS
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(status);
}
