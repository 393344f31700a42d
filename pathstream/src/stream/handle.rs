//! The open-then-closed stream handle.

use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout};

use crate::error::{Error, Result};
use crate::stream::mode::OpenMode;
use crate::stream::status::{self, ProcessStatus};

/// What a handle reads from and writes to.
pub(crate) enum Backing {
    File(File),
    Pipe {
        child: Child,
        stdin: Option<ChildStdin>,
        stdout: Option<ChildStdout>,
    },
}

impl Backing {
    /// Wrap a freshly spawned child, taking ownership of its piped streams.
    pub(crate) fn pipe(mut child: Child) -> Self {
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        Self::Pipe {
            child,
            stdin,
            stdout,
        }
    }

    const fn kind(&self) -> BackingKind {
        match self {
            Self::File(_) => BackingKind::File,
            Self::Pipe { .. } => BackingKind::Pipe,
        }
    }

    /// Release the resource. Pipes drop both ends and wait for the child.
    fn release(self) -> Result<Option<ProcessStatus>> {
        match self {
            Self::File(file) => {
                drop(file);
                Ok(None)
            }
            Self::Pipe {
                mut child,
                stdin,
                stdout,
            } => {
                drop(stdin);
                drop(stdout);
                let pid = child.id();
                log::trace!("waiting for pid {pid}");
                let exit = child.wait()?;
                let status = ProcessStatus::from_exit_status(pid, exit);
                status::record(status);
                Ok(Some(status))
            }
        }
    }
}

/// Whether a handle reads a file or talks to a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackingKind {
    /// A regular file.
    File,
    /// A child process's stdin and/or stdout.
    Pipe,
}

/// Lifecycle state of a [`FileHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamState {
    /// Usable.
    Open,
    /// Released; only inspection is allowed.
    Closed,
}

impl Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// An open stream over a file or a child process.
///
/// A handle starts open and is closed exactly once by [`close`](Self::close).
/// After that every I/O operation, [`pid`](Self::pid) and `close` itself fail
/// with [`Error::StreamClosed`]; only [`is_closed`](Self::is_closed),
/// [`state`](Self::state), [`path`](Self::path), [`mode`](Self::mode),
/// [`backing_kind`](Self::backing_kind) and
/// [`exit_status`](Self::exit_status) keep working.
///
/// Dropping an open handle releases its descriptors but does not wait for a
/// pipe child; close pipes explicitly to collect their status.
///
/// # Examples
///
/// ```no_run
/// use pathstream::{Access, StreamLifecycle};
///
/// let streams = StreamLifecycle::new();
/// let mut handle = streams.open("/etc/hostname", Access::Read).unwrap();
/// let name = handle.read_to_string().unwrap();
/// handle.close().unwrap();
///
/// assert!(handle.is_closed());
/// assert!(handle.close().unwrap_err().is_closed_stream());
/// # let _ = name;
/// ```
pub struct FileHandle {
    backing: Option<Backing>,
    kind: BackingKind,
    path: String,
    mode: OpenMode,
    exit_status: Option<ProcessStatus>,
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("state", &self.state())
            .field("kind", &self.kind)
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("exit_status", &self.exit_status)
            .finish()
    }
}

impl FileHandle {
    pub(crate) fn new(backing: Backing, path: String, mode: OpenMode) -> Self {
        Self {
            kind: backing.kind(),
            backing: Some(backing),
            path,
            mode,
            exit_status: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> StreamState {
        if self.backing.is_some() {
            StreamState::Open
        } else {
            StreamState::Closed
        }
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.backing.is_none()
    }

    /// Resolved path for files, command line for pipes.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The mode the handle was opened (or last reopened) with.
    #[must_use]
    pub const fn mode(&self) -> OpenMode {
        self.mode
    }

    /// What the handle is backed by.
    #[must_use]
    pub const fn backing_kind(&self) -> BackingKind {
        self.kind
    }

    /// How the pipe child ended, once the handle has been closed or
    /// reopened onto another target.
    ///
    /// `None` for a handle that has only ever been backed by files.
    #[must_use]
    pub const fn exit_status(&self) -> Option<ProcessStatus> {
        self.exit_status
    }

    /// The child's process id for pipe handles, `None` for files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamClosed`] once the handle is closed.
    pub fn pid(&self) -> Result<Option<u32>> {
        match self.backing.as_ref().ok_or(Error::StreamClosed)? {
            Backing::File(_) => Ok(None),
            Backing::Pipe { child, .. } => Ok(Some(child.id())),
        }
    }

    /// Release the underlying resource.
    ///
    /// For pipes this closes both ends, blocks until the child exits and
    /// records its status on the handle and in
    /// [`last_status`](crate::stream::last_status).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamClosed`] if the handle is already closed, or
    /// [`Error::Io`] if waiting for the child fails. The handle is closed
    /// either way.
    pub fn close(&mut self) -> Result<()> {
        let backing = self.backing.take().ok_or(Error::StreamClosed)?;
        log::debug!("closing {} {:?}", self.mode, self.path);
        if let Some(status) = backing.release()? {
            self.exit_status = Some(status);
        }
        Ok(())
    }

    /// Close only the write end of a pipe, so the child sees end of input
    /// while its output can still be read. The handle stays open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamClosed`] when closed, and [`Error::Io`] when
    /// the handle is not a pipe with an open write end.
    pub fn close_write(&mut self) -> Result<()> {
        let writable = self.mode.writable();
        match self.backing.as_mut().ok_or(Error::StreamClosed)? {
            Backing::Pipe { stdin, .. } if writable && stdin.is_some() => {
                drop(stdin.take());
                log::debug!("closed write end of {:?}", self.path);
                Ok(())
            }
            _ => Err(not_opened_for("writing")),
        }
    }

    /// Read into `buf`, returning the number of bytes read (0 at end).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamClosed`] when closed, and [`Error::Io`] when
    /// the handle is not readable or the read fails.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.reader()?.read(buf)?)
    }

    /// Read everything up to end of stream, appending to `buf`.
    ///
    /// # Errors
    ///
    /// As for [`read`](Self::read).
    pub fn read_to_end(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        Ok(self.reader()?.read_to_end(buf)?)
    }

    /// Read the rest of the stream as UTF-8.
    ///
    /// # Errors
    ///
    /// As for [`read`](Self::read); invalid UTF-8 is an [`Error::Io`].
    pub fn read_to_string(&mut self) -> Result<String> {
        let mut text = String::new();
        self.reader()?.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Write from `buf`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamClosed`] when closed, and [`Error::Io`] when
    /// the handle is not writable or the write fails.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        Ok(self.writer()?.write(buf)?)
    }

    /// Write all of `buf`.
    ///
    /// # Errors
    ///
    /// As for [`write`](Self::write).
    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        Ok(self.writer()?.write_all(buf)?)
    }

    /// Write the display form of `value`.
    ///
    /// # Errors
    ///
    /// As for [`write`](Self::write).
    pub fn print(&mut self, value: impl Display) -> Result<()> {
        Ok(write!(self.writer()?, "{value}")?)
    }

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// As for [`write`](Self::write).
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.writer()?.flush()?)
    }

    /// Swap in a new backing, releasing the old one.
    ///
    /// The old pipe child, if any, is waited for and its status recorded.
    pub(crate) fn replace(&mut self, backing: Backing, path: String, mode: OpenMode) -> Result<()> {
        let old = self.backing.take().ok_or(Error::StreamClosed)?;
        log::debug!("reopening {:?} as {mode} {path:?}", self.path);

        self.kind = backing.kind();
        self.backing = Some(backing);
        self.path = path;
        self.mode = mode;
        if let Some(status) = old.release()? {
            self.exit_status = Some(status);
        }
        Ok(())
    }

    fn reader(&mut self) -> Result<&mut dyn Read> {
        let readable = self.mode.readable();
        let backing = self.backing.as_mut().ok_or(Error::StreamClosed)?;
        match backing {
            Backing::File(file) if readable => Ok(file),
            Backing::Pipe {
                stdout: Some(stdout),
                ..
            } if readable => Ok(stdout),
            _ => Err(not_opened_for("reading")),
        }
    }

    fn writer(&mut self) -> Result<&mut dyn Write> {
        let writable = self.mode.writable();
        let backing = self.backing.as_mut().ok_or(Error::StreamClosed)?;
        match backing {
            Backing::File(file) if writable => Ok(file),
            Backing::Pipe {
                stdin: Some(stdin), ..
            } if writable => Ok(stdin),
            _ => Err(not_opened_for("writing")),
        }
    }
}

fn not_opened_for(what: &str) -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("not opened for {what}"),
    ))
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(FileHandle::read(self, buf)?)
    }
}

impl Write for FileHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(FileHandle::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(FileHandle::flush(self)?)
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if let Some(Backing::Pipe { child, .. }) = &self.backing {
            log::debug!(
                "dropping open pipe to pid {} ({:?}) without waiting",
                child.id(),
                self.path
            );
        } else if self.backing.is_some() {
            log::debug!("dropping open handle {:?}", self.path);
        }
    }
}
