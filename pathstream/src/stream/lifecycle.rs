//! Opening, scoping and reopening streams.

use std::fmt;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::path::{PathResolver, ToPath};
use crate::stream::handle::{Backing, FileHandle};
use crate::stream::mode::{Access, OpenMode};
use crate::stream::spawn::{ShellSpawner, Spawner};

/// Opens [`FileHandle`]s over files and child processes.
///
/// File paths go through a [`PathResolver`] before being opened, so `~` and
/// relative paths behave as they do in resolution. Pipe targets are handed
/// to a [`Spawner`] unchanged.
///
/// # Examples
///
/// ```no_run
/// use pathstream::{Access, StreamLifecycle};
///
/// let streams = StreamLifecycle::new();
///
/// let text = streams
///     .with_open("~/notes.txt", Access::Read, |handle| handle.read_to_string())
///     .unwrap();
///
/// let mut pipe = streams.popen("date", Access::Read).unwrap();
/// let now = pipe.read_to_string().unwrap();
/// pipe.close().unwrap();
/// assert!(pipe.exit_status().unwrap().success());
/// # let _ = (text, now);
/// ```
pub struct StreamLifecycle {
    resolver: PathResolver,
    spawner: Box<dyn Spawner>,
}

impl fmt::Debug for StreamLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamLifecycle")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl Default for StreamLifecycle {
    fn default() -> Self {
        Self {
            resolver: PathResolver::default(),
            spawner: Box::new(ShellSpawner::default()),
        }
    }
}

impl StreamLifecycle {
    /// Resolve with the process environment and spawn through the default
    /// shell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration: resolver settings plus the configured shell.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let spawner = match config.shell() {
            Some(shell) => ShellSpawner::new(shell),
            None => ShellSpawner::default(),
        };
        Self::new()
            .with_resolver(PathResolver::from_config(config))
            .with_spawner(spawner)
    }

    /// Use `resolver` for file paths.
    #[must_use]
    pub fn with_resolver(mut self, resolver: PathResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Start pipe children with `spawner`.
    #[must_use]
    pub fn with_spawner(mut self, spawner: impl Spawner + 'static) -> Self {
        self.spawner = Box::new(spawner);
        self
    }

    /// The resolver used for file paths.
    #[must_use]
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Open `target` with `mode`.
    ///
    /// For file modes `target` is resolved and opened with the access's
    /// [`open_options`](Access::open_options). For pipe modes it is a command
    /// line.
    ///
    /// # Errors
    ///
    /// Returns resolution errors for file targets, and [`Error::Io`] if the
    /// file cannot be opened or the command cannot be started.
    ///
    /// [`Error::Io`]: crate::Error::Io
    pub fn open<P>(&self, target: &P, mode: impl Into<OpenMode>) -> Result<FileHandle>
    where
        P: ToPath + ?Sized,
    {
        let mode = mode.into();
        let (backing, path) = self.acquire(target, mode)?;
        Ok(FileHandle::new(backing, path, mode))
    }

    /// Start `command` and open a pipe to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the command cannot be
    /// started.
    pub fn popen(&self, command: &str, access: Access) -> Result<FileHandle> {
        self.open(command, OpenMode::pipe(access))
    }

    /// Open `target`, run `f` on the handle, then close it.
    ///
    /// The handle is closed whether `f` succeeds or fails, unless `f` closed
    /// it already. `f`'s error wins over a close error; when `f` succeeds a
    /// close error is returned instead of its value.
    ///
    /// # Errors
    ///
    /// Returns the open error, `f`'s error, or the close error.
    pub fn with_open<P, T, F>(&self, target: &P, mode: impl Into<OpenMode>, f: F) -> Result<T>
    where
        P: ToPath + ?Sized,
        F: FnOnce(&mut FileHandle) -> Result<T>,
    {
        let mut handle = self.open(target, mode)?;
        let outcome = f(&mut handle);
        let closed = if handle.is_closed() {
            Ok(())
        } else {
            handle.close()
        };
        match (outcome, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) | (Err(err), _) => Err(err),
        }
    }

    /// Point `handle` at `target`, releasing what it had open.
    ///
    /// The new target is opened first; if that fails `handle` is left as it
    /// was. A previous pipe child is waited for and its status recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamClosed`](crate::Error::StreamClosed) if
    /// `handle` is closed, otherwise as for [`open`](Self::open).
    pub fn reopen<P>(
        &self,
        handle: &mut FileHandle,
        target: &P,
        mode: impl Into<OpenMode>,
    ) -> Result<()>
    where
        P: ToPath + ?Sized,
    {
        if handle.is_closed() {
            return Err(Error::StreamClosed);
        }
        let mode = mode.into();
        let (backing, path) = self.acquire(target, mode)?;
        handle.replace(backing, path, mode)
    }

    fn acquire<P>(&self, target: &P, mode: OpenMode) -> Result<(Backing, String)>
    where
        P: ToPath + ?Sized,
    {
        if mode.is_pipe() {
            let command = target.to_path()?.into_owned();
            let child = self.spawner.spawn(&command, mode.access())?;
            return Ok((Backing::pipe(child), command));
        }

        let path = self.resolver.expand(target)?;
        log::debug!("opening {path:?} ({mode})");
        let file = mode.access().open_options().open(&path)?;
        Ok((Backing::File(file), path))
    }
}
