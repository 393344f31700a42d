//! File and pipe stream lifecycle.
//!
//! # Key Concepts
//!
//! ## Handles
//!
//! A [`FileHandle`] is backed either by a regular file or by a child process
//! (a pipe). It moves through two states, open and closed, and never back:
//! closing twice is an error, as is any I/O after close.
//!
//! ## Pipes and exit status
//!
//! Closing a pipe waits for the child. Its [`ProcessStatus`] is kept on the
//! handle and in a process-wide slot read with [`last_status`].
//!
//! ## Scoped use
//!
//! [`StreamLifecycle::with_open`] closes the handle on every exit path.
//!
//! # Examples
//!
//! ```no_run
//! use pathstream::{Access, StreamLifecycle};
//!
//! let streams = StreamLifecycle::new();
//! let mut pipe = streams.popen("true", Access::Read).unwrap();
//! pipe.close().unwrap();
//! assert!(pipe.exit_status().unwrap().success());
//! ```

pub mod handle;
pub mod lifecycle;
pub mod mode;
pub mod spawn;
pub mod status;

// Re-export key types
pub use handle::{BackingKind, FileHandle, StreamState};
pub use lifecycle::StreamLifecycle;
pub use mode::{Access, OpenMode};
pub use spawn::{ShellSpawner, Spawner};
pub use status::{last_status, ProcessStatus};
