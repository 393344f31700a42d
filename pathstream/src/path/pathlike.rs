//! Path-like input.
//!
//! Anything that can present itself as a textual path implements [`ToPath`].
//! Resolution and opening accept `&impl ToPath` rather than inspecting the
//! input's concrete type; inputs that cannot produce UTF-8 text fail with
//! [`Error::Type`].

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The capability to produce a textual path.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use pathstream::path::ToPath;
///
/// struct Fixture {
///     dir: String,
/// }
///
/// impl ToPath for Fixture {
///     fn to_path(&self) -> pathstream::Result<Cow<'_, str>> {
///         Ok(Cow::Borrowed(&self.dir))
///     }
/// }
///
/// let fixture = Fixture { dir: "/tmp/fixture".to_string() };
/// assert_eq!(fixture.to_path().unwrap(), "/tmp/fixture");
/// ```
pub trait ToPath {
    /// Returns the textual path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if the value has no textual path form.
    fn to_path(&self) -> Result<Cow<'_, str>>;
}

impl ToPath for str {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl ToPath for String {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self.as_str()))
    }
}

impl ToPath for Cow<'_, str> {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self.as_ref()))
    }
}

impl ToPath for OsStr {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        self.to_str().map(Cow::Borrowed).ok_or_else(|| Error::Type {
            reason: format!("{} is not a textual path (invalid UTF-8)", self.to_string_lossy()),
        })
    }
}

impl ToPath for OsString {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        self.as_os_str().to_path()
    }
}

impl ToPath for Path {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        self.as_os_str().to_path()
    }
}

impl ToPath for PathBuf {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        self.as_os_str().to_path()
    }
}

impl<T: ToPath + ?Sized> ToPath for &T {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        (**self).to_path()
    }
}

impl<T: ToPath + ?Sized> ToPath for Box<T> {
    fn to_path(&self) -> Result<Cow<'_, str>> {
        (**self).to_path()
    }
}
