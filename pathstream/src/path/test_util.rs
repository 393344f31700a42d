//! Shared test utilities for path unit tests.
//!
//! This module provides a fake process environment so resolution can be
//! tested without touching the real `HOME` or working directory.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use home::env::Env;

/// An in-memory stand-in for the process environment.
#[derive(Debug, Clone, Default)]
pub struct FakeEnv {
    vars: HashMap<String, OsString>,
    cwd: Option<PathBuf>,
}

impl FakeEnv {
    /// An environment whose working directory is `cwd` and with no variables.
    #[must_use]
    pub fn new(cwd: &str) -> Self {
        Self {
            vars: HashMap::new(),
            cwd: Some(PathBuf::from(cwd)),
        }
    }

    /// Sets a variable.
    #[must_use]
    pub fn var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), OsString::from(value));
        self
    }

    /// Sets `HOME`.
    #[must_use]
    pub fn home(self, home: &str) -> Self {
        self.var("HOME", home)
    }

    /// Makes `current_dir` fail.
    #[must_use]
    pub fn without_cwd(mut self) -> Self {
        self.cwd = None;
        self
    }
}

impl Env for FakeEnv {
    fn home_dir(&self) -> Option<PathBuf> {
        self.vars.get("HOME").map(PathBuf::from)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        self.cwd
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "working directory removed"))
    }

    fn var_os(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }
}
