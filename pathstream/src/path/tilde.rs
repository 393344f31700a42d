//! Home-directory expansion.
//!
//! Only a `~` in the first position is special:
//! - `~` and `~/rest` expand to the current user's home from the environment
//! - `~name` and `~name/rest` expand to `name`'s home via a [`UserDirectory`]
//!
//! A `~` anywhere else is an ordinary character.

use std::borrow::Cow;
use std::path::PathBuf;

use home::env::Env;

use crate::error::{Error, Result};
use crate::path::syntax::PathSyntax;
use crate::path::users::UserDirectory;

/// Expand a leading `~` in a canonical path.
///
/// Paths that do not start with `~` are returned borrowed and unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - `~` or `~/` is used and no home variable is set, non-empty and absolute
///   ([`Error::InvalidPath`])
/// - `~name` names a user the directory does not know ([`Error::InvalidArgument`])
/// - `~name` names a user whose home is empty or relative ([`Error::InvalidPath`])
/// - the user directory lookup itself fails ([`Error::Io`])
pub fn expand_tilde<'a>(
    path: &'a str,
    syntax: &dyn PathSyntax,
    env: &dyn Env,
    users: &dyn UserDirectory,
) -> Result<Cow<'a, str>> {
    let Some(after_tilde) = path.strip_prefix('~') else {
        return Ok(Cow::Borrowed(path));
    };

    let (user, rest) = after_tilde
        .find('/')
        .map_or((after_tilde, ""), |idx| after_tilde.split_at(idx));

    let home = if user.is_empty() {
        env_home(path, syntax, env)?
    } else {
        user_home(path, user, syntax, users)?
    };

    log::trace!("expanded '{path}' with home '{home}'");
    Ok(Cow::Owned(join_home(&home, rest)))
}

fn env_home(path: &str, syntax: &dyn PathSyntax, env: &dyn Env) -> Result<String> {
    let variables = syntax.home_variables();
    let value = variables
        .iter()
        .filter_map(|name| env.var_os(name))
        .find(|value| !value.is_empty())
        .ok_or_else(|| Error::InvalidPath {
            path: PathBuf::from(path),
            reason: format!(
                "couldn't find home directory: {} not set",
                variables.join(" or ")
            ),
        })?;

    let home = value.into_string().map_err(|raw| Error::InvalidPath {
        path: PathBuf::from(path),
        reason: format!("home directory {} is not valid UTF-8", PathBuf::from(raw).display()),
    })?;

    let home = syntax.canonical(&home).into_owned();
    if !syntax.is_absolute(&home) {
        return Err(Error::InvalidPath {
            path: PathBuf::from(path),
            reason: format!("non-absolute home directory '{home}'"),
        });
    }
    Ok(home)
}

fn user_home(
    path: &str,
    user: &str,
    syntax: &dyn PathSyntax,
    users: &dyn UserDirectory,
) -> Result<String> {
    let home = users.home_dir(user)?.ok_or_else(|| Error::InvalidArgument {
        argument: path.to_string(),
        reason: format!("user {user} doesn't exist"),
    })?;

    let home = syntax.canonical(&home).into_owned();
    if !syntax.is_absolute(&home) {
        return Err(Error::InvalidPath {
            path: PathBuf::from(path),
            reason: format!("non-absolute home directory '{home}' for user {user}"),
        });
    }
    Ok(home)
}

fn join_home(home: &str, rest: &str) -> String {
    match rest.strip_prefix('/') {
        Some(tail) if home.ends_with('/') => format!("{home}{tail}"),
        _ => format!("{home}{rest}"),
    }
}
