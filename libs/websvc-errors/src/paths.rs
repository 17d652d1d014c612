use std::path::{Path, PathBuf};

use crate::env::Environment;

/// Errors for normalizing configured directories
#[derive(Debug, thiserror::Error)]
pub enum HomeDirError {
    #[error("HOME environment variable is not set")]
    HomeMissing,
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8(String),
    #[error("failed to get current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

fn home(env: &dyn Environment) -> Result<String, HomeDirError> {
    #[cfg(target_os = "windows")]
    {
        env.var("USERPROFILE")
            .or_else(|| env.var("HOME"))
            .ok_or(HomeDirError::HomeMissing)
    }

    #[cfg(not(target_os = "windows"))]
    {
        env.var("HOME").ok_or(HomeDirError::HomeMissing)
    }
}

/// Expand `~` prefix to the user home directory taken from `env`.
///
/// Returns the path unchanged if no tilde prefix is present. `~user` forms
/// are not supported and are returned as-is.
///
/// # Errors
/// Returns `HomeDirError::HomeMissing` if expansion is needed but no home
/// directory is set.
pub fn expand_tilde(raw: &str, env: &dyn Environment) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return home(env).map(PathBuf::from);
    }
    let rest = raw.strip_prefix("~/");
    #[cfg(target_os = "windows")]
    let rest = rest.or_else(|| raw.strip_prefix("~\\"));

    match rest {
        Some(stripped) => Ok(Path::new(&home(env)?).join(stripped)),
        None => Ok(PathBuf::from(raw)),
    }
}

/// Normalize a configuration directory: expand `~` and anchor relative
/// paths at the current working directory.
///
/// The directory does not have to exist.
///
/// # Errors
/// Returns `HomeDirError` for non-UTF-8 paths, a missing home directory, or
/// an inaccessible working directory.
pub fn normalize_dir(dir: &Path, env: &dyn Environment) -> Result<PathBuf, HomeDirError> {
    let raw = dir
        .to_str()
        .ok_or_else(|| HomeDirError::NonUtf8(dir.to_string_lossy().into_owned()))?;
    let expanded = expand_tilde(raw, env)?;
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let cwd = std::env::current_dir().map_err(HomeDirError::CurrentDir)?;
    Ok(cwd.join(expanded))
}
