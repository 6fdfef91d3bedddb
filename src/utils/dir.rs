use std::{env, io, path::PathBuf};

use anyhow::Result;

/// Resolves the directory holding the habits file and logs. On Windows this
/// is `%APPDATA%/habitual`, elsewhere `$XDG_STATE_HOME/habitual` with a
/// fallback to `$HOME/.local/state/habitual`.
pub fn create_application_default_path() -> Result<PathBuf> {
    #[cfg(windows)]
    let base =
        PathBuf::from(env::var("APPDATA").expect("APPDATA should be present on Windows"));
    #[cfg(not(windows))]
    let base = env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            env::var("HOME").map(|home| PathBuf::from(home).join(".local/state"))
        })
        .expect("Couldn't find neither XDG_STATE_HOME nor HOME");

    ensure_dir(base.join("habitual"))
}

pub fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(e) => Err(e.into()),
    }
}
