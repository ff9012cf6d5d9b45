//! User supplied file paths (`--file` of export, import and backup).

use crate::errors::{AppError, AppResult};
use std::path::PathBuf;

/// Expands a leading `~` (alone or followed by a separator) to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(path),
    }
}

/// Export target: `~` expanded, then required to be absolute.
pub fn absolute_output_path(file: &str) -> AppResult<PathBuf> {
    let path = expand_tilde(file);
    if !path.is_absolute() {
        return Err(AppError::Export(format!(
            "output file path must be absolute: {}",
            file
        )));
    }
    Ok(path)
}
