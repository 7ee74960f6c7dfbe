//! Tool path resolution and validation.
//!
//! The tool is given either as a shorthand name, looked up on `PATH`, or as
//! an explicit path (anything containing `/` or starting with `~`).

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Errors that can occur while locating the tool
#[derive(Debug, thiserror::Error)]
pub enum BinaryError {
    #[error("Binary not found: {path}")]
    NotFound { path: String },

    #[error("Binary is not executable: {path}")]
    NotExecutable { path: String },

    #[error("Cannot determine home directory")]
    NoHomeDir,

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

/// Get the user's home directory from the HOME environment variable
fn get_home_dir() -> Result<PathBuf, BinaryError> {
    env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| BinaryError::NoHomeDir)
}

fn is_explicit(name_or_path: &str) -> bool {
    name_or_path.contains('/') || name_or_path.starts_with('~')
}

/// Expand a leading `~` or `~/` in an explicit path.
///
/// `~user` forms are rejected rather than guessed at.
fn expand_tilde(path: &str) -> Result<PathBuf, BinaryError> {
    match path.strip_prefix('~') {
        Some("") => get_home_dir(),
        Some(rest) if rest.starts_with('/') => {
            let home_dir = get_home_dir()?;
            Ok(home_dir.join(rest.trim_start_matches('/')))
        }
        Some(_) => Err(BinaryError::InvalidPath {
            path: path.to_string(),
        }),
        None => Ok(PathBuf::from(path)),
    }
}

/// Resolve the tool from a shorthand name or explicit path.
///
/// Resolution rules:
/// 1. Explicit paths are returned with `~` expanded and must exist
/// 2. Shorthand names resolve to the first executable match on `search_path`
///
/// ```ignore
/// resolve_tool("prosynar", env::var_os("PATH").as_deref())  // -> /usr/local/bin/prosynar
/// resolve_tool("~/bin/prosynar", None)                     // -> /home/user/bin/prosynar
/// ```
pub fn resolve_tool(name_or_path: &str, search_path: Option<&OsStr>) -> Result<PathBuf, BinaryError> {
    if name_or_path.is_empty() {
        return Err(BinaryError::InvalidPath {
            path: name_or_path.to_string(),
        });
    }

    if is_explicit(name_or_path) {
        let path = expand_tilde(name_or_path)?;
        validate_binary(&path)?;
        return Ok(path);
    }

    let candidates = search_path
        .map(|paths| env::split_paths(paths).map(|dir| dir.join(name_or_path)).collect::<Vec<_>>())
        .unwrap_or_default();

    let mut not_executable = None;
    for candidate in candidates {
        match validate_binary(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(BinaryError::NotExecutable { path }) => {
                not_executable.get_or_insert(path);
            }
            Err(_) => continue,
        }
    }

    Err(match not_executable {
        Some(path) => BinaryError::NotExecutable { path },
        None => BinaryError::NotFound {
            path: name_or_path.to_string(),
        },
    })
}

/// Validate that a binary exists and is executable.
pub fn validate_binary(path: &Path) -> Result<(), BinaryError> {
    if !path.is_file() {
        return Err(BinaryError::NotFound {
            path: path.display().to_string(),
        });
    }

    let metadata = path.metadata().map_err(|_| BinaryError::InvalidPath {
        path: path.display().to_string(),
    })?;

    if !is_executable(&metadata) {
        return Err(BinaryError::NotExecutable {
            path: path.display().to_string(),
        });
    }

    Ok(())
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    // Any execute bit
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}
