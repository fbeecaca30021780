//! `~/.qwatch/session.json` storage.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use qwatch_paths::QwatchPaths;
use tracing::{debug, info};

use super::Session;
use super::errors::SessionError;

/// Load the persisted session, if any.
pub fn load_session(paths: &QwatchPaths) -> Result<Option<Session>, SessionError> {
    let path = paths.session_file();
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(event = "core.session.load_skipped", reason = "no session file");
            return Ok(None);
        }
        Err(source) => return Err(SessionError::Io { path, source }),
    };

    let session = serde_json::from_str(&content).map_err(|source| SessionError::Parse {
        path: path.clone(),
        source,
    })?;
    Ok(Some(session))
}

/// Persist a session, creating `~/.qwatch` if needed.
pub fn save_session(paths: &QwatchPaths, session: &Session) -> Result<(), SessionError> {
    let path = paths.session_file();
    let io_err = |source| SessionError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(paths.qwatch_dir()).map_err(io_err)?;
    let content = serde_json::to_string_pretty(session).map_err(|source| SessionError::Parse {
        path: path.clone(),
        source,
    })?;
    let mut file = open_private(&path).map_err(io_err)?;
    // An existing file keeps its old mode on open; tighten it before writing.
    restrict_permissions(&path).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;

    info!(
        event = "core.session.save_completed",
        username = %session.username
    );
    Ok(())
}

/// Remove the persisted session. Returns whether a file was removed.
pub fn clear_session(paths: &QwatchPaths) -> Result<bool, SessionError> {
    let path = paths.session_file();
    match fs::remove_file(&path) {
        Ok(()) => {
            info!(event = "core.session.clear_completed");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(SessionError::Io { path, source }),
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
