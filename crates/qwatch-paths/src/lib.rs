use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("home directory not found, set the $HOME environment variable")]
    HomeNotFound,
}

/// Centralized path construction for the `~/.qwatch/` directory layout.
///
/// Every file the client keeps between invocations lives under this
/// directory. Use `resolve()` in production code and `from_dir()` in tests.
#[derive(Debug, Clone)]
pub struct QwatchPaths {
    qwatch_dir: PathBuf,
}

impl QwatchPaths {
    /// Resolve paths from the user's home directory (`~/.qwatch`).
    pub fn resolve() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeNotFound)?;
        Ok(Self {
            qwatch_dir: home.join(".qwatch"),
        })
    }

    /// Create paths from an explicit base directory. Use in tests.
    pub fn from_dir(qwatch_dir: PathBuf) -> Self {
        Self { qwatch_dir }
    }

    /// The base `~/.qwatch` directory.
    pub fn qwatch_dir(&self) -> &Path {
        &self.qwatch_dir
    }

    pub fn user_config(&self) -> PathBuf {
        self.qwatch_dir.join("config.toml")
    }

    /// Persisted login, shared by separate CLI invocations.
    pub fn session_file(&self) -> PathBuf {
        self.qwatch_dir.join("session.json")
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.qwatch_dir.join("sounds")
    }
}
