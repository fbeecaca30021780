//! Where alert sound bytes come from.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::errors::AudioResolutionError;
use crate::api::BackendClient;
use crate::auth::SessionStore;

/// Resolves a sound identifier to encoded audio bytes.
pub trait SoundSource: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn load(
        &self,
        sound_id: &str,
    ) -> impl Future<Output = Result<Vec<u8>, AudioResolutionError>> + Send;
}

/// Path for a sound id inside `dir`. Only the final path component is used.
fn sound_path(dir: &Path, sound_id: &str) -> Result<PathBuf, AudioResolutionError> {
    Path::new(sound_id)
        .file_name()
        .map(|name| dir.join(name))
        .ok_or_else(|| AudioResolutionError::InvalidSoundId {
            sound_id: sound_id.to_string(),
        })
}

/// Downloads sounds from the backend's `/get_sound` endpoint.
///
/// Downloaded files are kept in `cache_dir` and read from there on later
/// alerts; the backend is only asked for sounds not cached yet.
#[derive(Debug, Clone)]
pub struct RemoteSoundSource {
    client: BackendClient,
    sessions: SessionStore,
    cache_dir: PathBuf,
}

impl RemoteSoundSource {
    pub fn new(client: BackendClient, sessions: SessionStore, cache_dir: PathBuf) -> Self {
        Self {
            client,
            sessions,
            cache_dir,
        }
    }
}

async fn store_cached(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    tokio::fs::write(&partial, bytes).await?;
    tokio::fs::rename(&partial, path).await
}

impl SoundSource for RemoteSoundSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn load(&self, sound_id: &str) -> Result<Vec<u8>, AudioResolutionError> {
        let path = sound_path(&self.cache_dir, sound_id)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(event = "core.alert.sound_cache_hit", sound_id = sound_id);
                return Ok(bytes);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => debug!(
                event = "core.alert.sound_cache_unreadable",
                path = %path.display(),
                error = %e
            ),
        }

        let Some(session) = self.sessions.current() else {
            return Err(AudioResolutionError::NoSession {
                sound_id: sound_id.to_string(),
            });
        };
        let bytes = self
            .client
            .sound(&session, sound_id)
            .await
            .map_err(|source| AudioResolutionError::Fetch {
                sound_id: sound_id.to_string(),
                source,
            })?;

        if let Err(e) = store_cached(&path, &bytes).await {
            warn!(
                event = "core.alert.sound_cache_failed",
                path = %path.display(),
                error = %e
            );
        }
        Ok(bytes)
    }
}

/// Reads sounds from a local directory.
///
/// A missing named file falls back to the default sound, so a query created
/// on another machine with a sound this one lacks still makes noise.
#[derive(Debug, Clone)]
pub struct LocalSoundSource {
    dir: PathBuf,
    default_sound: String,
}

impl LocalSoundSource {
    pub fn new(dir: PathBuf, default_sound: impl Into<String>) -> Self {
        Self {
            dir,
            default_sound: default_sound.into(),
        }
    }

    fn path_for(&self, sound_id: &str) -> Result<PathBuf, AudioResolutionError> {
        sound_path(&self.dir, sound_id)
    }
}

impl SoundSource for LocalSoundSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn load(&self, sound_id: &str) -> Result<Vec<u8>, AudioResolutionError> {
        let path = self.path_for(sound_id)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e)
                if e.kind() == std::io::ErrorKind::NotFound && sound_id != self.default_sound =>
            {
                debug!(
                    event = "core.alert.sound_fallback",
                    sound_id = sound_id,
                    default_sound = %self.default_sound
                );
                let path = self.path_for(&self.default_sound)?;
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| AudioResolutionError::Read { path, source })
            }
            Err(source) => Err(AudioResolutionError::Read { path, source }),
        }
    }
}
