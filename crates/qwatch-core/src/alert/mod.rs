//! Audible alerts for newly matched queries.
//!
//! Best-effort: resolution, decoding and playback failures are logged as
//! [`AudioResolutionError`] and never propagate to the caller. `dispatch`
//! returns immediately; the work runs on the tokio runtime, with playback
//! on the blocking pool.

pub mod backends;
pub mod errors;
pub mod registry;
pub mod sources;
pub mod traits;

pub use errors::AudioResolutionError;
pub use sources::{LocalSoundSource, RemoteSoundSource, SoundSource};
pub use traits::AudioOutput;

use std::sync::Arc;

use qwatch_config::{QwatchConfig, SoundSourceKind};
use qwatch_paths::QwatchPaths;
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::api::BackendClient;
use crate::auth::SessionStore;
use crate::errors::QwatchError;

/// Plays the alert sound for one query. Fire-and-forget.
pub trait AlertDispatcher: Send + Sync + 'static {
    fn dispatch(&self, sound_id: &str);
}

/// An empty sound id means "use the default sound".
pub fn resolve_sound_id<'a>(sound_id: &'a str, default_sound: &'a str) -> &'a str {
    let trimmed = sound_id.trim();
    if trimmed.is_empty() {
        default_sound
    } else {
        trimmed
    }
}

/// Resolves sounds through a [`SoundSource`] and plays them through an
/// [`AudioOutput`].
pub struct AudioAlertDispatcher<S: SoundSource> {
    source: Arc<S>,
    output: Arc<dyn AudioOutput>,
    default_sound: String,
    volume: f32,
}

impl<S: SoundSource> AudioAlertDispatcher<S> {
    pub fn new(
        source: S,
        output: Arc<dyn AudioOutput>,
        default_sound: impl Into<String>,
        volume: f32,
    ) -> Self {
        Self {
            source: Arc::new(source),
            output,
            default_sound: default_sound.into(),
            volume,
        }
    }
}

impl<S: SoundSource> AlertDispatcher for AudioAlertDispatcher<S> {
    fn dispatch(&self, sound_id: &str) {
        let sound_id = resolve_sound_id(sound_id, &self.default_sound).to_string();

        let Ok(runtime) = Handle::try_current() else {
            warn!(
                event = "core.alert.dispatch_failed",
                sound_id = %sound_id,
                error = "no tokio runtime"
            );
            return;
        };

        info!(
            event = "core.alert.dispatch_started",
            sound_id = %sound_id,
            source = self.source.name(),
            output = self.output.name()
        );

        let source = Arc::clone(&self.source);
        let output = Arc::clone(&self.output);
        let volume = self.volume;
        runtime.spawn(async move {
            match play(source.as_ref(), output, &sound_id, volume).await {
                Ok(()) => info!(event = "core.alert.dispatch_completed", sound_id = %sound_id),
                Err(e) => warn!(
                    event = "core.alert.dispatch_failed",
                    sound_id = %sound_id,
                    error = %e,
                    error_code = e.error_code()
                ),
            }
        });
    }
}

async fn play<S: SoundSource>(
    source: &S,
    output: Arc<dyn AudioOutput>,
    sound_id: &str,
    volume: f32,
) -> Result<(), AudioResolutionError> {
    let bytes = if output.uses_sound() {
        source.load(sound_id).await?
    } else {
        Vec::new()
    };
    let sound_id = sound_id.to_string();
    tokio::task::spawn_blocking(move || output.play(&sound_id, bytes, volume))
        .await
        .map_err(|e| AudioResolutionError::Output {
            message: format!("playback task failed: {e}"),
        })?
}

/// Used when alerts are disabled or muted: logs what would have played.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedDispatcher;

impl AlertDispatcher for MutedDispatcher {
    fn dispatch(&self, sound_id: &str) {
        info!(event = "core.alert.dispatch_muted", sound_id = sound_id);
    }
}

/// Build the dispatcher the `[alerts]` config asks for.
pub fn dispatcher_from_config(
    config: &QwatchConfig,
    client: &BackendClient,
    sessions: &SessionStore,
    paths: &QwatchPaths,
) -> Arc<dyn AlertDispatcher> {
    if !config.alerts.enabled() {
        return Arc::new(MutedDispatcher);
    }

    let Some(output) = registry::detect_output() else {
        warn!(
            event = "core.alert.dispatcher_degraded",
            error = %AudioResolutionError::NoOutput
        );
        return Arc::new(MutedDispatcher);
    };

    let default_sound = config.alerts.default_sound().to_string();
    let volume = config.alerts.volume();
    // Local sounds are read from here; remote ones are cached here.
    let dir = config
        .alerts
        .sounds_dir
        .clone()
        .unwrap_or_else(|| paths.sounds_dir());
    match config.alerts.source() {
        SoundSourceKind::Remote => Arc::new(AudioAlertDispatcher::new(
            RemoteSoundSource::new(client.clone(), sessions.clone(), dir),
            output,
            default_sound,
            volume,
        )),
        SoundSourceKind::Local => Arc::new(AudioAlertDispatcher::new(
            LocalSoundSource::new(dir, default_sound.clone()),
            output,
            default_sound,
            volume,
        )),
    }
}
