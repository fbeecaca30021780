//! Alert sound error types.

use std::path::PathBuf;

use crate::api::ApiError;
use crate::errors::QwatchError;

/// Why an alert sound could not be played.
///
/// Always caught at the dispatch boundary and logged; it never reaches the
/// poller.
#[derive(Debug, thiserror::Error)]
pub enum AudioResolutionError {
    #[error("Failed to fetch sound '{sound_id}': {source}")]
    Fetch {
        sound_id: String,
        #[source]
        source: ApiError,
    },

    #[error("Cannot fetch sound '{sound_id}' without a session")]
    NoSession { sound_id: String },

    #[error("Invalid sound id '{sound_id}'")]
    InvalidSoundId { sound_id: String },

    #[error("Failed to read sound file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode sound '{sound_id}': {message}")]
    Decode { sound_id: String, message: String },

    #[error("Audio output failed: {message}")]
    Output { message: String },

    #[error("No audio output available")]
    NoOutput,
}

impl QwatchError for AudioResolutionError {
    fn error_code(&self) -> &'static str {
        match self {
            AudioResolutionError::Fetch { .. } => "SOUND_FETCH_FAILED",
            AudioResolutionError::NoSession { .. } => "SOUND_NO_SESSION",
            AudioResolutionError::InvalidSoundId { .. } => "SOUND_INVALID_ID",
            AudioResolutionError::Read { .. } => "SOUND_READ_FAILED",
            AudioResolutionError::Decode { .. } => "SOUND_DECODE_FAILED",
            AudioResolutionError::Output { .. } => "AUDIO_OUTPUT_FAILED",
            AudioResolutionError::NoOutput => "AUDIO_NO_OUTPUT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            AudioResolutionError::InvalidSoundId { .. } | AudioResolutionError::Read { .. }
        )
    }
}
