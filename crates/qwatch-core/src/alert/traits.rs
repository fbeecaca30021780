//! Audio output trait.

use super::errors::AudioResolutionError;

/// A way to make an alert audible.
///
/// `play` blocks until playback finishes; the dispatcher runs it on the
/// blocking pool.
pub trait AudioOutput: Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &'static str;

    /// Whether this output can be used on this machine.
    fn is_available(&self) -> bool;

    /// Whether `play` uses the sound bytes. When it does not, the sound is
    /// never resolved and `play` receives an empty buffer.
    fn uses_sound(&self) -> bool {
        true
    }

    /// Decode and play `bytes` once at `volume` (0.0 to 1.0).
    fn play(&self, sound_id: &str, bytes: Vec<u8>, volume: f32) -> Result<(), AudioResolutionError>;
}
