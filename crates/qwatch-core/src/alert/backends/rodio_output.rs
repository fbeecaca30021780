//! Decoded playback through the default output device.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, Sink};

use crate::alert::errors::AudioResolutionError;
use crate::alert::traits::AudioOutput;

pub struct RodioOutput;

impl AudioOutput for RodioOutput {
    fn name(&self) -> &'static str {
        "rodio"
    }

    fn is_available(&self) -> bool {
        OutputStream::try_default().is_ok()
    }

    fn play(
        &self,
        sound_id: &str,
        bytes: Vec<u8>,
        volume: f32,
    ) -> Result<(), AudioResolutionError> {
        // The stream is not Send; it lives and dies on this blocking thread.
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| AudioResolutionError::Output {
                message: format!("failed to open output stream: {e}"),
            })?;
        let sink = Sink::try_new(&handle).map_err(|e| AudioResolutionError::Output {
            message: format!("failed to create sink: {e}"),
        })?;
        let source = Decoder::new(Cursor::new(bytes)).map_err(|e| AudioResolutionError::Decode {
            sound_id: sound_id.to_string(),
            message: e.to_string(),
        })?;

        sink.set_volume(volume.clamp(0.0, 1.0));
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rodio_backend_name() {
        assert_eq!(RodioOutput.name(), "rodio");
    }

    #[test]
    fn rodio_rejects_garbage_bytes() {
        // Without an output device the error is Output instead of Decode.
        let result = RodioOutput.play("junk", b"not audio".to_vec(), 1.0);
        assert!(result.is_err());
    }
}
