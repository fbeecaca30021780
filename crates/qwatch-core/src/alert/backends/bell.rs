//! Terminal bell output. Always available; ignores the sound itself.

use std::io::Write;

use crate::alert::errors::AudioResolutionError;
use crate::alert::traits::AudioOutput;

pub struct TerminalBellOutput;

impl AudioOutput for TerminalBellOutput {
    fn name(&self) -> &'static str {
        "bell"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn uses_sound(&self) -> bool {
        false
    }

    fn play(
        &self,
        _sound_id: &str,
        _bytes: Vec<u8>,
        volume: f32,
    ) -> Result<(), AudioResolutionError> {
        if volume <= 0.0 {
            return Ok(());
        }
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(b"\x07")
            .and_then(|()| stdout.flush())
            .map_err(|e| AudioResolutionError::Output {
                message: format!("terminal bell: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_backend_name() {
        assert_eq!(TerminalBellOutput.name(), "bell");
    }

    #[test]
    fn bell_backend_always_available() {
        assert!(TerminalBellOutput.is_available());
    }

    #[test]
    fn bell_backend_ignores_sound() {
        assert!(!TerminalBellOutput.uses_sound());
    }

    #[test]
    fn bell_muted_volume_is_noop() {
        assert!(TerminalBellOutput.play("x", Vec::new(), 0.0).is_ok());
    }
}
