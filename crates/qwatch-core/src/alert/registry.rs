//! Registry of audio output backends.

use std::sync::{Arc, LazyLock};

use tracing::debug;

#[cfg(feature = "audio")]
use super::backends::RodioOutput;
use super::backends::TerminalBellOutput;
use super::traits::AudioOutput;

/// Global registry of all compiled-in audio outputs.
static REGISTRY: LazyLock<OutputRegistry> = LazyLock::new(OutputRegistry::new);

struct OutputRegistry {
    outputs: Vec<Arc<dyn AudioOutput>>,
}

impl OutputRegistry {
    fn new() -> Self {
        let mut outputs: Vec<Arc<dyn AudioOutput>> = Vec::new();
        #[cfg(feature = "audio")]
        outputs.push(Arc::new(RodioOutput));
        outputs.push(Arc::new(TerminalBellOutput));
        Self { outputs }
    }

    /// First output (in registration order) that reports itself available.
    fn detect(&self) -> Option<Arc<dyn AudioOutput>> {
        self.outputs.iter().find(|o| o.is_available()).cloned()
    }
}

/// Pick the output to play alerts through.
pub fn detect_output() -> Option<Arc<dyn AudioOutput>> {
    let output = REGISTRY.detect();
    debug!(
        event = "core.alert.output_detected",
        output = output.as_ref().map(|o| o.name()).unwrap_or("none")
    );
    output
}
