//! Audio output backends.

mod bell;
#[cfg(feature = "audio")]
mod rodio_output;

pub use bell::TerminalBellOutput;
#[cfg(feature = "audio")]
pub use rodio_output::RodioOutput;
