use thiserror::Error;

/// Errors raised by control-plane operations.
///
/// The render path never produces these; it substitutes silence instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("sample rate must be set before a frequency can be applied")]
    UnconfiguredSampleRate,

    #[error("sample rate must be positive")]
    InvalidSampleRate,

    #[error("frequency must be finite and positive, got {0}")]
    InvalidFrequency(f64),

    #[error("voice index {index} out of range (bank has {voices} voices)")]
    VoiceOutOfRange { index: usize, voices: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
