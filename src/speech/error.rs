//! Speech engine errors.

/// Errors a speech driver can report when asked to speak.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech engine is not available")]
    Unavailable,

    #[error("Unsupported speech rate {rate} (supported: {min}..={max})")]
    UnsupportedRate { rate: f64, min: f64, max: f64 },

    #[error("Speech engine failed: {0}")]
    Engine(String),
}
