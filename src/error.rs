use std::fmt;

/// Result type shared by the follower, converter and timing checks.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    /// Sample rate outside `(0, 192000)`.
    InvalidSampleRate(u32),
    /// Channel count outside `1..=2`.
    InvalidChannels(u32),
    /// Negative or non-finite attack/release time.
    InvalidTime { name: &'static str, value: f32 },
    /// Serialized configuration could not be parsed.
    InvalidConfig(String),
    /// Source and destination buffers differ in length; nothing was written.
    SizeMismatch { source: usize, dest: usize },
    /// A measurement fell outside its tolerance band. Values are milliseconds
    /// for timing checks and linear level for the priming check.
    ToleranceExceeded {
        what: &'static str,
        expected: f32,
        measured: f32,
        tolerance: f32,
    },
}

impl EnvelopeError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EnvelopeError::InvalidSampleRate(_)
                | EnvelopeError::InvalidChannels(_)
                | EnvelopeError::InvalidTime { .. }
                | EnvelopeError::InvalidConfig(_)
        )
    }
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::InvalidSampleRate(rate) => {
                write!(f, "invalid sample rate {} (expected 0 < rate < 192000)", rate)
            }
            EnvelopeError::InvalidChannels(channels) => {
                write!(f, "invalid channel count {} (expected 1 or 2)", channels)
            }
            EnvelopeError::InvalidTime { name, value } => {
                write!(f, "invalid {} time {} ms", name, value)
            }
            EnvelopeError::InvalidConfig(msg) => write!(f, "invalid envelope config: {}", msg),
            EnvelopeError::SizeMismatch { source, dest } => write!(
                f,
                "size mismatch: {} source samples, {} destination samples",
                source, dest
            ),
            EnvelopeError::ToleranceExceeded {
                what,
                expected,
                measured,
                tolerance,
            } => write!(
                f,
                "{} {:.3} is outside {:.3} +/- {:.3}",
                what, measured, expected, tolerance
            ),
        }
    }
}

impl std::error::Error for EnvelopeError {}
