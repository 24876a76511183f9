use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, EnvelopeResult};

/// Exclusive upper bound for the sample rate.
pub const MAX_SAMPLE_RATE: u32 = 192_000;
/// Only mono and interleaved stereo are supported.
pub const MAX_CHANNELS: u32 = 2;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_CHANNELS: u32 = 2;
pub const DEFAULT_ATTACK_MS: f32 = 10.0;
pub const DEFAULT_RELEASE_MS: f32 = 100.0;

/// Construction parameters for an [`EnvelopeFollower`](super::EnvelopeFollower).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    #[serde(rename = "sampleRate")]
    pub sample_rate: u32,
    pub channels: u32,
    #[serde(rename = "attackMs")]
    pub attack_ms: f32,
    #[serde(rename = "releaseMs")]
    pub release_ms: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            attack_ms: DEFAULT_ATTACK_MS,
            release_ms: DEFAULT_RELEASE_MS,
        }
    }
}

impl EnvelopeConfig {
    pub fn new(sample_rate: u32, channels: u32, attack_ms: f32, release_ms: f32) -> Self {
        Self {
            sample_rate,
            channels,
            attack_ms,
            release_ms,
        }
    }

    pub fn from_json(json: &str) -> EnvelopeResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EnvelopeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> EnvelopeResult<String> {
        serde_json::to_string(self).map_err(|e| EnvelopeError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> EnvelopeResult<()> {
        validate_format(self.sample_rate, self.channels)?;
        validate_time("attack", self.attack_ms)?;
        validate_time("release", self.release_ms)?;
        Ok(())
    }
}

pub(crate) fn validate_format(sample_rate: u32, channels: u32) -> EnvelopeResult<()> {
    if sample_rate == 0 || sample_rate >= MAX_SAMPLE_RATE {
        return Err(EnvelopeError::InvalidSampleRate(sample_rate));
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(EnvelopeError::InvalidChannels(channels));
    }
    Ok(())
}

pub(crate) fn validate_time(name: &'static str, value: f32) -> EnvelopeResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EnvelopeError::InvalidTime { name, value });
    }
    Ok(())
}
