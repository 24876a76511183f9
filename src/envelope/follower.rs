use log::debug;

use super::config::{validate_format, validate_time, EnvelopeConfig};
use crate::error::EnvelopeResult;
use crate::utils::time_to_coeff;

/// One-pole attack/release envelope follower over interleaved samples.
///
/// Sample rate and channel count are fixed for the lifetime of the follower;
/// attack and release targets can be changed at any time.
pub struct EnvelopeFollower {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: u32,
    channels: u32,
    attack_ms: f32,
    release_ms: f32,

    // Reused by every scan.
    pub(super) conversion_buffer: Vec<f32>,
    pub(super) history_enabled: bool,
    pub(super) history: Vec<f32>,
}

impl EnvelopeFollower {
    pub fn new(
        sample_rate: u32,
        channels: u32,
        attack_ms: f32,
        release_ms: f32,
    ) -> EnvelopeResult<Self> {
        validate_format(sample_rate, channels)?;
        validate_time("attack", attack_ms)?;
        validate_time("release", release_ms)?;
        Ok(Self::build(sample_rate, channels, attack_ms, release_ms))
    }

    // Parameters must already be validated.
    fn build(sample_rate: u32, channels: u32, attack_ms: f32, release_ms: f32) -> Self {
        let attack_coeff = time_to_coeff(attack_ms, sample_rate, channels);
        let release_coeff = time_to_coeff(release_ms, sample_rate, channels);
        debug!(
            "envelope follower: {} Hz, {} ch, attack {} ms (coef {}), release {} ms (coef {})",
            sample_rate, channels, attack_ms, attack_coeff, release_ms, release_coeff
        );

        Self {
            envelope: 0.0,
            attack_coeff,
            release_coeff,
            sample_rate,
            channels,
            attack_ms,
            release_ms,
            conversion_buffer: Vec::new(),
            history_enabled: false,
            history: Vec::new(),
        }
    }

    pub fn from_config(config: &EnvelopeConfig) -> EnvelopeResult<Self> {
        Self::new(
            config.sample_rate,
            config.channels,
            config.attack_ms,
            config.release_ms,
        )
    }

    pub fn config(&self) -> EnvelopeConfig {
        EnvelopeConfig::new(
            self.sample_rate,
            self.channels,
            self.attack_ms,
            self.release_ms,
        )
    }

    /// Feeds one sample through the filter and returns the new envelope value.
    ///
    /// Rising input uses the attack coefficient; falling or steady input uses
    /// the release coefficient.
    #[inline]
    pub fn update(&mut self, sample: f32) -> f32 {
        let rectified = sample.abs();
        let coeff = if self.envelope < rectified {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = rectified + coeff * (self.envelope - rectified);
        self.envelope
    }

    pub fn set_attack_ms(&mut self, attack_ms: f32) -> EnvelopeResult<()> {
        validate_time("attack", attack_ms)?;
        self.attack_ms = attack_ms;
        self.attack_coeff = time_to_coeff(attack_ms, self.sample_rate, self.channels);
        debug!("attack set to {} ms (coef {})", attack_ms, self.attack_coeff);
        Ok(())
    }

    pub fn set_release_ms(&mut self, release_ms: f32) -> EnvelopeResult<()> {
        validate_time("release", release_ms)?;
        self.release_ms = release_ms;
        self.release_coeff = time_to_coeff(release_ms, self.sample_rate, self.channels);
        debug!("release set to {} ms (coef {})", release_ms, self.release_coeff);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    pub fn value(&self) -> f32 {
        self.envelope
    }

    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    pub fn attack_coeff(&self) -> f32 {
        self.attack_coeff
    }

    pub fn release_coeff(&self) -> f32 {
        self.release_coeff
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Record every envelope value produced by subsequent scans.
    pub fn set_history_enabled(&mut self, enabled: bool) {
        self.history_enabled = enabled;
        if !enabled {
            self.history.clear();
        }
    }

    /// Envelope values from the most recent scan, up to the stop sample.
    pub fn history(&self) -> &[f32] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl EnvelopeFollower {
    /// Forces the envelope to `value` ("hard gate"). Test setup only.
    pub fn hard_gate(&mut self, value: f32) {
        self.envelope = value;
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        let config = EnvelopeConfig::default();
        Self::build(
            config.sample_rate,
            config.channels,
            config.attack_ms,
            config.release_ms,
        )
    }
}
