//! Checks that configured attack/release times are honored.
//!
//! A full-scale step is fed through a fresh follower and the scan stops at
//! one time constant; the crossing position is converted to milliseconds and
//! compared with the configured time.

use log::{info, warn};

use crate::audio::PcmBuffer;
use crate::envelope::config::{validate_format, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
use crate::envelope::EnvelopeFollower;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::utils::{samples_to_ms, seconds_to_samples};

/// Level reached after one time constant of a step from 0 toward 1,
/// as in an RC circuit charging (`1 - 1/e`).
pub const ONE_TIME_CONSTANT_RISE: f32 = 0.632;
/// Level left after one time constant of decay from 1 toward 0,
/// as in an RC circuit discharging (`1/e`).
pub const ONE_TIME_CONSTANT_DECAY: f32 = 0.368;

/// Allowed relative deviation from the configured time.
pub const TIMING_TOLERANCE: f32 = 0.10;
/// Full-scale signal run before a release measurement.
pub const PRIMING_SECONDS: u32 = 1;
/// How close to 1.0 the envelope must be after priming.
pub const PRIMING_TOLERANCE: f32 = 1e-3;

pub const DEFAULT_BUFFER_SECONDS: u32 = 30;

const FULL_SCALE: i16 = i16::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingMeasurement {
    pub expected_ms: f32,
    pub measured_ms: f32,
    /// Sample index at which the sentinel fired.
    pub position: usize,
}

impl TimingMeasurement {
    pub fn deviation_ms(&self) -> f32 {
        (self.measured_ms - self.expected_ms).abs()
    }

    pub fn tolerance_ms(&self) -> f32 {
        self.expected_ms * TIMING_TOLERANCE
    }

    pub fn within_tolerance(&self) -> bool {
        self.deviation_ms() <= self.tolerance_ms()
    }

    fn check(self, what: &'static str) -> EnvelopeResult<Self> {
        if self.within_tolerance() {
            info!(
                "{}: measured {:.3} ms, expected {:.3} ms",
                what, self.measured_ms, self.expected_ms
            );
            Ok(self)
        } else {
            warn!(
                "{}: measured {:.3} ms, expected {:.3} ms +/- {:.3} ms",
                what,
                self.measured_ms,
                self.expected_ms,
                self.tolerance_ms()
            );
            Err(EnvelopeError::ToleranceExceeded {
                what,
                expected: self.expected_ms,
                measured: self.measured_ms,
                tolerance: self.tolerance_ms(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingReport {
    pub attack: TimingMeasurement,
    pub release: TimingMeasurement,
}

/// Runs synthetic step signals through fresh followers.
#[derive(Debug, Clone, Copy)]
pub struct TimingValidator {
    sample_rate: u32,
    channels: u32,
    buffer_seconds: u32,
}

impl Default for TimingValidator {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            buffer_seconds: DEFAULT_BUFFER_SECONDS,
        }
    }
}

impl TimingValidator {
    /// `buffer_seconds` must leave room after the priming second.
    pub fn new(sample_rate: u32, channels: u32, buffer_seconds: u32) -> EnvelopeResult<Self> {
        validate_format(sample_rate, channels)?;
        if buffer_seconds <= PRIMING_SECONDS {
            return Err(EnvelopeError::InvalidConfig(format!(
                "test buffer of {} s must be longer than the {} s priming run",
                buffer_seconds, PRIMING_SECONDS
            )));
        }
        Ok(Self {
            sample_rate,
            channels,
            buffer_seconds,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    fn follower(&self, attack_ms: f32, release_ms: f32) -> EnvelopeResult<EnvelopeFollower> {
        let mut env = EnvelopeFollower::new(self.sample_rate, self.channels, attack_ms, release_ms)?;
        env.set_attack_ms(attack_ms)?;
        env.set_release_ms(release_ms)?;
        Ok(env)
    }

    fn full_scale_buffer(&self) -> EnvelopeResult<PcmBuffer> {
        PcmBuffer::with_duration(
            self.buffer_seconds,
            self.sample_rate,
            self.channels,
            FULL_SCALE,
        )
    }

    /// Time for a full-scale step to lift the envelope from 0 to
    /// [`ONE_TIME_CONSTANT_RISE`], checked against `attack_ms`.
    pub fn measure_attack_time(
        &self,
        attack_ms: f32,
        release_ms: f32,
    ) -> EnvelopeResult<TimingMeasurement> {
        let buffer = self.full_scale_buffer()?;
        let mut env = self.follower(attack_ms, release_ms)?;

        let position = env.scan(buffer.as_slice(), Some(ONE_TIME_CONSTANT_RISE), None);
        TimingMeasurement {
            expected_ms: attack_ms,
            measured_ms: samples_to_ms(position, self.sample_rate, self.channels),
            position,
        }
        .check("attack time")
    }

    /// Time for the envelope to fall from ~1.0 to [`ONE_TIME_CONSTANT_DECAY`]
    /// after the signal is cut, checked against `release_ms`.
    pub fn measure_release_time(
        &self,
        attack_ms: f32,
        release_ms: f32,
    ) -> EnvelopeResult<TimingMeasurement> {
        let mut buffer = self.full_scale_buffer()?;
        let mut env = self.follower(attack_ms, release_ms)?;

        let priming_len = seconds_to_samples(PRIMING_SECONDS, self.sample_rate, self.channels);
        env.scan(&buffer.as_slice()[..priming_len], None, None);
        let level = env.value();
        if (level - 1.0).abs() > PRIMING_TOLERANCE {
            warn!("envelope only reached {} after priming", level);
            return Err(EnvelopeError::ToleranceExceeded {
                what: "primed level",
                expected: 1.0,
                measured: level,
                tolerance: PRIMING_TOLERANCE,
            });
        }

        buffer.fill_from(priming_len, 0);
        let position = env.scan(buffer.as_slice(), None, Some(ONE_TIME_CONSTANT_DECAY));
        let priming_ms = (PRIMING_SECONDS * 1000) as f32;
        TimingMeasurement {
            expected_ms: release_ms,
            measured_ms: samples_to_ms(position, self.sample_rate, self.channels) - priming_ms,
            position,
        }
        .check("release time")
    }

    pub fn check_envelope_timing(
        &self,
        attack_ms: f32,
        release_ms: f32,
    ) -> EnvelopeResult<TimingReport> {
        let attack = self.measure_attack_time(attack_ms, release_ms)?;
        let release = self.measure_release_time(attack_ms, release_ms)?;
        Ok(TimingReport { attack, release })
    }
}
