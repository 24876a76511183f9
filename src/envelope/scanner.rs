//! Single-pass threshold scanning over PCM.
//!
//! A scan converts the PCM range into the follower's scratch buffer, runs the
//! follower once per interleaved sample and stops on the first sentinel
//! crossing. The returned position lets callers measure where in the signal a
//! level was first reached.

use log::{trace, warn};

use super::follower::EnvelopeFollower;
use crate::audio::pcm_to_float_into;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Fires when the envelope rises to or above the threshold.
    Attack,
    /// Fires when the envelope falls to or below the threshold.
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentinel {
    pub threshold: f32,
    pub direction: Direction,
}

impl Sentinel {
    pub fn attack(threshold: f32) -> Self {
        Self {
            threshold,
            direction: Direction::Attack,
        }
    }

    pub fn release(threshold: f32) -> Self {
        Self {
            threshold,
            direction: Direction::Release,
        }
    }

    #[inline]
    pub fn is_crossed(&self, value: f32) -> bool {
        match self.direction {
            Direction::Attack => value >= self.threshold,
            Direction::Release => value <= self.threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    /// Sample index of the crossing, or the range length if nothing fired.
    pub position: usize,
    /// Direction of the sentinel that stopped the scan.
    pub fired: Option<Direction>,
}

impl ScanResult {
    pub fn stopped_early(&self) -> bool {
        self.fired.is_some()
    }
}

impl EnvelopeFollower {
    /// Runs the follower over `pcm`, stopping when an armed sentinel fires.
    ///
    /// Returns the index into `pcm` of the sample that fired, or `pcm.len()`
    /// when neither sentinel was reached.
    pub fn scan(
        &mut self,
        pcm: &[i16],
        attack_sentinel: Option<f32>,
        release_sentinel: Option<f32>,
    ) -> usize {
        let mut armed = [Sentinel::attack(0.0); 2];
        let mut count = 0;
        for sentinel in [
            attack_sentinel.map(Sentinel::attack),
            release_sentinel.map(Sentinel::release),
        ]
        .into_iter()
        .flatten()
        {
            armed[count] = sentinel;
            count += 1;
        }
        self.scan_with(pcm, &armed[..count]).position
    }

    pub fn scan_with(&mut self, pcm: &[i16], sentinels: &[Sentinel]) -> ScanResult {
        let channels = self.channels();
        if pcm.len() % channels as usize != 0 {
            warn!(
                "scan over {} samples is not a whole number of {}-channel frames",
                pcm.len(),
                channels
            );
        }

        let mut scratch = std::mem::take(&mut self.conversion_buffer);
        pcm_to_float_into(pcm, channels, &mut scratch);

        let recording = self.history_enabled;
        if recording {
            self.history.clear();
            self.history.reserve(scratch.len());
        }

        let mut result = ScanResult {
            position: pcm.len(),
            fired: None,
        };

        for (index, &sample) in scratch.iter().enumerate() {
            let value = self.update(sample);
            if recording {
                self.history.push(value);
            }

            if let Some(sentinel) = sentinels.iter().find(|s| s.is_crossed(value)) {
                let position = pcm.len() - (scratch.len() - index);
                trace!(
                    "{:?} sentinel {} crossed at sample {} (envelope {})",
                    sentinel.direction,
                    sentinel.threshold,
                    position,
                    value
                );
                result = ScanResult {
                    position,
                    fired: Some(sentinel.direction),
                };
                break;
            }
        }

        self.conversion_buffer = scratch;
        result
    }
}
