use crate::error::{EnvelopeError, EnvelopeResult};

use super::convert::reverse_samples;

/// Owned interleaved 16-bit buffer whose length is always a whole number of frames.
#[derive(Clone, Debug, PartialEq)]
pub struct PcmBuffer {
    data: Vec<i16>,
    channels: u32,
}

impl PcmBuffer {
    /// `frames` frames of silence.
    pub fn new(frames: usize, channels: u32) -> EnvelopeResult<Self> {
        Self::from_value(frames, channels, 0)
    }

    pub fn from_value(frames: usize, channels: u32, value: i16) -> EnvelopeResult<Self> {
        if channels == 0 || channels > 2 {
            return Err(EnvelopeError::InvalidChannels(channels));
        }
        Ok(Self {
            data: vec![value; frames * channels as usize],
            channels,
        })
    }

    /// `seconds` of audio at `sample_rate`, every sample set to `value`.
    pub fn with_duration(
        seconds: u32,
        sample_rate: u32,
        channels: u32,
        value: i16,
    ) -> EnvelopeResult<Self> {
        Self::from_value(seconds as usize * sample_rate as usize, channels, value)
    }

    /// Sets every sample from `start` (a sample index) to the end.
    pub fn fill_from(&mut self, start: usize, value: i16) {
        if let Some(tail) = self.data.get_mut(start..) {
            tail.fill(value);
        }
    }

    pub fn reverse(&mut self) {
        reverse_samples(&mut self.data);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn frames(&self) -> usize {
        self.data.len() / self.channels as usize
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [i16] {
        &mut self.data
    }
}
