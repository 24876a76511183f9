//! Lossy conversion between interleaved 16-bit PCM and normalized floats.
//!
//! PCM is scaled down by 32768 and back up by 32767, so a round trip may lose
//! one LSB. Timing measurements downstream depend on this exact scale.

use dasp_sample::Sample;

use crate::error::{EnvelopeError, EnvelopeResult};

/// Divisor applied when reading PCM (`i16::MIN` maps to exactly -1.0).
pub const PCM_TO_FLOAT_DIVISOR: f32 = 32768.0;
/// Multiplier applied when writing PCM (1.0 maps to exactly `i16::MAX`).
pub const FLOAT_TO_PCM_MULTIPLIER: f32 = 32767.0;

/// Converts each PCM sample to a float in `[-1.0, 1.0)`.
///
/// `channels` only describes the interleaving; the output has one float per
/// input sample.
pub fn pcm_to_float(pcm: &[i16], channels: u32) -> Vec<f32> {
    let mut out = Vec::with_capacity(pcm.len());
    pcm_to_float_into(pcm, channels, &mut out);
    out
}

/// Same as [`pcm_to_float`], reusing `dest` (resized to `pcm.len()`).
pub fn pcm_to_float_into(pcm: &[i16], _channels: u32, dest: &mut Vec<f32>) {
    dest.clear();
    // dasp divides by 32768 for i16 -> f32.
    dest.extend(pcm.iter().map(|&s| s.to_sample::<f32>()));
}

/// Writes `floats` scaled by 32767 into `dest`.
///
/// Returns [`EnvelopeError::SizeMismatch`] without touching `dest` when the
/// lengths differ.
pub fn float_to_pcm(floats: &[f32], dest: &mut [i16], _channels: u32) -> EnvelopeResult<()> {
    if floats.len() != dest.len() {
        return Err(EnvelopeError::SizeMismatch {
            source: floats.len(),
            dest: dest.len(),
        });
    }

    for (out, &value) in dest.iter_mut().zip(floats) {
        *out = clip_to_i16(value * FLOAT_TO_PCM_MULTIPLIER);
    }
    Ok(())
}

/// Clamps a pre-scaled value into `i16` range and truncates toward zero.
///
/// Only one bound is checked per call: values above `f32::EPSILON` are
/// clamped against the positive bound, everything else against the negative
/// bound.
#[inline]
pub fn clip_to_i16(value: f32) -> i16 {
    let mut val = value;
    if val > f32::EPSILON {
        if val > 32767.0 {
            val = 32767.0;
        }
    } else if val < -32768.0 {
        val = -32768.0;
    }
    val as i16
}

/// Reverses the sample order in place.
pub fn reverse_samples<T>(samples: &mut [T]) {
    samples.reverse();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_to_float_scale() {
        let floats = pcm_to_float(&[0, 16384, -16384, i16::MIN, i16::MAX], 1);
        assert_eq!(floats.len(), 5);
        assert_eq!(floats[0], 0.0);
        assert_eq!(floats[1], 0.5);
        assert_eq!(floats[2], -0.5);
        assert_eq!(floats[3], -1.0);
        assert_eq!(floats[4], 32767.0 / 32768.0);
    }

    #[test]
    fn test_pcm_to_float_keeps_interleaving() {
        let pcm = [1000i16, -1000, 2000, -2000];
        let floats = pcm_to_float(&pcm, 2);
        assert_eq!(floats.len(), pcm.len());
        for (f, s) in floats.iter().zip(pcm.iter()) {
            assert_eq!(*f, *s as f32 / PCM_TO_FLOAT_DIVISOR);
        }
    }

    #[test]
    fn test_pcm_to_float_into_resizes() {
        let mut scratch = vec![9.0f32; 10];
        pcm_to_float_into(&[16384, 0], 2, &mut scratch);
        assert_eq!(scratch, vec![0.5, 0.0]);
    }

    #[test]
    fn test_float_to_pcm_full_scale() {
        let mut dest = [0i16; 4];
        float_to_pcm(&[1.0, -1.0, 2.0, -2.0], &mut dest, 2).unwrap();
        assert_eq!(dest, [32767, -32767, 32767, -32768]);
    }

    #[test]
    fn test_float_to_pcm_truncates_toward_zero() {
        let mut dest = [0i16; 2];
        // 0.5 * 32767 = 16383.5, -0.5 * 32767 = -16383.5
        float_to_pcm(&[0.5, -0.5], &mut dest, 2).unwrap();
        assert_eq!(dest, [16383, -16383]);
    }

    #[test]
    fn test_float_to_pcm_size_mismatch_writes_nothing() {
        let mut dest = [7i16; 3];
        let err = float_to_pcm(&[1.0, 1.0], &mut dest, 1).unwrap_err();
        assert_eq!(err, EnvelopeError::SizeMismatch { source: 2, dest: 3 });
        assert_eq!(dest, [7, 7, 7]);
    }

    #[test]
    fn test_clip_boundaries() {
        assert_eq!(clip_to_i16(32767.0), 32767);
        assert_eq!(clip_to_i16(40000.0), 32767);
        assert_eq!(clip_to_i16(-32768.0), -32768);
        assert_eq!(clip_to_i16(-40000.0), -32768);
        assert_eq!(clip_to_i16(0.0), 0);
        assert_eq!(clip_to_i16(f32::EPSILON), 0);
        assert_eq!(clip_to_i16(123.9), 123);
        assert_eq!(clip_to_i16(-123.9), -123);
    }

    #[test]
    fn test_round_trip_within_one_lsb() {
        let pcm: Vec<i16> = vec![i16::MIN, -32767, -1000, -1, 0, 1, 1000, 32766, i16::MAX];
        let floats = pcm_to_float(&pcm, 1);
        let mut back = vec![0i16; pcm.len()];
        float_to_pcm(&floats, &mut back, 1).unwrap();

        for (orig, got) in pcm.iter().zip(back.iter()) {
            let diff = (*orig as i32 - *got as i32).abs();
            assert!(diff <= 1, "{} came back as {}", orig, got);
        }
        // The asymmetric scale means full scale does not survive exactly.
        assert_eq!(back[pcm.len() - 1], 32766);
        assert_eq!(back[0], -32767);
    }

    #[test]
    fn test_reverse_samples() {
        let mut v: Vec<i16> = vec![1, 2, 3, 4];
        reverse_samples(&mut v);
        assert_eq!(v, vec![4, 3, 2, 1]);

        let mut arr = [0i16, 1, 2, 3, 4];
        reverse_samples(&mut arr);
        assert_eq!(arr, [4, 3, 2, 1, 0]);
    }
}
