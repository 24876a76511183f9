// src/utils/time.rs

/// One-pole smoothing coefficient for a per-frame time constant.
///
/// The follower runs once per interleaved sample, so the time constant is
/// stretched by `channels` to keep `time_ms` meaning wall-clock time.
#[inline]
pub fn time_to_coeff(time_ms: f32, sample_rate: u32, channels: u32) -> f32 {
    let time_secs = (time_ms as f64 * channels as f64) / 1000.0;
    (-1.0 / (sample_rate as f64 * time_secs)).exp() as f32
}

/// Converts an interleaved sample position into milliseconds of audio.
#[inline]
pub fn samples_to_ms(position: usize, sample_rate: u32, channels: u32) -> f32 {
    (position as f64 / channels as f64 / sample_rate as f64 * 1000.0) as f32
}

/// Number of interleaved samples covering `seconds` of audio.
#[inline]
pub fn seconds_to_samples(seconds: u32, sample_rate: u32, channels: u32) -> usize {
    seconds as usize * sample_rate as usize * channels as usize
}

/// True when `a` and `b` differ by less than `f32::EPSILON`.
#[inline]
pub fn float_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < f32::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_coeff_matches_exponential() {
        // Mono: tau = 441 samples for 10 ms at 44.1 kHz.
        let coeff = time_to_coeff(10.0, 44100, 1);
        assert!((coeff - (-1.0f32 / 441.0).exp()).abs() < EPSILON);
    }

    #[test]
    fn test_coeff_scales_with_channels() {
        let stereo = time_to_coeff(10.0, 44100, 2);
        let mono_double = time_to_coeff(20.0, 44100, 1);
        assert!((stereo - mono_double).abs() < EPSILON);
        assert!(stereo > time_to_coeff(10.0, 44100, 1));
    }

    #[test]
    fn test_zero_time_is_instant() {
        assert_eq!(time_to_coeff(0.0, 44100, 2), 0.0);
    }

    #[test]
    fn test_samples_to_ms() {
        assert!((samples_to_ms(882, 44100, 2) - 10.0).abs() < EPSILON);
        assert!((samples_to_ms(88200, 44100, 2) - 1000.0).abs() < EPSILON);
        assert_eq!(seconds_to_samples(1, 44100, 2), 88200);
    }

    #[test]
    fn test_float_equal() {
        assert!(!float_equal(0.1, 0.0));
        assert!(float_equal(0.0, 0.0));
        assert!(float_equal(1.0, 1.0 + f32::EPSILON / 2.0));
    }
}
