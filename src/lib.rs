pub mod audio;
pub mod envelope;
pub mod error;
pub mod timing;
pub mod utils;

pub use audio::{clip_to_i16, float_to_pcm, pcm_to_float, reverse_samples, PcmBuffer};
pub use envelope::{Direction, EnvelopeConfig, EnvelopeFollower, ScanResult, Sentinel};
pub use error::{EnvelopeError, EnvelopeResult};
pub use timing::{
    TimingMeasurement, TimingReport, TimingValidator, ONE_TIME_CONSTANT_DECAY,
    ONE_TIME_CONSTANT_RISE,
};
