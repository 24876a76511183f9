pub mod buffer;
pub mod convert;

pub use buffer::PcmBuffer;
pub use convert::{
    clip_to_i16, float_to_pcm, pcm_to_float, pcm_to_float_into, reverse_samples,
    FLOAT_TO_PCM_MULTIPLIER, PCM_TO_FLOAT_DIVISOR,
};
