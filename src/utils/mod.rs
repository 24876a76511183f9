pub mod time;

pub use time::{float_equal, samples_to_ms, seconds_to_samples, time_to_coeff};
