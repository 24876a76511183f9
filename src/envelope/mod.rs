pub mod config;
pub mod follower;
pub mod scanner;

pub use config::EnvelopeConfig;
pub use follower::EnvelopeFollower;
pub use scanner::{Direction, ScanResult, Sentinel};
