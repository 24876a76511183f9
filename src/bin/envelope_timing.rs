//! Measures attack/release timing of the envelope follower.
//!
//! Usage: `envelope-timing [attack_ms] [release_ms]` (defaults 10 and 100).

use anyhow::Context;
use envelope_follower::envelope::config::{DEFAULT_ATTACK_MS, DEFAULT_RELEASE_MS};
use envelope_follower::TimingValidator;
use log::info;

fn parse_ms(arg: Option<String>, default: f32, name: &str) -> anyhow::Result<f32> {
    match arg {
        Some(value) => value
            .parse::<f32>()
            .with_context(|| format!("{} time '{}' is not a number", name, value)),
        None => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let attack_ms = parse_ms(args.next(), DEFAULT_ATTACK_MS, "attack")?;
    let release_ms = parse_ms(args.next(), DEFAULT_RELEASE_MS, "release")?;

    let validator = TimingValidator::default();
    info!(
        "checking attack {} ms / release {} ms at {} Hz, {} channels",
        attack_ms,
        release_ms,
        validator.sample_rate(),
        validator.channels()
    );

    let report = validator
        .check_envelope_timing(attack_ms, release_ms)
        .context("envelope timing check failed")?;

    info!(
        "attack: {:.3} ms (expected {:.3}), release: {:.3} ms (expected {:.3})",
        report.attack.measured_ms,
        report.attack.expected_ms,
        report.release.measured_ms,
        report.release.expected_ms
    );
    Ok(())
}
