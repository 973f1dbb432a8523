//! Error types.
//!
//! Nothing that runs inside a tick can fail; these only cover invalid
//! construction parameters and configuration loading.

use thiserror::Error;

/// A component was built with parameters that break its invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArcadeError {
    #[error("spawn range is inverted: min {min} > max {max}")]
    InvalidSpawnRange { min: u32, max: u32 },

    #[error("particle lifespan must be at least one tick")]
    ZeroLifespan,

    #[error("damping must lie strictly between 0 and 1, got {0}")]
    InvalidDamping(f32),

    #[error("canvas must have a positive size, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] ArcadeError),
}
