use bevy::math::Vec2;
use thiserror::Error;

/// Startup failures. The running simulation has no error paths.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("viewport must have a positive size, got {0}")]
    Viewport(Vec2),
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must lie in (0, 1], got {value}")]
    EaseFactor { name: &'static str, value: f32 },
    #[error("restitution must lie in (0, 1) so bounces lose energy, got {0}")]
    Restitution(f32),
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    #[error("flower spawn region is empty: x {x:?}, y {y:?}")]
    EmptySpawnRegion { x: (f32, f32), y: (f32, f32) },
    #[error("invalid SAGE_SLIME_SEED {0:?}: expected an unsigned integer")]
    Seed(String),
}
