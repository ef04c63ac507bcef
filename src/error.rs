//! Engine errors.
//!
//! Only setup paths (config, content bundles, worker startup) are fallible.
//! Grid primitives and the tick itself never return errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid grid dimensions {width}x{height} (each side must be 1..={max})")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown particle type key `{0}`")]
    UnknownTypeKey(String),

    #[error("palette for `{0}` has no color with a positive weight")]
    EmptyPalette(String),

    #[error("density for `{key}` must be finite and non-negative, got {density}")]
    InvalidDensity { key: String, density: f32 },

    #[error("parallel traversal needs at least one worker thread")]
    NoWorkers,

    #[error("rng seed must be non-zero")]
    ZeroSeed,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
