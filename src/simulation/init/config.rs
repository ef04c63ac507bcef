use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::grid::MAX_DIMENSION;

/// Simulation setup. Every field has a default, so JSON may omit any of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub width: u32,
    pub height: u32,
    /// Non-zero xorshift seed.
    pub seed: u32,
    /// Use the banded worker-pool traversal.
    pub parallel: bool,
    pub worker_threads: usize,
    pub perf_metrics: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 12345,
            parallel: false,
            worker_threads: 4,
            perf_metrics: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fits = |side: u32| (1..=MAX_DIMENSION).contains(&side);
        if !fits(self.width) || !fits(self.height) {
            return Err(EngineError::InvalidDimensions {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }
        if self.seed == 0 {
            return Err(EngineError::ZeroSeed);
        }
        if self.parallel && self.worker_threads == 0 {
            return Err(EngineError::NoWorkers);
        }
        Ok(())
    }
}
