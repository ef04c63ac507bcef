use std::sync::Arc;

use crate::domain::TypeRegistry;
use crate::error::Result;

use super::init::{start_pool, teardown};
use super::perf_stats::PerfStats;
use super::Simulation;

/// Switch traversal mode. Starting workers can fail; the simulation then stays
/// single-threaded.
pub(super) fn set_parallel(sim: &mut Simulation, enabled: bool) -> Result<()> {
    if enabled == sim.pool.is_running() {
        sim.config.parallel = enabled;
        return Ok(());
    }
    if enabled {
        if let Err(err) = start_pool(sim) {
            log::warn!("banded traversal unavailable: {err}");
            sim.config.parallel = false;
            return Err(err);
        }
    } else {
        teardown(sim);
    }
    sim.config.parallel = enabled;
    Ok(())
}

pub(super) fn enable_perf_metrics(sim: &mut Simulation, enabled: bool) {
    sim.perf_enabled = enabled;
    sim.config.perf_metrics = enabled;
    if !enabled {
        sim.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(sim: &Simulation) -> PerfStats {
    sim.perf_stats.clone()
}

/// Replace the type table and empty the grid, since existing particles were
/// built from the old one.
pub(super) fn load_content_bundle(sim: &mut Simulation, json: &str) -> Result<()> {
    let registry = TypeRegistry::from_bundle_json(json)?;
    sim.grid.set_registry(Arc::new(registry));
    sim.grid.clear();
    log::info!("content bundle loaded");
    Ok(())
}
