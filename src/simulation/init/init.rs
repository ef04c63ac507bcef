use std::sync::Arc;

use crate::core::WorkerPool;
use crate::domain::TypeRegistry;
use crate::error::Result;
use crate::grid::Grid;

use super::banded::run_band;
use super::config::SimulationConfig;
use super::perf_stats::PerfStats;
use super::Simulation;

pub(super) fn create_simulation(config: SimulationConfig, registry: Arc<TypeRegistry>) -> Result<Simulation> {
    config.validate()?;
    let grid = Grid::new(config.width, config.height, registry, config.seed)?;

    let mut sim = Simulation {
        grid,
        pool: WorkerPool::new(),
        rng_state: config.seed,
        tick: 0,
        perf_enabled: config.perf_metrics,
        perf_stats: PerfStats::default(),
        config,
    };
    if sim.config.parallel {
        start_pool(&mut sim)?;
    }

    log::info!(
        "simulation ready: {}x{} cells, {} traversal",
        sim.grid.width(),
        sim.grid.height(),
        if sim.pool.is_running() { "banded" } else { "single-threaded" },
    );
    Ok(sim)
}

pub(super) fn start_pool(sim: &mut Simulation) -> Result<()> {
    sim.pool.start(sim.config.worker_threads, run_band)
}

pub(super) fn teardown(sim: &mut Simulation) {
    if sim.pool.is_running() {
        sim.pool.terminate();
        log::debug!("simulation torn down after {} ticks", sim.tick);
    }
}
