//! Simulation - the tick loop around a `Grid`.
//!
//! Owns the grid, the worker pool for the banded traversal, the traversal RNG
//! and perf counters. Brush commands, rendering extraction and settings each
//! live in their own file; the wasm-facing `World` wraps this type.

use std::sync::Arc;

use crate::core::WorkerPool;
use crate::domain::{ParticleTypeId, TypeRegistry};
use crate::error::Result;
use crate::grid::Grid;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/config.rs"]
mod config;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/traverse.rs"]
mod traverse;
#[path = "step/banded.rs"]
mod banded;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

pub use config::SimulationConfig;
pub use facade::World;
pub use perf_stats::PerfStats;

use banded::BandTask;
use perf_timer::PerfTimer;

pub struct Simulation {
    grid: Grid,
    pool: WorkerPool<BandTask>,
    config: SimulationConfig,
    /// Drives every random rule decision in single-threaded ticks.
    rng_state: u32,
    tick: u64,
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl Simulation {
    /// Build from `config` with the built-in particle types.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        init::create_simulation(config, Arc::new(TypeRegistry::from_defaults()))
    }

    pub fn with_registry(config: SimulationConfig, registry: Arc<TypeRegistry>) -> Result<Self> {
        init::create_simulation(config, registry)
    }

    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        Self::new(SimulationConfig::with_size(width, height))
    }

    /// Advance one tick.
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Stop the worker threads. Idempotent; also runs on drop. Later ticks
    /// fall back to the single-threaded traversal.
    pub fn teardown(&mut self) {
        init::teardown(self);
        self.config.parallel = false;
    }

    /// Brush: fill the disc `dx² + dy² < radius²` with fresh `type_id`
    /// particles. Returns the number of cells written.
    pub fn paint_disc(&mut self, cx: i32, cy: i32, radius: i32, type_id: ParticleTypeId) -> usize {
        commands::paint_disc(self, cx, cy, radius, type_id)
    }

    /// Brush: empty the disc. Returns the number of particles removed.
    pub fn erase_disc(&mut self, cx: i32, cy: i32, radius: i32) -> usize {
        commands::erase_disc(self, cx, cy, radius)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Non-empty cells.
    pub fn particle_count(&self) -> usize {
        self.grid.particle_count()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Dirty chunk coordinates since the last call; clears the flags.
    pub fn take_dirty_chunks(&mut self) -> Vec<(u32, u32)> {
        self.grid.chunks().take_dirty()
    }

    pub fn render_colors_abgr(&self) -> Vec<u32> {
        render_extract::colors_abgr(self)
    }

    /// One chunk's pixels, `CHUNK_SIZE` wide.
    pub fn chunk_pixels_abgr(&self, cx: u32, cy: u32) -> Option<Vec<u32>> {
        render_extract::chunk_pixels(self, cx, cy)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Retune particle types from a content bundle. Clears the grid.
    pub fn load_content_bundle_json(&mut self, json: &str) -> Result<()> {
        settings::load_content_bundle(self, json)
    }

    pub fn manifest_json(&self) -> String {
        self.grid.registry().manifest_json()
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_running()
    }

    pub fn set_parallel(&mut self, enabled: bool) -> Result<()> {
        settings::set_parallel(self, enabled)
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    pub fn perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        init::teardown(self);
    }
}
