use super::banded::run_banded;
use super::traverse::{run_rows, TickCounters};
use super::{PerfTimer, Simulation};

pub(super) fn step(sim: &mut Simulation) {
    let timer = sim.perf_enabled.then(PerfTimer::start);

    sim.grid.begin_tick();

    let parallel = sim.pool.is_running();
    let counters: TickCounters = if parallel {
        let tick_seed = sim.config.seed ^ sim.tick as u32;
        run_banded(&sim.grid, &mut sim.pool, tick_seed)
    } else {
        let flipped = sim.grid.is_flipped();
        let height = sim.grid.height();
        run_rows(&sim.grid, 0..height, flipped, &mut sim.rng_state, true)
    };

    sim.grid.end_tick();
    sim.tick += 1;

    if let Some(timer) = timer {
        let stats = &mut sim.perf_stats;
        stats.tick_ms = timer.elapsed_ms();
        stats.cells_visited = counters.cells_visited as u32;
        stats.behaviors_run = counters.behaviors_run as u32;
        stats.parallel = parallel;
        stats.ticks += 1;
    }
}
