//! Banded parallel traversal on the worker pool.
//!
//! The grid is cut into horizontal bands, two per worker. Bands run in two
//! phases (even-indexed, then odd-indexed, order swapped on flipped ticks) so
//! no two adjacent bands are ever active at once. A rule reads at most four
//! rows below and one above its cell and writes at most one row away, so with
//! bands at least `MIN_BAND_ROWS` tall the concurrently active bands touch
//! disjoint cells. Chunk metadata is atomic; masks are not rescanned while
//! bands run.

use std::ops::Range;

use super::traverse::{run_rows, TickCounters};
use crate::core::utils::random::mix_seed;
use crate::core::WorkerPool;
use crate::grid::Grid;

pub(crate) const MIN_BAND_ROWS: u32 = 8;

#[derive(Clone, Copy)]
struct GridHandle(*const Grid);

// SAFETY: the pointer is only dereferenced by a worker between
// `dispatch_all` and `wait_all`, while `run_banded` holds the borrow it was
// made from, and each worker only touches cells of its own band (see module
// docs).
unsafe impl Send for GridHandle {}

/// One band of work for one worker.
#[derive(Default)]
pub(crate) struct BandTask {
    grid: Option<GridHandle>,
    rows: Range<u32>,
    flipped: bool,
    rng_state: u32,
    counters: TickCounters,
}

/// Worker entry point.
pub(crate) fn run_band(task: &mut BandTask, _worker: usize) {
    let Some(GridHandle(ptr)) = task.grid else {
        return;
    };
    // SAFETY: see `GridHandle`.
    let grid = unsafe { &*ptr };
    task.counters = run_rows(grid, task.rows.clone(), task.flipped, &mut task.rng_state, false);
}

/// Split `height` rows into up to `2 * workers` bands, top to bottom.
pub(crate) fn band_layout(height: u32, workers: usize) -> Vec<Range<u32>> {
    let bands = (workers.max(1) * 2) as u32;
    let band_rows = (height / bands + 1).max(MIN_BAND_ROWS);
    (0..height)
        .step_by(band_rows as usize)
        .map(|start| start..(start + band_rows).min(height))
        .collect()
}

/// One full tick over all bands. `grid.begin_tick` must already have run.
pub(crate) fn run_banded(grid: &Grid, pool: &mut WorkerPool<BandTask>, seed: u32) -> TickCounters {
    let workers = pool.thread_count();
    let bands = band_layout(grid.height(), workers);
    let flipped = grid.is_flipped();
    let phases = if flipped { [1, 0] } else { [0, 1] };
    let handle = GridHandle(grid as *const Grid);

    let mut total = TickCounters::default();
    for parity in phases {
        let phase_bands: Vec<(usize, Range<u32>)> = bands
            .iter()
            .cloned()
            .enumerate()
            .filter(|(index, _)| index % 2 == parity)
            .collect();

        for slot in 0..workers {
            let task = match phase_bands.get(slot) {
                Some((index, rows)) => BandTask {
                    grid: Some(handle),
                    rows: rows.clone(),
                    flipped,
                    rng_state: mix_seed(seed, *index as u32),
                    counters: TickCounters::default(),
                },
                None => BandTask::default(),
            };
            pool.set_task(slot, task);
        }
        pool.dispatch_and_wait();

        // Also drops every handle before the borrow ends.
        for slot in 0..workers {
            if let Some(task) = pool.take_task(slot) {
                total.merge(task.counters);
            }
        }
    }
    total
}
