//! Row traversal: the per-tick visiting order and dispatch protocol.
//!
//! Rows go bottom-up so a particle that falls is not visited again in its new
//! row. Within a row the scan direction alternates with row parity, and the
//! grid-wide `is_flipped` toggle XORs into that choice every tick.

use std::ops::Range;

use crate::grid::Grid;
use crate::systems::behaviors::{run_behavior, UpdateContext};
use crate::domain::BehaviorKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TickCounters {
    pub cells_visited: u64,
    pub behaviors_run: u64,
}

impl TickCounters {
    pub fn merge(&mut self, other: TickCounters) {
        self.cells_visited += other.cells_visited;
        self.behaviors_run += other.behaviors_run;
    }
}

/// Scan direction of row `y`. Only the alternation matters: neighbouring
/// rows scan opposite ways and every row reverses each tick. Which way row 0
/// starts is arbitrary.
#[inline]
pub(crate) fn row_left_to_right(y: u32, flipped: bool) -> bool {
    (y & 1 == 0) ^ flipped
}

/// Visit `rows` of `grid` bottom-up.
pub(crate) fn run_rows(
    grid: &Grid,
    rows: Range<u32>,
    flipped: bool,
    rng: &mut u32,
    rebuild_type_masks: bool,
) -> TickCounters {
    let mut counters = TickCounters::default();
    let width = grid.width();
    for y in rows.rev() {
        if row_left_to_right(y, flipped) {
            for x in 0..width {
                dispatch_cell(grid, x, y, rng, rebuild_type_masks, &mut counters);
            }
        } else {
            for x in (0..width).rev() {
                dispatch_cell(grid, x, y, rng, rebuild_type_masks, &mut counters);
            }
        }
    }
    counters
}

#[inline]
fn dispatch_cell(
    grid: &Grid,
    x: u32,
    y: u32,
    rng: &mut u32,
    rebuild_type_masks: bool,
    counters: &mut TickCounters,
) {
    counters.cells_visited += 1;
    let particle = grid.get(x, y);
    if particle.changed_this_tick {
        return;
    }
    grid.mark_received_update(x, y);

    let kind = grid.registry().behavior(particle.type_id);
    if kind == BehaviorKind::Inert {
        return;
    }
    counters.behaviors_run += 1;
    let mut ctx = UpdateContext {
        grid,
        x,
        y,
        rng,
        rebuild_type_masks,
    };
    run_behavior(kind, &mut ctx);
}
