//! Granular settling: slide toward the steepest reachable drop.
//!
//! From the particle, a scan walks sideways in each direction, stepping down
//! whenever the cell below is enterable and across otherwise, for as long as
//! it stays on enterable cells. Every visited cell is a candidate with slope
//! `dy / |dx|`; the steepest candidate at or above `min_slope` wins (coin flip
//! on ties). The particle then moves a single step toward it, diagonally down
//! when it can.

use super::common::can_enter;
use super::UpdateContext;
use crate::core::utils::random::coin;

/// Maximum scan depth.
const MAX_DROP: i32 = 3;

/// Horizontal and vertical scan limits. Steeper materials look less far.
pub fn reach_for_slope(min_slope: f32) -> (i32, i32) {
    let max_dx = if min_slope <= 0.1 {
        8
    } else if min_slope <= 0.2 {
        6
    } else if min_slope <= 0.5 {
        4
    } else {
        3
    };
    (max_dx, MAX_DROP)
}

pub fn settle(ctx: &mut UpdateContext, min_slope: f32) -> bool {
    if ctx.already_changed() {
        return false;
    }
    let (max_dx, max_dy) = reach_for_slope(min_slope);
    let (x, y) = (ctx.xi(), ctx.yi());

    // (dx, slope)
    let mut best: Option<(i32, f32)> = None;
    for dir in [-1i32, 1] {
        let mut dx = dir;
        let mut dy = 0;
        while dx.abs() <= max_dx && dy <= max_dy {
            if !can_enter(ctx.grid, x + dx, y + dy) {
                break;
            }
            let slope = dy as f32 / dx.abs() as f32;
            if slope >= min_slope {
                let better = match best {
                    None => true,
                    Some((_, best_slope)) => slope > best_slope || (slope == best_slope && coin(ctx.rng)),
                };
                if better {
                    best = Some((dx, slope));
                }
            }
            if can_enter(ctx.grid, x + dx, y + dy + 1) {
                dy += 1;
            } else {
                dx += dir;
            }
        }
    }

    let Some((best_dx, _)) = best else {
        return false;
    };
    let step = best_dx.signum();
    let drop = if can_enter(ctx.grid, x + step, y + 1) { 1 } else { 0 };
    ctx.move_to(x + step, y + drop)
}
