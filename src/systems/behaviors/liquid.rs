//! Liquid flow - level out sideways once falling is blocked.
//!
//! Probes up to `FLOW_REACH` empty cells to each side and jumps to the
//! farther end. The side scanned first and the winner on a tie are both
//! random, so neither direction is favored.

use super::UpdateContext;
use crate::core::utils::random::coin;

const FLOW_REACH: i32 = 3;

/// Farthest run of empty cells in direction `dir` (0 when blocked).
#[inline]
fn open_run(ctx: &UpdateContext, dir: i32) -> i32 {
    let mut reach = 0;
    for step in 1..=FLOW_REACH {
        if !ctx.grid.is_empty(ctx.xi() + dir * step, ctx.yi()) {
            break;
        }
        reach = step;
    }
    reach
}

pub fn flow(ctx: &mut UpdateContext) -> bool {
    if ctx.already_changed() {
        return false;
    }

    let first = if coin(ctx.rng) { 1 } else { -1 };
    let reach_first = open_run(ctx, first);
    let reach_second = open_run(ctx, -first);

    let dx = if reach_first > reach_second {
        first * reach_first
    } else if reach_second > reach_first {
        -first * reach_second
    } else if reach_first == 0 {
        return false;
    } else if coin(ctx.rng) {
        first * reach_first
    } else {
        -first * reach_second
    };

    let y = ctx.yi();
    ctx.move_to(ctx.xi() + dx, y)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{grid_from, render};
    use super::*;
    use crate::core::utils::random::mix_seed;

    #[test]
    fn boxed_in_water_stays() {
        let grid = grid_from(&["#w#"]);
        let mut rng = 5;
        assert!(!flow(&mut UpdateContext::new(&grid, 1, 0, &mut rng)));
    }

    #[test]
    fn moves_toward_the_longer_run() {
        let grid = grid_from(&["#.w....#"]);
        let mut rng = 5;
        assert!(flow(&mut UpdateContext::new(&grid, 2, 0, &mut rng)));
        assert_eq!(render(&grid), vec!["#....w.#"]);
    }

    #[test]
    fn reach_is_capped() {
        let grid = grid_from(&["w........"]);
        let mut rng = 5;
        assert!(flow(&mut UpdateContext::new(&grid, 0, 0, &mut rng)));
        assert_eq!(render(&grid), vec!["...w....."]);
    }

    #[test]
    fn does_not_swap_with_other_liquid() {
        let grid = grid_from(&["#ww#"]);
        let mut rng = 5;
        assert!(!flow(&mut UpdateContext::new(&grid, 1, 0, &mut rng)));
    }

    #[test]
    fn ties_split_between_sides() {
        let mut right = 0;
        for run in 0..400 {
            let grid = grid_from(&["...w..."]);
            let mut rng = mix_seed(0xAB, run);
            flow(&mut UpdateContext::new(&grid, 3, 0, &mut rng));
            if render(&grid)[0] == "......w" {
                right += 1;
            }
        }
        assert!((140..260).contains(&right), "right = {right}");
    }
}
