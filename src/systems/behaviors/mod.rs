//! Behaviors - per-type movement and interaction rules.
//!
//! A type's `BehaviorKind` selects an ordered list of rules. Every rule
//! re-checks `changed_this_tick` on entry, so once one rule has moved or
//! rewritten the particle the rest do nothing.

mod common;
mod gravity;
mod liquid;
mod moisture;
mod powder;

pub use common::{can_enter, NEIGHBORS};
pub use gravity::fall;
pub use liquid::flow;
pub use moisture::{absorb, diffuse, ABSORB_CAP, ABSORB_GAIN};
pub use powder::{reach_for_slope, settle};

use crate::domain::{BehaviorKind, Particle, ParticleTypeId};
use crate::grid::Grid;

/// Everything a rule needs: the grid, the cell being updated and the random
/// stream of the thread running it.
pub struct UpdateContext<'a> {
    pub grid: &'a Grid,
    pub x: u32,
    pub y: u32,
    pub rng: &'a mut u32,
    /// Lazily rescan stale chunk masks during type queries. Off inside band
    /// workers.
    pub rebuild_type_masks: bool,
}

impl<'a> UpdateContext<'a> {
    pub fn new(grid: &'a Grid, x: u32, y: u32, rng: &'a mut u32) -> Self {
        Self {
            grid,
            x,
            y,
            rng,
            rebuild_type_masks: true,
        }
    }

    #[inline]
    pub fn current(&self) -> Particle {
        self.grid.get(self.x, self.y)
    }

    #[inline]
    pub fn already_changed(&self) -> bool {
        self.current().changed_this_tick
    }

    #[inline]
    pub fn xi(&self) -> i32 {
        self.x as i32
    }

    #[inline]
    pub fn yi(&self) -> i32 {
        self.y as i32
    }

    #[inline]
    pub fn near_type(&self, type_id: ParticleTypeId, radius_x: u32, radius_y: u32) -> bool {
        self.grid
            .near_type(self.xi(), self.yi(), type_id, radius_x, radius_y, self.rebuild_type_masks)
    }

    /// Swap the current particle to (tx, ty) and follow it there.
    #[inline]
    pub fn move_to(&mut self, tx: i32, ty: i32) -> bool {
        if !self.grid.exchange(self.xi(), self.yi(), tx, ty) {
            return false;
        }
        self.x = tx as u32;
        self.y = ty as u32;
        true
    }
}

/// Run the rules of `kind` for the particle at the context's cell.
pub fn run_behavior(kind: BehaviorKind, ctx: &mut UpdateContext) {
    match kind {
        BehaviorKind::Inert => {}
        BehaviorKind::Absorbent { min_slope } => {
            fall(ctx);
            settle(ctx, min_slope);
            absorb(ctx);
        }
        BehaviorKind::Damp { min_slope } => {
            fall(ctx);
            settle(ctx, min_slope);
            absorb(ctx);
            diffuse(ctx);
        }
        BehaviorKind::Liquid => {
            fall(ctx);
            flow(ctx);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::domain::{ParticleTypeId, TypeRegistry};
    use crate::grid::Grid;

    /// Grid built from rows of characters: `.` empty, `s` sand, `w` water,
    /// `#` stone, `m` wet sand. Tick flags are cleared afterwards.
    pub fn grid_from(rows: &[&str]) -> Grid {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut grid = Grid::new(width, height, Arc::new(TypeRegistry::from_defaults()), 0x5EED)
            .expect("valid test grid");
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let type_id = match ch {
                    's' => ParticleTypeId::Sand,
                    'w' => ParticleTypeId::Water,
                    '#' => ParticleTypeId::Stone,
                    'm' => ParticleTypeId::WetSand,
                    _ => continue,
                };
                grid.spawn(x as i32, y as i32, type_id);
            }
        }
        grid.begin_tick();
        grid
    }

    pub fn render(grid: &Grid) -> Vec<String> {
        (0..grid.height())
            .map(|y| {
                (0..grid.width())
                    .map(|x| match grid.get(x, y).type_id {
                        ParticleTypeId::Empty => '.',
                        ParticleTypeId::Sand => 's',
                        ParticleTypeId::Water => 'w',
                        ParticleTypeId::Stone => '#',
                        ParticleTypeId::WetSand => 'm',
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{grid_from, render};
    use super::*;

    #[test]
    fn inert_does_nothing() {
        let grid = grid_from(&["#.", ".."]);
        let mut rng = 1;
        let mut ctx = UpdateContext::new(&grid, 0, 0, &mut rng);
        run_behavior(BehaviorKind::Inert, &mut ctx);
        assert_eq!(render(&grid), vec!["#.", ".."]);
    }

    #[test]
    fn changed_particle_is_left_alone() {
        let grid = grid_from(&["s", "."]);
        grid.modify(0, 0, |_| {});
        let mut rng = 1;
        let mut ctx = UpdateContext::new(&grid, 0, 0, &mut rng);
        run_behavior(grid.registry().behavior(ParticleTypeId::Sand), &mut ctx);
        assert_eq!(render(&grid), vec!["s", "."]);
    }

    #[test]
    fn move_to_follows_the_particle() {
        let grid = grid_from(&["w.", ".."]);
        let mut rng = 1;
        let mut ctx = UpdateContext::new(&grid, 0, 0, &mut rng);
        assert!(ctx.move_to(1, 1));
        assert_eq!((ctx.x, ctx.y), (1, 1));
        assert_eq!(ctx.current().type_id, ParticleTypeId::Water);
    }

    #[test]
    fn sand_sinks_before_it_soaks() {
        let grid = grid_from(&["s", "w", "#"]);
        let mut rng = 1;
        let mut ctx = UpdateContext::new(&grid, 0, 0, &mut rng);
        run_behavior(grid.registry().behavior(ParticleTypeId::Sand), &mut ctx);
        assert_eq!(render(&grid), vec!["w", "s", "#"]);
    }
}
