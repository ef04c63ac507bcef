//! Moisture: sand soaking up water, wet sand sharing it with neighbors.

use super::common::NEIGHBORS;
use super::UpdateContext;
use crate::core::utils::random::roll_below;
use crate::domain::{create_particle, ParticleTypeId};

/// Moisture gained per absorbed water particle.
pub const ABSORB_GAIN: u8 = 8;
/// Wet sand above this level stops absorbing.
pub const ABSORB_CAP: u8 = 15;
/// Chance out of 10 that a water neighbor is ignored on a given tick.
const ABSORB_SKIP_IN_10: u32 = 2;
/// Below this, wet sand keeps its moisture.
const MIN_DIFFUSE_MOISTURE: u8 = 2;

/// Consume one neighboring water particle: dry sand turns into wet sand,
/// wet sand under the cap gets wetter.
pub fn absorb(ctx: &mut UpdateContext) -> bool {
    if ctx.already_changed() || !ctx.near_type(ParticleTypeId::Water, 1, 1) {
        return false;
    }
    let (x, y) = (ctx.xi(), ctx.yi());

    for (dx, dy) in NEIGHBORS {
        if roll_below(ctx.rng, 10) < ABSORB_SKIP_IN_10 {
            continue;
        }
        let Some(neighbor) = ctx.grid.particle(x + dx, y + dy) else {
            continue;
        };
        if neighbor.type_id != ParticleTypeId::Water || neighbor.changed_this_tick {
            continue;
        }

        let me = ctx.current();
        match me.moisture() {
            Some(level) if level <= ABSORB_CAP => {
                ctx.grid
                    .modify(ctx.x, ctx.y, |p| {
                        p.set_moisture(level.saturating_add(ABSORB_GAIN));
                    });
            }
            Some(_) => return false,
            None => {
                let mut wet = create_particle(ctx.grid.registry(), ParticleTypeId::WetSand, ctx.rng);
                wet.set_moisture(ABSORB_GAIN);
                ctx.grid.write_cell(ctx.x, ctx.y, wet);
            }
        }
        ctx.grid.clear_cell(x + dx, y + dy);
        return true;
    }
    false
}

/// Pass one unit of moisture to a drier neighbor. Dry sand becomes wet sand
/// with a single unit.
pub fn diffuse(ctx: &mut UpdateContext) -> bool {
    if ctx.already_changed() {
        return false;
    }
    let Some(level) = ctx.current().moisture() else {
        return false;
    };
    if level < MIN_DIFFUSE_MOISTURE {
        return false;
    }
    let (x, y) = (ctx.xi(), ctx.yi());

    for (dx, dy) in NEIGHBORS {
        let Some(neighbor) = ctx.grid.particle(x + dx, y + dy) else {
            continue;
        };
        if neighbor.changed_this_tick {
            continue;
        }
        let (nx, ny) = neighbor.position();
        match neighbor.type_id {
            ParticleTypeId::Sand => {
                let mut wet = create_particle(ctx.grid.registry(), ParticleTypeId::WetSand, ctx.rng);
                wet.set_moisture(1);
                ctx.grid.write_cell(nx, ny, wet);
            }
            ParticleTypeId::WetSand => {
                let their = neighbor.moisture().unwrap_or(0);
                if level as i16 - their as i16 <= 1 {
                    continue;
                }
                ctx.grid.modify(nx, ny, |p| {
                    p.set_moisture(their + 1);
                });
            }
            _ => continue,
        }
        ctx.grid.modify(ctx.x, ctx.y, |p| {
            p.set_moisture(level - 1);
        });
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{grid_from, render};
    use super::*;

    #[test]
    fn sand_next_to_water_eventually_gets_wet() {
        let mut grid = grid_from(&["sw"]);
        let mut rng = 0xFACE;
        let mut absorbed = false;
        for _ in 0..30 {
            if absorb(&mut UpdateContext::new(&grid, 0, 0, &mut rng)) {
                absorbed = true;
                break;
            }
            grid.begin_tick();
        }
        assert!(absorbed);
        assert_eq!(render(&grid), vec!["m."]);
        assert_eq!(grid.get(0, 0).moisture(), Some(ABSORB_GAIN));
    }

    #[test]
    fn no_water_nearby_means_no_absorption() {
        let grid = grid_from(&["s..", "...", "..#"]);
        let mut rng = 1;
        assert!(!absorb(&mut UpdateContext::new(&grid, 0, 0, &mut rng)));
    }

    #[test]
    fn saturated_wet_sand_stops_absorbing() {
        let mut grid = grid_from(&["mw"]);
        grid.modify(0, 0, |p| {
            p.set_moisture(ABSORB_CAP + 1);
        });
        grid.begin_tick();
        let mut rng = 2;
        for _ in 0..30 {
            assert!(!absorb(&mut UpdateContext::new(&grid, 0, 0, &mut rng)));
        }
        assert_eq!(render(&grid), vec!["mw"]);
    }

    #[test]
    fn wet_sand_wets_dry_neighbor() {
        let mut grid = grid_from(&["ms"]);
        grid.modify(0, 0, |p| {
            p.set_moisture(5);
        });
        grid.begin_tick();
        let mut rng = 2;
        assert!(diffuse(&mut UpdateContext::new(&grid, 0, 0, &mut rng)));
        assert_eq!(grid.get(0, 0).moisture(), Some(4));
        assert_eq!(grid.get(1, 0).moisture(), Some(1));
    }

    #[test]
    fn diffusion_needs_a_gradient() {
        let mut grid = grid_from(&["mm"]);
        grid.modify(0, 0, |p| {
            p.set_moisture(4);
        });
        grid.modify(1, 0, |p| {
            p.set_moisture(3);
        });
        grid.begin_tick();
        let mut rng = 2;
        assert!(!diffuse(&mut UpdateContext::new(&grid, 0, 0, &mut rng)));

        grid.modify(1, 0, |p| {
            p.set_moisture(2);
        });
        grid.begin_tick();
        assert!(diffuse(&mut UpdateContext::new(&grid, 0, 0, &mut rng)));
        assert_eq!(grid.get(0, 0).moisture(), Some(3));
        assert_eq!(grid.get(1, 0).moisture(), Some(3));
    }

    #[test]
    fn nearly_dry_wet_sand_keeps_its_moisture() {
        let grid = grid_from(&["ms"]);
        let mut rng = 2;
        assert!(!diffuse(&mut UpdateContext::new(&grid, 0, 0, &mut rng)));
    }
}
