use crate::domain::ParticleTypeId;

use super::Simulation;

/// Cells of the disc `dx² + dy² < radius²` around (cx, cy) that lie on the grid.
fn disc_cells(sim: &Simulation, cx: i32, cy: i32, radius: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
    let radius = radius.max(0);
    let r2 = radius * radius;
    (-radius..=radius)
        .flat_map(move |dy| (-radius..=radius).map(move |dx| (dx, dy)))
        .filter(move |(dx, dy)| dx * dx + dy * dy < r2)
        .map(move |(dx, dy)| (cx + dx, cy + dy))
        .filter(move |&(x, y)| sim.grid.in_bounds(x, y))
}

/// Overwrite every cell in the disc with a fresh `type_id` particle.
/// Returns the number of cells written.
pub(super) fn paint_disc(sim: &mut Simulation, cx: i32, cy: i32, radius: i32, type_id: ParticleTypeId) -> usize {
    if type_id == ParticleTypeId::Empty {
        return erase_disc(sim, cx, cy, radius);
    }
    let cells: Vec<(i32, i32)> = disc_cells(sim, cx, cy, radius).collect();
    for &(x, y) in &cells {
        sim.grid.spawn(x, y, type_id);
    }
    cells.len()
}

/// Clear every non-empty cell in the disc. Returns how many were cleared.
pub(super) fn erase_disc(sim: &mut Simulation, cx: i32, cy: i32, radius: i32) -> usize {
    let occupied: Vec<(i32, i32)> = disc_cells(sim, cx, cy, radius)
        .filter(|&(x, y)| !sim.grid.is_empty(x, y))
        .collect();
    for &(x, y) in &occupied {
        sim.grid.remove(x, y);
    }
    occupied.len()
}
