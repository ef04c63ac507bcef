use crate::grid::Grid;

/// 8-neighborhood, column by column.
pub const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Can a moving particle take (x, y)? Empty cells always; non-solid ones only
/// if their occupant has not acted yet this tick. Off-grid never.
#[inline]
pub fn can_enter(grid: &Grid, x: i32, y: i32) -> bool {
    match grid.particle(x, y) {
        Some(target) if target.is_empty() => true,
        Some(target) => !target.is_solid() && !target.changed_this_tick,
        None => false,
    }
}
