use crate::chunks::CHUNK_SIZE;

use super::Simulation;

/// Display color of every cell, row-major, packed as ABGR (little-endian
/// RGBA bytes, the layout `ImageData` expects).
pub(super) fn colors_abgr(sim: &Simulation) -> Vec<u32> {
    let grid = &sim.grid;
    (0..grid.size())
        .map(|idx| {
            let (x, y) = grid.coords(idx);
            grid.display_color(x, y).to_abgr()
        })
        .collect()
}

/// Pixels of one chunk as a `CHUNK_SIZE`-strided block. Cells past the grid
/// edge stay zero (transparent). `None` for chunks outside the grid.
pub(super) fn chunk_pixels(sim: &Simulation, cx: u32, cy: u32) -> Option<Vec<u32>> {
    let grid = &sim.grid;
    let start_x = cx.checked_mul(CHUNK_SIZE)?;
    let start_y = cy.checked_mul(CHUNK_SIZE)?;
    if start_x >= grid.width() || start_y >= grid.height() {
        return None;
    }
    let end_x = (start_x + CHUNK_SIZE).min(grid.width());
    let end_y = (start_y + CHUNK_SIZE).min(grid.height());

    let mut block = vec![0u32; (CHUNK_SIZE * CHUNK_SIZE) as usize];
    for y in start_y..end_y {
        let row = ((y - start_y) * CHUNK_SIZE) as usize;
        for x in start_x..end_x {
            block[row + (x - start_x) as usize] = grid.display_color(x, y).to_abgr();
        }
    }
    Some(block)
}
