use super::*;

impl ChunkGrid {
    /// Neighbor offsets, one per bit of a border mask:
    /// left, right, top, bottom, top-left, top-right, bottom-left, bottom-right.
    const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
        (-1, 0),
        (1, 0),
        (0, -1),
        (0, 1),
        (-1, -1),
        (1, -1),
        (-1, 1),
        (1, 1),
    ];

    /// Index: `on_left | on_right << 1 | on_top << 2 | on_bottom << 3`.
    /// Value: which neighbors also cover the cell in their one-cell border.
    const BORDER_LUT: [u8; 16] = [
        0b0000_0000,
        0b0000_0001,
        0b0000_0010,
        0b0000_0011,
        0b0000_0100,
        0b0001_0101,
        0b0010_0110,
        0b0011_0111,
        0b0000_1000,
        0b0100_1001,
        0b1000_1010,
        0b1100_1011,
        0b0000_1100,
        0b0101_1101,
        0b1010_1110,
        0b1111_1111,
    ];

    // === Chunk indexing ===

    #[inline]
    pub fn chunk_coords(&self, x: u32, y: u32) -> (u32, u32) {
        (x / CHUNK_SIZE, y / CHUNK_SIZE)
    }

    #[inline]
    pub fn chunk_idx_from_coords(&self, cx: u32, cy: u32) -> usize {
        (cy * self.chunks_x + cx) as usize
    }

    #[inline]
    pub fn chunk_in_bounds(&self, cx: i32, cy: i32) -> bool {
        cx >= 0 && cx < self.chunks_x as i32 && cy >= 0 && cy < self.chunks_y as i32
    }

    // === Type masks ===

    /// Record that cell (x, y) now holds a particle of `type_bit`: the home
    /// chunk, plus every neighbor whose border contains the cell, gets the
    /// bit, a dirty flag and an invalidated cache.
    pub fn mark_cell_changed(&self, x: u32, y: u32, type_bit: u32) {
        let (cx, cy) = self.chunk_coords(x, y);
        let home = self.chunk_idx_from_coords(cx, cy);
        let Some(chunk) = self.chunks.get(home) else {
            return;
        };
        chunk.touch(type_bit);

        let local_x = x & (CHUNK_SIZE - 1);
        let local_y = y & (CHUNK_SIZE - 1);
        let on_left = (local_x == 0) as usize;
        let on_right = (local_x == CHUNK_SIZE - 1) as usize;
        let on_top = (local_y == 0) as usize;
        let on_bottom = (local_y == CHUNK_SIZE - 1) as usize;

        let mut mask = Self::BORDER_LUT[on_left | (on_right << 1) | (on_top << 2) | (on_bottom << 3)];
        while mask != 0 {
            let bit = mask.trailing_zeros() as usize;
            mask &= mask - 1;

            let (dx, dy) = Self::NEIGHBOR_OFFSETS[bit];
            let ncx = cx as i32 + dx;
            let ncy = cy as i32 + dy;
            if self.chunk_in_bounds(ncx, ncy) {
                self.chunks[self.chunk_idx_from_coords(ncx as u32, ncy as u32)].touch(type_bit);
            }
        }
    }

    /// Current mask of a chunk, valid or not. Out-of-range chunks report 0.
    #[inline]
    pub fn mask_at(&self, cx: u32, cy: u32) -> u32 {
        self.chunk(cx, cy).map_or(0, Chunk::type_mask)
    }

    #[inline]
    pub fn is_type_data_valid(&self, cx: u32, cy: u32) -> bool {
        self.chunk(cx, cy).is_some_and(Chunk::is_type_data_valid)
    }
}
