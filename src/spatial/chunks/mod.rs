//! Chunk System - fixed-size tiles carrying dirty flags and type-presence masks.
//!
//! Chunks own no particles. Every grid write reports the cell and its new type
//! here, so the metadata can be shared between band workers: all fields are
//! atomics and only ever grow (OR) between explicit rebuilds.
//!
//! A chunk's type mask covers its own cells plus a one-cell border. A clear bit
//! guarantees the type is absent from that area; a set bit only means "maybe".

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

mod bitset;
mod lifecycle;

/// Chunk edge length in cells (power of two).
pub const CHUNK_SIZE: u32 = 32;

#[derive(Debug)]
pub struct Chunk {
    dirty: AtomicBool,
    type_mask: AtomicU32,
    type_data_valid: AtomicBool,
}

impl Chunk {
    fn new(mask: u32) -> Self {
        Self {
            dirty: AtomicBool::new(true),
            type_mask: AtomicU32::new(mask),
            type_data_valid: AtomicBool::new(true),
        }
    }

    #[inline]
    pub fn type_mask(&self) -> u32 {
        self.type_mask.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_type_data_valid(&self) -> bool {
        self.type_data_valid.load(Ordering::Acquire)
    }

    #[inline]
    fn touch(&self, type_bit: u32) {
        self.type_mask.fetch_or(type_bit, Ordering::AcqRel);
        self.type_data_valid.store(false, Ordering::Release);
        self.dirty.store(true, Ordering::Release);
    }
}

/// Chunk array sized `ceil(w / CHUNK_SIZE) + 1` by `ceil(h / CHUNK_SIZE) + 1`;
/// the extra column and row are slack tiles that never cover a grid cell.
#[derive(Debug)]
pub struct ChunkGrid {
    chunks_x: u32,
    chunks_y: u32,
    covered_x: u32,
    covered_y: u32,
    chunks: Box<[Chunk]>,
}

impl ChunkGrid {
    /// Every chunk starts dirty with `initial_mask` marked valid.
    pub fn new(world_width: u32, world_height: u32, initial_mask: u32) -> Self {
        let covered_x = world_width.div_ceil(CHUNK_SIZE);
        let covered_y = world_height.div_ceil(CHUNK_SIZE);
        let chunks_x = covered_x + 1;
        let chunks_y = covered_y + 1;
        let chunks = (0..chunks_x * chunks_y).map(|_| Chunk::new(initial_mask)).collect();

        Self {
            chunks_x,
            chunks_y,
            covered_x,
            covered_y,
            chunks,
        }
    }

    /// Dimensions including the slack row and column.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.chunks_x, self.chunks_y)
    }

    /// Chunks that overlap at least one grid cell.
    pub fn covered_dimensions(&self) -> (u32, u32) {
        (self.covered_x, self.covered_y)
    }

    pub fn total_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, cx: u32, cy: u32) -> Option<&Chunk> {
        if cx >= self.chunks_x || cy >= self.chunks_y {
            return None;
        }
        self.chunks.get(self.chunk_idx_from_coords(cx, cy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParticleTypeId;

    const EMPTY: u32 = ParticleTypeId::Empty.bit();
    const SAND: u32 = ParticleTypeId::Sand.bit();
    const WATER: u32 = ParticleTypeId::Water.bit();

    #[test]
    fn sizing_adds_one_slack_tile_per_axis() {
        let chunks = ChunkGrid::new(100, 64, EMPTY);
        assert_eq!(chunks.covered_dimensions(), (4, 2));
        assert_eq!(chunks.dimensions(), (5, 3));
        assert_eq!(chunks.total_chunks(), 15);
    }

    #[test]
    fn interior_write_touches_only_home_chunk() {
        let chunks = ChunkGrid::new(96, 96, EMPTY);
        chunks.take_dirty();

        chunks.mark_cell_changed(40, 40, SAND);
        assert_eq!(chunks.take_dirty(), vec![(1, 1)]);
        assert_eq!(chunks.mask_at(1, 1), EMPTY | SAND);
        assert_eq!(chunks.mask_at(0, 0), EMPTY);
        assert!(!chunks.chunk(1, 1).is_some_and(Chunk::is_type_data_valid));
    }

    #[test]
    fn corner_write_reaches_diagonal_neighbor() {
        let chunks = ChunkGrid::new(96, 96, EMPTY);
        chunks.take_dirty();

        // Top-left corner of chunk (1, 1).
        chunks.mark_cell_changed(32, 32, WATER);
        let mut dirty = chunks.take_dirty();
        dirty.sort_unstable();
        assert_eq!(dirty, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        for (cx, cy) in dirty {
            assert_ne!(chunks.mask_at(cx, cy) & WATER, 0);
        }
        assert_eq!(chunks.mask_at(2, 1) & WATER, 0);
    }

    #[test]
    fn store_mask_revalidates() {
        let chunks = ChunkGrid::new(32, 32, EMPTY);
        chunks.mark_cell_changed(5, 5, SAND);
        chunks.store_mask(0, 0, EMPTY);
        let chunk = chunks.chunk(0, 0).expect("chunk exists");
        assert!(chunk.is_type_data_valid());
        assert_eq!(chunk.type_mask(), EMPTY);
    }

    #[test]
    fn mark_all_dirty_reports_only_covered_chunks() {
        let chunks = ChunkGrid::new(64, 32, EMPTY);
        chunks.take_dirty();
        chunks.mark_all_dirty();
        let mut dirty = chunks.take_dirty();
        dirty.sort_unstable();
        assert_eq!(dirty, vec![(0, 0), (1, 0)]);
        assert!(chunks.take_dirty().is_empty());
    }
}
