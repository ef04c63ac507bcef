use super::*;

impl ChunkGrid {
    // === Dirty flags ===

    #[inline]
    pub fn is_dirty(&self, cx: u32, cy: u32) -> bool {
        self.chunk(cx, cy)
            .is_some_and(|chunk| chunk.dirty.load(Ordering::Acquire))
    }

    #[inline]
    pub fn clear_dirty(&self, cx: u32, cy: u32) {
        if let Some(chunk) = self.chunk(cx, cy) {
            chunk.dirty.store(false, Ordering::Release);
        }
    }

    /// Force a redraw of everything.
    pub fn mark_all_dirty(&self) {
        for chunk in self.chunks.iter() {
            chunk.dirty.store(true, Ordering::Release);
        }
    }

    /// Coordinates of dirty chunks that cover grid cells, clearing every dirty
    /// flag (slack tiles included).
    pub fn take_dirty(&self) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for cy in 0..self.chunks_y {
            for cx in 0..self.chunks_x {
                let chunk = &self.chunks[self.chunk_idx_from_coords(cx, cy)];
                let was_dirty = chunk.dirty.swap(false, Ordering::AcqRel);
                if was_dirty && cx < self.covered_x && cy < self.covered_y {
                    out.push((cx, cy));
                }
            }
        }
        out
    }

    // === Type mask rebuild ===

    /// Replace a chunk's mask with a freshly scanned one and mark it valid.
    pub fn store_mask(&self, cx: u32, cy: u32, mask: u32) {
        if let Some(chunk) = self.chunk(cx, cy) {
            chunk.type_mask.store(mask, Ordering::Release);
            chunk.type_data_valid.store(true, Ordering::Release);
        }
    }

    /// Chunks whose masks need a rescan.
    pub fn invalid_chunks(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let chunks_x = self.chunks_x;
        self.chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| !chunk.is_type_data_valid())
            .map(move |(idx, _)| (idx as u32 % chunks_x, idx as u32 / chunks_x))
    }
}
