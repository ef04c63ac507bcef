use super::super::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Grid {
    // === Tick bookkeeping ===

    /// Prepare for a pass: clear every per-tick flag, flip the scan direction
    /// and rescan stale chunk masks so queries start from exact data.
    pub fn begin_tick(&mut self) {
        #[cfg(feature = "parallel")]
        {
            self.cells.par_iter_mut().for_each(|cell| cell.get_mut().begin_tick());
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.cells.iter_mut().for_each(|cell| cell.get_mut().begin_tick());
        }

        self.is_flipped = !self.is_flipped;

        let stale: Vec<(u32, u32)> = self.chunks.invalid_chunks().collect();
        for (cx, cy) in stale {
            self.rebuild_chunk_types(cx, cy);
        }
    }

    /// Finish a pass: every chunk is handed to the renderer again.
    pub fn end_tick(&mut self) {
        self.chunks.mark_all_dirty();
    }

    #[inline]
    pub fn changed_this_tick(&self, x: u32, y: u32) -> bool {
        self.get(x, y).changed_this_tick
    }

    /// Set the diagnostic "behavior ran" flag without touching chunk state.
    #[inline]
    pub(crate) fn mark_received_update(&self, x: u32, y: u32) {
        let idx = self.cell_index(x, y);
        let cell = fast!(self.cells, [idx]);
        let mut particle = cell.get();
        particle.received_update = true;
        cell.set(particle);
    }
}
