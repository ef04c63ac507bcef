//! Neighborhood type queries backed by chunk masks.

use super::*;
use crate::chunks::CHUNK_SIZE;

impl Grid {
    /// Could a particle of `type_id` be inside the box of half-extent
    /// (`radius_x`, `radius_y`) around (x, y)?
    ///
    /// `false` is a guarantee; `true` may be a false positive. The center may
    /// lie off the grid; only the part of the box on the grid is searched.
    /// Stale chunk masks are rescanned on the way.
    pub fn is_particle_near_type(
        &self,
        x: i32,
        y: i32,
        type_id: ParticleTypeId,
        radius_x: u32,
        radius_y: u32,
    ) -> bool {
        self.near_type(x, y, type_id, radius_x, radius_y, true)
    }

    /// Same query; with `rebuild == false` stale masks are read as-is. They
    /// are still supersets, so the answer stays sound. Band workers use this
    /// since a rescan would read cells owned by another band.
    pub(crate) fn near_type(
        &self,
        x: i32,
        y: i32,
        type_id: ParticleTypeId,
        radius_x: u32,
        radius_y: u32,
        rebuild: bool,
    ) -> bool {
        let (lo_x, hi_x) = (x as i64 - radius_x as i64, x as i64 + radius_x as i64);
        let (lo_y, hi_y) = (y as i64 - radius_y as i64, y as i64 + radius_y as i64);
        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        if hi_x < 0 || lo_x > max_x || hi_y < 0 || lo_y > max_y {
            return false;
        }
        let x0 = lo_x.clamp(0, max_x) as u32;
        let x1 = hi_x.clamp(0, max_x) as u32;
        let y0 = lo_y.clamp(0, max_y) as u32;
        let y1 = hi_y.clamp(0, max_y) as u32;

        let bit = type_id.bit();
        for cy in y0 / CHUNK_SIZE..=y1 / CHUNK_SIZE {
            for cx in x0 / CHUNK_SIZE..=x1 / CHUNK_SIZE {
                if rebuild && !self.chunks.is_type_data_valid(cx, cy) {
                    self.rebuild_chunk_types(cx, cy);
                }
                if self.chunks.mask_at(cx, cy) & bit != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Exact mask for a chunk and its one-cell border.
    pub(crate) fn rebuild_chunk_types(&self, cx: u32, cy: u32) {
        let x_start = (cx * CHUNK_SIZE).saturating_sub(1);
        let y_start = (cy * CHUNK_SIZE).saturating_sub(1);
        let x_end = ((cx + 1) * CHUNK_SIZE + 1).min(self.width);
        let y_end = ((cy + 1) * CHUNK_SIZE + 1).min(self.height);

        let mut mask = 0u32;
        for y in y_start..y_end {
            let row = self.cell_index(0, y);
            for x in x_start..x_end {
                mask |= self.get_idx(row + x as usize).type_id.bit();
            }
        }
        self.chunks.store_mask(cx, cy, mask);
    }
}
