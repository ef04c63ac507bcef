use super::super::*;

use crate::domain::create_particle;

impl Grid {
    // === Raw write (in-bounds only) ===

    /// Store `particle` at (x, y): stamp its position, flag it changed and
    /// report the new type to the chunk index.
    #[inline]
    pub(crate) fn write_cell(&self, x: u32, y: u32, mut particle: Particle) {
        particle.place_at(x, y);
        particle.changed_this_tick = true;
        let idx = self.cell_index(x, y);
        fast!(self.cells, [idx]).set(particle);
        self.chunks.mark_cell_changed(x, y, particle.type_id.bit());
    }

    /// Edit a particle where it stands (payload changes). The particle is
    /// flagged changed and its chunk dirtied like any other write.
    #[inline]
    pub(crate) fn modify(&self, x: u32, y: u32, edit: impl FnOnce(&mut Particle)) {
        let mut particle = self.get(x, y);
        edit(&mut particle);
        self.write_cell(x, y, particle);
    }

    // === Checked writes used during a tick ===

    /// Returns `false` and logs when (x, y) is off-grid.
    pub(crate) fn place(&self, x: i32, y: i32, particle: Particle) -> bool {
        if !self.in_bounds(x, y) {
            log::debug!("set out of bounds at ({x}, {y}) on {}x{} grid", self.width, self.height);
            return false;
        }
        self.write_cell(x as u32, y as u32, particle);
        true
    }

    /// Overwrite with Empty; silently ignores off-grid cells.
    pub(crate) fn clear_cell(&self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            self.write_cell(x as u32, y as u32, self.empty);
        }
    }

    // === Public API ===

    /// Checked write. Off-grid writes are logged and dropped.
    pub fn set(&mut self, x: i32, y: i32, particle: Particle) {
        self.place(x, y, particle);
    }

    /// Replace with a fresh Empty particle. Off-grid is a silent no-op.
    pub fn remove(&mut self, x: i32, y: i32) {
        self.clear_cell(x, y);
    }

    /// Build a particle of `type_id` from the registry and write it.
    pub fn spawn(&mut self, x: i32, y: i32, type_id: ParticleTypeId) {
        if !self.in_bounds(x, y) {
            return;
        }
        let particle = create_particle(&self.registry, type_id, &mut self.rng_state);
        self.write_cell(x as u32, y as u32, particle);
    }
}
