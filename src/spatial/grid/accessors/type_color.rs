use super::super::*;

use crate::domain::{MatterState, Rgb};

impl Grid {
    /// Fast read for hot paths. Caller must have validated `x < width`,
    /// `y < height`; only debug builds check.
    #[inline(always)]
    pub fn get(&self, x: u32, y: u32) -> Particle {
        let idx = self.cell_index(x, y);
        fast!(self.cells, [idx]).get()
    }

    #[inline(always)]
    pub(crate) fn get_idx(&self, idx: usize) -> Particle {
        fast!(self.cells, [idx]).get()
    }

    /// Checked read.
    #[inline]
    pub fn particle(&self, x: i32, y: i32) -> Option<Particle> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.get(x as u32, y as u32))
    }

    /// Out-of-bounds cells report Empty.
    #[inline]
    pub fn type_at(&self, x: i32, y: i32) -> ParticleTypeId {
        self.particle(x, y).map_or(ParticleTypeId::Empty, |p| p.type_id)
    }

    /// `false` off-grid: the exterior is a wall, not open space.
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.particle(x, y).is_some_and(|p| p.is_empty())
    }

    /// `false` off-grid.
    #[inline]
    pub fn is_non_solid(&self, x: i32, y: i32) -> bool {
        self.particle(x, y).is_some_and(|p| p.state != MatterState::Solid)
    }

    /// Palette color with moisture darkening, for rendering.
    #[inline]
    pub fn display_color(&self, x: u32, y: u32) -> Rgb {
        self.get(x, y).display_color()
    }

    /// Row-major copy of every particle.
    pub fn particles(&self) -> impl Iterator<Item = Particle> + '_ {
        self.cells.iter().map(Cell::get)
    }

    /// Non-empty cells.
    pub fn particle_count(&self) -> usize {
        self.particles().filter(|p| !p.is_empty()).count()
    }
}
