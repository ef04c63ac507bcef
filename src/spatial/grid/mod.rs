//! Grid - contiguous particle storage plus the chunk index over it.
//!
//! Cells are `Cell<Particle>` so rules can read and write neighbors through a
//! shared `&Grid`. That makes `Grid` `!Sync`; the banded parallel traversal
//! shares it across threads under its own row-partitioning discipline.
//!
//! Public mutators take `&mut self`. The `&self` write primitives are
//! crate-internal and used by behaviors during a tick.

use std::cell::Cell;
use std::sync::Arc;

use crate::chunks::ChunkGrid;
use crate::domain::{empty_particle, Particle, ParticleTypeId, TypeRegistry};
use crate::error::{EngineError, Result};

mod accessors;
mod indexing;
mod moves;
mod query;

/// Positions are stored as `u16`.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,
    cells: Box<[Cell<Particle>]>,
    chunks: ChunkGrid,
    registry: Arc<TypeRegistry>,
    empty: Particle,
    /// Palette sampling for `spawn`.
    rng_state: u32,
    is_flipped: bool,
}

impl Grid {
    pub fn new(width: u32, height: u32, registry: Arc<TypeRegistry>, seed: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }
        if seed == 0 {
            return Err(EngineError::ZeroSeed);
        }

        let size = (width * height) as usize;
        let empty = empty_particle(&registry);
        let cells = (0..size)
            .map(|idx| {
                let mut p = empty;
                p.place_at(idx as u32 % width, idx as u32 / width);
                Cell::new(p)
            })
            .collect();

        Ok(Self {
            width,
            height,
            size,
            cells,
            chunks: ChunkGrid::new(width, height, ParticleTypeId::Empty.bit()),
            registry,
            empty,
            rng_state: seed,
            is_flipped: false,
        })
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Swap in retuned content. Existing particles keep the colors and
    /// densities they were created with.
    pub fn set_registry(&mut self, registry: Arc<TypeRegistry>) {
        self.empty = empty_particle(&registry);
        self.registry = registry;
    }

    #[inline]
    pub fn chunks(&self) -> &ChunkGrid {
        &self.chunks
    }

    /// Global scan-direction flip, toggled once per tick.
    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Reset every cell to Empty.
    pub fn clear(&mut self) {
        for idx in 0..self.size {
            let (x, y) = self.coords(idx);
            self.write_cell(x, y, self.empty);
        }
    }
}
