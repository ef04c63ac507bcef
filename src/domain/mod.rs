//! Particle data model: type ids, payloads, palettes and the type registry.

pub mod color;
pub mod content;
pub mod factory;
pub mod particle;

pub use color::{Palette, PaletteEntry, Rgb};
pub use content::{BehaviorKind, TypeProps, TypeRegistry};
pub use factory::{create_particle, empty_particle};
pub use particle::{MatterState, Particle, ParticleTypeId, Payload, PARTICLE_TYPE_COUNT};
