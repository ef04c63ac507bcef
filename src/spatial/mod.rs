//! Spatial storage: the particle grid and its chunk index.

pub mod chunks;
pub mod grid;
