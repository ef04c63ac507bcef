//! Grainfall Engine - falling-sand cellular automaton for the browser
//!
//! Architecture:
//! - core/        - Worker pool, random stream, logging, hot-path macros
//! - domain/      - Particle data model and the type registry
//! - spatial/     - Grid storage and the chunk index over it
//! - systems/     - Per-type behavior rules
//! - simulation/  - Tick loop, brush, rendering extraction, wasm facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod error;
pub mod simulation;
pub mod spatial;
pub mod systems;

pub use spatial::chunks;
pub use spatial::grid;
pub use systems::behaviors;

use wasm_bindgen::prelude::*;

pub use domain::{BehaviorKind, MatterState, Particle, ParticleTypeId, Payload, Rgb, TypeRegistry};
pub use error::{EngineError, Result};
pub use grid::Grid;
pub use simulation::{PerfStats, Simulation, SimulationConfig, World};

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and console logging. Safe to call twice.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    core::logging::install(log::LevelFilter::Info);
    log::info!("grainfall engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Particle type ids for JS
#[wasm_bindgen]
pub fn pt_empty() -> u8 { ParticleTypeId::Empty as u8 }
#[wasm_bindgen]
pub fn pt_sand() -> u8 { ParticleTypeId::Sand as u8 }
#[wasm_bindgen]
pub fn pt_water() -> u8 { ParticleTypeId::Water as u8 }
#[wasm_bindgen]
pub fn pt_stone() -> u8 { ParticleTypeId::Stone as u8 }
#[wasm_bindgen]
pub fn pt_wet_sand() -> u8 { ParticleTypeId::WetSand as u8 }
