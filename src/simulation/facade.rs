use wasm_bindgen::prelude::*;

use crate::domain::ParticleTypeId;
use crate::error::EngineError;

use super::config::SimulationConfig;
use super::perf_stats::PerfStats;
use super::Simulation;

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct World {
    core: Simulation,
}

#[wasm_bindgen]
impl World {
    /// Create a world with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<World, JsValue> {
        let core = Simulation::with_size(width, height).map_err(to_js)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<World, JsValue> {
        let config = SimulationConfig::from_json(json).map_err(to_js)?;
        let core = Simulation::new(config).map_err(to_js)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> f64 { self.core.tick_count() as f64 }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    pub fn step(&mut self) {
        self.core.step();
    }

    /// Paint a disc of `type_id` (0 erases). Unknown ids paint nothing.
    pub fn paint(&mut self, cx: i32, cy: i32, radius: i32, type_id: u8) -> u32 {
        match ParticleTypeId::from_u8(type_id) {
            Some(type_id) => self.core.paint_disc(cx, cy, radius, type_id) as u32,
            None => {
                log::warn!("paint with unknown particle type {type_id}");
                0
            }
        }
    }

    pub fn erase(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.core.erase_disc(cx, cy, radius) as u32
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    #[wasm_bindgen(js_name = loadContentBundle)]
    pub fn load_content_bundle(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_content_bundle_json(&json).map_err(to_js)
    }

    pub fn get_content_manifest_json(&self) -> String {
        self.core.manifest_json()
    }

    /// Dirty chunks as `[cx0, cy0, cx1, cy1, ...]`; clears their flags.
    #[wasm_bindgen(js_name = takeDirtyChunks)]
    pub fn take_dirty_chunks(&mut self) -> Vec<u32> {
        self.core
            .take_dirty_chunks()
            .into_iter()
            .flat_map(|(cx, cy)| [cx, cy])
            .collect()
    }

    /// Whole-grid ABGR pixels for `ImageData`.
    pub fn colors(&self) -> Vec<u32> {
        self.core.render_colors_abgr()
    }

    /// One chunk's ABGR pixels (`CHUNK_SIZE` stride); empty for chunks off the grid.
    pub fn chunk_pixels(&self, cx: u32, cy: u32) -> Vec<u32> {
        self.core.chunk_pixels_abgr(cx, cy).unwrap_or_default()
    }

    pub fn set_parallel(&mut self, enabled: bool) -> Result<(), JsValue> {
        self.core.set_parallel(enabled).map_err(to_js)
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }
}
