use wasm_bindgen::prelude::*;

/// Numbers from the most recent tick. Only refreshed while perf metrics are
/// enabled; `ticks` counts the measured ticks since the last reset.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) tick_ms: f64,
    pub(super) cells_visited: u32,
    pub(super) behaviors_run: u32,
    pub(super) parallel: bool,
    pub(super) ticks: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn cells_visited(&self) -> u32 { self.cells_visited }
    #[wasm_bindgen(getter)]
    pub fn behaviors_run(&self) -> u32 { self.behaviors_run }
    #[wasm_bindgen(getter)]
    pub fn parallel(&self) -> bool { self.parallel }
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u32 { self.ticks }
}
