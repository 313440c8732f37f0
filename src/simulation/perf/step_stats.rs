use wasm_bindgen::prelude::*;

/// Snapshot of one tick. Timings are only filled when perf metrics are on;
/// counters are cheap and always kept.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepStats {
    pub(super) step_ms: f64,
    pub(super) field_ms: f64,
    pub(super) propose_ms: f64,
    pub(super) commit_ms: f64,
    pub(super) particles_evaluated: u32,
    pub(super) proposals: u32,
    pub(super) moves: u32,
    pub(super) conversions: u32,
    pub(super) conflicts: u32,
    pub(super) score_field: bool,
}

impl StepStats {
    pub(crate) fn reset(&mut self) {
        *self = StepStats::default();
    }
}

#[wasm_bindgen]
impl StepStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn field_ms(&self) -> f64 { self.field_ms }
    #[wasm_bindgen(getter)]
    pub fn propose_ms(&self) -> f64 { self.propose_ms }
    #[wasm_bindgen(getter)]
    pub fn commit_ms(&self) -> f64 { self.commit_ms }
    #[wasm_bindgen(getter)]
    pub fn particles_evaluated(&self) -> u32 { self.particles_evaluated }
    /// Particles that wanted to MOVE or CONVERT_NEIGHBOR
    #[wasm_bindgen(getter)]
    pub fn proposals(&self) -> u32 { self.proposals }
    #[wasm_bindgen(getter)]
    pub fn moves(&self) -> u32 { self.moves }
    #[wasm_bindgen(getter)]
    pub fn conversions(&self) -> u32 { self.conversions }
    /// Proposals that lost a claimed cell and stayed
    #[wasm_bindgen(getter)]
    pub fn conflicts(&self) -> u32 { self.conflicts }
    #[wasm_bindgen(getter)]
    pub fn score_field(&self) -> bool { self.score_field }
}
