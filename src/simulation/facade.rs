use wasm_bindgen::prelude::*;

use crate::domain::config::SimConfig;

use super::step_stats::StepStats;
use super::SimulationCore;

fn to_js(err: crate::core::error::ConfigError) -> JsValue {
    log::error!("{err}");
    JsValue::from_str(&err.to_string())
}

/// JS handle to one simulation. A restart is a new `ParticleGrid`; the old
/// one (and any view into its memory) must be dropped.
#[wasm_bindgen]
pub struct ParticleGrid {
    core: SimulationCore,
}

impl ParticleGrid {
    fn from_config(config: SimConfig) -> Result<ParticleGrid, JsValue> {
        let core = SimulationCore::new(config).map_err(to_js)?;
        Ok(ParticleGrid { core })
    }

    /// Native access to the engine behind the handle
    pub fn core(&self) -> &SimulationCore {
        &self.core
    }
}

#[wasm_bindgen]
impl ParticleGrid {
    /// Create a grid with random placement. `affinity` is `num_types²`
    /// row-major scores in [-100, 100]; random when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(
        size: u32,
        num_types: u32,
        density: f32,
        radius: u32,
        affinity: Option<Vec<i32>>,
    ) -> Result<ParticleGrid, JsValue> {
        let mut config = SimConfig::new(size, num_types, density, radius);
        config.affinity = affinity;
        Self::from_config(config)
    }

    /// Same as the constructor, with a fixed seed for reproducible runs
    #[wasm_bindgen(js_name = newSeeded)]
    pub fn new_seeded(
        size: u32,
        num_types: u32,
        density: f32,
        radius: u32,
        affinity: Option<Vec<i32>>,
        seed: u64,
    ) -> Result<ParticleGrid, JsValue> {
        let mut config = SimConfig::new(size, num_types, density, radius).with_seed(seed);
        config.affinity = affinity;
        Self::from_config(config)
    }

    /// Build from a JSON configuration (camelCase keys)
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: String) -> Result<ParticleGrid, JsValue> {
        let config = SimConfig::from_json(&json).map_err(to_js)?;
        Self::from_config(config)
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> u32 { self.core.size() }

    #[wasm_bindgen(getter)]
    pub fn num_types(&self) -> u32 { self.core.num_types() }

    #[wasm_bindgen(getter)]
    pub fn density(&self) -> f32 { self.core.density() }

    #[wasm_bindgen(getter)]
    pub fn radius(&self) -> u32 { self.core.radius() }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.core.tick() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() }

    /// Advance one tick
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Copy of the grid: `size*size` bytes, row-major, value = type id
    pub fn export_grid(&self) -> Vec<u8> {
        self.core.export_grid()
    }

    /// Pointer to the grid in wasm memory; re-read after every `step()`
    pub fn types_ptr(&self) -> *const u8 {
        self.core.types_ptr()
    }

    pub fn types_len(&self) -> usize {
        self.core.types_len()
    }

    /// Row-major `num_types²` affinity scores in use
    pub fn affinity_values(&self) -> Vec<i32> {
        self.core.affinity().to_values()
    }

    pub fn mean_happiness(&self) -> f64 {
        self.core.mean_happiness()
    }

    /// Enable or disable per-step timings (adds overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_step_stats(&self) -> StepStats {
        self.core.last_stats()
    }

    pub fn debug_info(&self) -> String {
        self.core.debug_info()
    }
}
