//! Affinity Engine - typed particles sorting themselves on a grid, in WASM
//!
//! Every particle type has a signed affinity toward every other type. Each
//! tick, particles move to empty cells where they are happier, or convert a
//! neighbour they like, and the grid is exported as one byte per cell.
//!
//! Architecture:
//! - core/        - grid storage, errors, logging
//! - domain/      - type ids, affinity matrix, configuration
//! - systems/     - neighborhood scoring
//! - simulation/  - orchestration, stepping, export, JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    core::logging::init_console_logger(level);
    log::info!("affinity engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::error::{BoundsError, ConfigError};
pub use crate::core::grid::Grid;
pub use domain::affinity::AffinityMatrix;
pub use domain::config::SimConfig;
pub use domain::types::{TypeId, EMPTY};
pub use simulation::{ParticleGrid, SimulationCore, StepStats};
pub use systems::scorer::{Happiness, NeighborhoodScorer};
