//! Simulation - owns the grid and advances it one tick at a time
//!
//! `SimulationCore` orchestrates only; the work lives in the submodules:
//! - init/    - validation and initial placement
//! - step/    - proposal (parallel, read-only) and commit (ordered) phases
//! - render/  - byte export for the renderer
//! - perf/    - opt-in per-tick timings and counters
//!
//! Each tick reads one snapshot and writes a separate back buffer, then the
//! two are swapped. Nothing observes a half-applied tick.

use crate::core::error::ConfigError;
use crate::core::grid::Grid;
use crate::domain::affinity::AffinityMatrix;
use crate::domain::config::SimConfig;
use crate::domain::types::TypeId;
use crate::systems::scorer::{NeighborhoodScorer, ScoreField};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/step_stats.rs"]
mod step_stats;
#[path = "init/init.rs"]
mod init;
#[path = "step/proposals.rs"]
mod proposals;
#[path = "step/commit.rs"]
mod commit;
#[path = "step/step.rs"]
mod step;
#[path = "render/export.rs"]
mod export;
mod facade;

pub use facade::ParticleGrid;
pub use init::build;
pub use proposals::{Action, Proposal};
pub use step_stats::StepStats;

use perf_timer::PerfTimer;

/// The simulation engine
pub struct SimulationCore {
    config: SimConfig,
    affinity: AffinityMatrix,

    // Double buffer: `grid` is the committed state, `next` receives the tick
    grid: Grid,
    next: Grid,
    claimed: Vec<bool>,
    proposals: Vec<Proposal>,
    field: Option<ScoreField>,

    // State
    particle_count: u32,
    tick: u64,

    // Perf metrics
    perf_enabled: bool,
    stats: StepStats,
}

impl SimulationCore {
    /// Validate `config`, seed a grid and an affinity table, and wrap them.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        init::create_core(config)
    }

    /// Start from a caller-supplied grid and affinity table.
    ///
    /// `config.density` and `config.seed` are not used. `config.affinity` may
    /// be left empty; when set it must equal `affinity`.
    pub fn from_parts(config: SimConfig, grid: Grid, affinity: AffinityMatrix) -> Result<Self, ConfigError> {
        init::create_core_from_parts(config, grid, affinity)
    }

    pub fn config(&self) -> &SimConfig { &self.config }

    pub fn size(&self) -> u32 { self.config.size }

    pub fn num_types(&self) -> u32 { self.config.num_types }

    pub fn density(&self) -> f32 { self.config.density }

    pub fn radius(&self) -> u32 { self.config.radius }

    pub fn tick(&self) -> u64 { self.tick }

    pub fn particle_count(&self) -> u32 { self.particle_count }

    pub fn affinity(&self) -> &AffinityMatrix { &self.affinity }

    /// Most recently committed grid
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Whether ticks score through summed-area tables (false = direct scans)
    pub fn uses_score_field(&self) -> bool { self.field.is_some() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
        if !enabled {
            self.stats.reset();
        }
    }

    /// Counters of the last tick; timings stay zero unless perf metrics are on
    pub fn last_stats(&self) -> StepStats {
        self.stats.clone()
    }

    /// Advance exactly one tick.
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Scorer over the committed grid, with the engine's radius and threshold
    pub fn scorer(&self) -> NeighborhoodScorer<'_> {
        NeighborhoodScorer::new(&self.grid, &self.affinity, self.config.radius)
            .with_conversion_threshold(self.config.conversion_threshold)
    }

    /// Mean normalized happiness over all particles (0 for an empty grid)
    pub fn mean_happiness(&self) -> f64 {
        if self.particle_count == 0 {
            return 0.0;
        }
        let scorer = self.scorer();
        let mut total = 0.0;
        for (idx, &t) in self.grid.as_bytes().iter().enumerate() {
            if t != crate::domain::types::EMPTY {
                let (x, y) = self.grid.coords(idx);
                total += scorer.happiness(x, y, t).normalized();
            }
        }
        total / self.particle_count as f64
    }

    /// Row-major copy of the grid, one byte per cell
    pub fn export_grid(&self) -> Vec<TypeId> {
        export::export_grid(self)
    }

    /// Pointer to the committed cells (for zero-copy JS views)
    pub fn types_ptr(&self) -> *const TypeId {
        export::types_ptr(self)
    }

    pub fn types_len(&self) -> usize {
        export::types_len(self)
    }

    /// Shape and state summary; density is the occupied fraction of the grid
    pub fn debug_info(&self) -> String {
        let occupied = self.grid.occupied_count();
        format!(
            "Grid {}x{}, {} types, density {:.2}, radius {}, particles: {}, tick: {}",
            self.config.size,
            self.config.size,
            self.config.num_types,
            occupied as f64 / self.grid.size() as f64,
            self.config.radius,
            occupied,
            self.tick
        )
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
