use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::core::error::ConfigError;
use crate::core::grid::Grid;
use crate::domain::affinity::AffinityMatrix;
use crate::domain::config::SimConfig;
use crate::domain::types::TypeId;
use crate::systems::scorer::ScoreField;

use super::step_stats::StepStats;
use super::SimulationCore;

/// Seeded RNG, or one seeded from entropy when no seed is configured.
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => {
            let seed: u64 = rand::random();
            log::debug!("no seed configured, drew {seed:#x}");
            SmallRng::seed_from_u64(seed)
        }
    }
}

/// Validate `config` and produce the initial grid and affinity table together.
///
/// Exactly `round(density * size²)` distinct cells are filled, at uniformly
/// random positions, with uniformly random types in `1..=num_types`.
pub fn build(config: &SimConfig) -> Result<(Grid, AffinityMatrix), ConfigError> {
    config.validate()?;
    let mut rng = seeded_rng(config.seed);

    let affinity = match config.affinity.as_deref() {
        Some(values) => AffinityMatrix::from_values(config.num_types, values)?,
        None => AffinityMatrix::random(config.num_types, &mut rng)?,
    };

    let mut grid = Grid::new(config.size, config.size);
    let target = config.particle_target();
    let max_type = config.num_types as TypeId;
    for idx in index::sample(&mut rng, grid.size(), target).iter() {
        grid.cells[idx] = rng.gen_range(1..=max_type);
    }

    Ok((grid, affinity))
}

pub(super) fn create_core(config: SimConfig) -> Result<SimulationCore, ConfigError> {
    let (grid, affinity) = build(&config)?;
    log::info!(
        "created {}x{} grid: {} types, density {:.2}, radius {}, {} particles",
        config.size,
        config.size,
        config.num_types,
        config.density,
        config.radius,
        grid.occupied_count()
    );
    Ok(assemble(config, grid, affinity))
}

pub(super) fn create_core_from_parts(
    config: SimConfig,
    grid: Grid,
    affinity: AffinityMatrix,
) -> Result<SimulationCore, ConfigError> {
    config.validate()?;
    if grid.width() != config.size || grid.height() != config.size {
        return Err(ConfigError::GridShape {
            width: grid.width(),
            height: grid.height(),
            size: config.size,
        });
    }
    if let Some(values) = config.affinity.as_deref() {
        if values != affinity.to_values().as_slice() {
            return Err(ConfigError::AffinityConflict);
        }
    }
    if affinity.num_types() != config.num_types {
        let n = config.num_types as usize;
        let actual = affinity.num_types() as usize;
        return Err(ConfigError::AffinityLength {
            num_types: config.num_types,
            expected: n * n,
            actual: actual * actual,
        });
    }
    if grid.max_type() as u32 > config.num_types {
        let cells = grid.as_bytes();
        let idx = cells
            .iter()
            .position(|&t| t as u32 > config.num_types)
            .unwrap_or_default();
        let (x, y) = grid.coords(idx);
        return Err(ConfigError::CellType {
            x,
            y,
            value: cells[idx],
            num_types: config.num_types,
        });
    }
    Ok(assemble(config, grid, affinity))
}

fn assemble(config: SimConfig, grid: Grid, affinity: AffinityMatrix) -> SimulationCore {
    let field = if ScoreField::fits(config.size, config.size, config.num_types) {
        Some(ScoreField::new(config.size, config.size, config.num_types))
    } else {
        log::warn!(
            "score tables for {} types on a {}x{} grid exceed the budget, building them per particle",
            config.num_types,
            config.size,
            config.size
        );
        None
    };
    let cells = grid.size();
    let particle_count = grid.occupied_count() as u32;

    SimulationCore {
        next: Grid::new(config.size, config.size),
        claimed: vec![false; cells],
        proposals: Vec::with_capacity(particle_count as usize),
        field,
        grid,
        affinity,
        config,
        particle_count,
        tick: 0,
        perf_enabled: false,
        stats: StepStats::default(),
    }
}
