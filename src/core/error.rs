//! Engine error types
//!
//! All failures are caught at construction. Once an engine exists, `step()`
//! is total over every grid it can reach.

use thiserror::Error;

/// Invalid construction parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be non-zero")]
    ZeroSize,
    #[error("grid size {0} is too large (at most {max} cells per side)", max = crate::core::grid::MAX_SIDE)]
    SizeTooLarge(u32),
    #[error("num_types must be non-zero")]
    ZeroTypes,
    #[error("num_types {0} exceeds the maximum of {max}", max = crate::domain::types::MAX_TYPES)]
    TooManyTypes(u32),
    #[error("density {0} must be within [0, 1]")]
    Density(f32),
    #[error("radius must be non-zero")]
    ZeroRadius,
    #[error("radius {radius} must be smaller than grid size {size}")]
    RadiusTooLarge { radius: u32, size: u32 },
    #[error("affinity table has {actual} entries, expected {expected} ({num_types}x{num_types})")]
    AffinityLength {
        num_types: u32,
        expected: usize,
        actual: usize,
    },
    #[error("affinity entry {index} = {value} is outside [-{limit}, {limit}]", limit = crate::domain::types::AFFINITY_LIMIT)]
    AffinityOutOfRange { index: usize, value: i32 },
    #[error("conversion threshold {0} must be non-negative")]
    NegativeThreshold(i32),
    #[error("config carries an affinity table that differs from the one supplied")]
    AffinityConflict,
    #[error("grid is {width}x{height}, expected {size}x{size}")]
    GridShape { width: u32, height: u32, size: u32 },
    #[error("cell ({x}, {y}) holds type {value}, but only {num_types} types exist")]
    CellType {
        x: u32,
        y: u32,
        value: u8,
        num_types: u32,
    },
    #[error("invalid configuration json: {0}")]
    Json(String),
}

/// Out-of-range grid access. Surfacing one of these means a neighbourhood
/// window was not clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
pub struct BoundsError {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
