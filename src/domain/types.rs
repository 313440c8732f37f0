//! Particle type identifiers
//!
//! Every cell of the grid stores one `TypeId`. The exported frame is one byte
//! per cell, so the id space is exactly a `u8`.

/// Particle type id (0 = empty)
pub type TypeId = u8;

/// Reserved id for an empty cell
pub const EMPTY: TypeId = 0;

/// Highest number of particle types an engine can hold
pub const MAX_TYPES: u32 = TypeId::MAX as u32;

/// Affinity scores live in `-AFFINITY_LIMIT..=AFFINITY_LIMIT`
pub const AFFINITY_LIMIT: i32 = 100;
