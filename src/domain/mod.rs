//! Domain model: particle types, affinities and configuration

pub mod affinity;
pub mod config;
pub mod types;

pub use affinity::AffinityMatrix;
pub use config::SimConfig;
pub use types::{TypeId, EMPTY};
