//! Core building blocks: grid storage, errors and logging

pub mod error;
pub mod grid;
pub mod logging;

pub use error::{BoundsError, ConfigError};
pub use grid::Grid;
