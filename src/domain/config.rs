//! Simulation configuration
//!
//! Fixed for the lifetime of an engine. Changing any field means building a
//! new engine ("restart"), never mutating a running one.

use serde::Deserialize;

use crate::core::error::ConfigError;
use crate::core::grid::MAX_SIDE;
use super::types::MAX_TYPES;

pub const DEFAULT_CONVERSION_THRESHOLD: i32 = 50;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    /// Side length of the square grid
    pub size: u32,
    pub num_types: u32,
    /// Initial fraction of occupied cells
    pub density: f32,
    /// Chebyshev interaction radius
    pub radius: u32,
    /// Row-major `num_types²` scores; random when absent
    #[serde(default)]
    pub affinity: Option<Vec<i32>>,
    /// Seed for placement and random affinity; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// A neighbour is converted only when the converter's affinity toward it
    /// is strictly above this value
    #[serde(default = "default_conversion_threshold")]
    pub conversion_threshold: i32,
}

fn default_conversion_threshold() -> i32 {
    DEFAULT_CONVERSION_THRESHOLD
}

impl SimConfig {
    pub fn new(size: u32, num_types: u32, density: f32, radius: u32) -> Self {
        Self {
            size,
            num_types,
            density,
            radius,
            affinity: None,
            seed: None,
            conversion_threshold: DEFAULT_CONVERSION_THRESHOLD,
        }
    }

    pub fn with_affinity(mut self, values: Vec<i32>) -> Self {
        self.affinity = Some(values);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_conversion_threshold(mut self, threshold: i32) -> Self {
        self.conversion_threshold = threshold;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Scalar checks. The affinity table is checked when it is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.size > MAX_SIDE {
            return Err(ConfigError::SizeTooLarge(self.size));
        }
        if self.num_types == 0 {
            return Err(ConfigError::ZeroTypes);
        }
        if self.num_types > MAX_TYPES {
            return Err(ConfigError::TooManyTypes(self.num_types));
        }
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::Density(self.density));
        }
        if self.radius == 0 {
            return Err(ConfigError::ZeroRadius);
        }
        if self.radius >= self.size {
            return Err(ConfigError::RadiusTooLarge {
                radius: self.radius,
                size: self.size,
            });
        }
        if self.conversion_threshold < 0 {
            return Err(ConfigError::NegativeThreshold(self.conversion_threshold));
        }
        Ok(())
    }

    /// Number of particles the initializer places: `round(density * size²)`
    pub fn particle_target(&self) -> usize {
        let cells = (self.size as usize) * (self.size as usize);
        let target = (self.density as f64 * cells as f64).round() as usize;
        target.min(cells)
    }
}
