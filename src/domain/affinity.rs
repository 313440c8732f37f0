//! Affinity matrix - signed attraction scores between particle types
//!
//! Stored as an `(N+1) x (N+1)` table with row and column 0 pinned to zero, so
//! a lookup involving an empty cell needs no branch.

use rand::Rng;

use crate::core::error::ConfigError;
use super::types::{TypeId, AFFINITY_LIMIT, MAX_TYPES};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffinityMatrix {
    num_types: u32,
    stride: usize,
    table: Vec<i8>,
}

impl AffinityMatrix {
    fn zeroed(num_types: u32) -> Self {
        let stride = num_types as usize + 1;
        Self {
            num_types,
            stride,
            table: vec![0; stride * stride],
        }
    }

    fn check_num_types(num_types: u32) -> Result<(), ConfigError> {
        if num_types == 0 {
            return Err(ConfigError::ZeroTypes);
        }
        if num_types > MAX_TYPES {
            return Err(ConfigError::TooManyTypes(num_types));
        }
        Ok(())
    }

    /// Build from `num_types²` row-major scores: `values[(a-1)*N + (b-1)]`
    /// is how much type `a` likes being near type `b`.
    pub fn from_values(num_types: u32, values: &[i32]) -> Result<Self, ConfigError> {
        Self::check_num_types(num_types)?;
        let n = num_types as usize;
        if values.len() != n * n {
            return Err(ConfigError::AffinityLength {
                num_types,
                expected: n * n,
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(-AFFINITY_LIMIT..=AFFINITY_LIMIT).contains(*v))
        {
            return Err(ConfigError::AffinityOutOfRange { index, value });
        }

        let mut matrix = Self::zeroed(num_types);
        for (i, &v) in values.iter().enumerate() {
            let a = i / n + 1;
            let b = i % n + 1;
            matrix.table[a * matrix.stride + b] = v as i8;
        }
        Ok(matrix)
    }

    /// Draw every pair independently from `[-100, 100]`. The result is not
    /// symmetric: a liking b says nothing about b liking a.
    pub fn random<R: Rng + ?Sized>(num_types: u32, rng: &mut R) -> Result<Self, ConfigError> {
        Self::check_num_types(num_types)?;
        let mut matrix = Self::zeroed(num_types);
        for a in 1..=num_types as usize {
            for b in 1..=num_types as usize {
                matrix.table[a * matrix.stride + b] =
                    rng.gen_range(-AFFINITY_LIMIT..=AFFINITY_LIMIT) as i8;
            }
        }
        Ok(matrix)
    }

    #[inline]
    pub fn num_types(&self) -> u32 {
        self.num_types
    }

    /// Score of `a` toward `b`. Any pair involving the empty type is 0.
    #[inline(always)]
    pub fn get(&self, a: TypeId, b: TypeId) -> i32 {
        debug_assert!((a as u32) <= self.num_types && (b as u32) <= self.num_types);
        self.table[a as usize * self.stride + b as usize] as i32
    }

    /// Row of scores for mover type `a`, indexed by neighbour type (index 0 = empty)
    #[inline]
    pub fn row(&self, a: TypeId) -> &[i8] {
        let start = a as usize * self.stride;
        &self.table[start..start + self.stride]
    }

    /// Row-major `N²` copy, the same layout `from_values` accepts
    pub fn to_values(&self) -> Vec<i32> {
        let n = self.num_types as TypeId;
        let mut out = Vec::with_capacity(self.num_types as usize * self.num_types as usize);
        for a in 1..=n {
            for b in 1..=n {
                out.push(self.get(a, b));
            }
        }
        out
    }
}
