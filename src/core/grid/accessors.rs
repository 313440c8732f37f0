use super::*;
use crate::core::error::BoundsError;

impl Grid {
    #[inline]
    fn check(&self, x: u32, y: u32) -> Result<usize, BoundsError> {
        if self.in_bounds(x as i64, y as i64) {
            Ok(self.index(x, y))
        } else {
            Err(BoundsError {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Result<TypeId, BoundsError> {
        self.check(x, y).map(|idx| self.cells[idx])
    }

    pub fn set(&mut self, x: u32, y: u32, t: TypeId) -> Result<(), BoundsError> {
        let idx = self.check(x, y)?;
        self.cells[idx] = t;
        Ok(())
    }

    /// Unchecked-by-contract read for coordinates taken from a clipped window.
    #[inline(always)]
    pub(crate) fn type_at(&self, x: u32, y: u32) -> TypeId {
        debug_assert!(x < self.width && y < self.height);
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn is_empty_at(&self, x: u32, y: u32) -> bool {
        self.type_at(x, y) == EMPTY
    }

    /// Raw row-major view, one byte per cell
    #[inline]
    pub fn as_bytes(&self) -> &[TypeId] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&t| t != EMPTY).count()
    }

    /// Largest type id present (0 for an empty grid)
    pub fn max_type(&self) -> TypeId {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }
}
