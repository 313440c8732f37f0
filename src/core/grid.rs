//! Grid - flat row-major array of particle types
//!
//! One byte per cell, so the buffer the renderer uploads is the grid itself:
//! no conversion pass between a tick and a frame.

use crate::domain::types::{TypeId, EMPTY};

/// Largest side length an engine accepts (16M cells)
pub const MAX_SIDE: u32 = 4096;

mod indexing;
mod accessors;

pub use indexing::Window;

/// Row-major grid of `TypeId` cells (0 = empty)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    pub(crate) cells: Vec<TypeId>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            cells: vec![EMPTY; size],
        }
    }

    /// Wrap an existing row-major buffer. `None` when the length does not match.
    pub fn from_cells(width: u32, height: u32, cells: Vec<TypeId>) -> Option<Self> {
        let size = (width as usize) * (height as usize);
        if cells.len() != size {
            return None;
        }
        Some(Self {
            width,
            height,
            size,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BoundsError;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.size(), 6);
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.as_bytes().iter().all(|&t| t == EMPTY));
    }

    #[test]
    fn set_then_get_is_row_major() {
        let mut grid = Grid::new(4, 3);
        grid.set(3, 1, 2).unwrap();
        assert_eq!(grid.get(3, 1), Ok(2));
        assert_eq!(grid.as_bytes()[grid.index(3, 1)], 2);
        assert_eq!(grid.index(3, 1), 7);
        assert_eq!(grid.coords(7), (3, 1));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn out_of_range_access_is_a_bounds_error() {
        let mut grid = Grid::new(2, 2);
        let err = BoundsError { x: 2, y: 0, width: 2, height: 2 };
        assert_eq!(grid.get(2, 0), Err(err));
        assert_eq!(grid.set(2, 0, 1), Err(err));
        assert!(grid.get(0, 5).is_err());
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        assert!(Grid::from_cells(2, 2, vec![0; 3]).is_none());
        let grid = Grid::from_cells(2, 2, vec![0, 1, 0, 2]).unwrap();
        assert_eq!(grid.get(1, 1), Ok(2));
        assert_eq!(grid.max_type(), 2);
        assert_eq!(Grid::new(2, 2).max_type(), EMPTY);
    }

    #[test]
    fn in_bounds_handles_signed_offsets() {
        let grid = Grid::new(3, 2);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(2, 1));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
        assert!(!grid.in_bounds(3, 0));
        assert!(!grid.in_bounds(0, 2));
    }

    #[test]
    fn window_clips_at_edges() {
        let grid = Grid::new(5, 5);
        let w = grid.clipped_window(0, 0, 2);
        assert_eq!((w.x0, w.y0, w.x1, w.y1), (0, 0, 2, 2));
        assert_eq!(w.cell_count(), 9);

        let w = grid.clipped_window(4, 2, 1);
        assert_eq!((w.x0, w.y0, w.x1, w.y1), (3, 1, 4, 3));

        // Radius larger than the grid covers everything.
        let w = grid.clipped_window(2, 2, 10);
        assert_eq!(w.cell_count(), 25);
    }
}
