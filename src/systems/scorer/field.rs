//! Score fields - summed-area tables of affinity-weighted occupancy
//!
//! For every mover type `t`, `table_t[y][x]` holds the sum of
//! `affinity(t, cell)` over the rectangle `[0, x) x [0, y)`. Any clipped
//! window sum is then four lookups, which turns the `O(R²)` candidate
//! evaluation inside `best_move` into `O(1)`.
//!
//! `ScoreField` covers the whole grid for every type and is rebuilt once per
//! tick. When that exceeds the budget, `LocalField` covers one mover type
//! over a single particle's reach (its window grown by the radius), built on
//! demand, so a move decision stays `O(R²)` either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::grid::{Grid, Window};
use crate::domain::affinity::AffinityMatrix;
use crate::domain::types::TypeId;

/// Upper bound on table entries across all types (32 MiB of `i32`)
pub const FIELD_BUDGET_ENTRIES: usize = 1 << 23;

pub struct ScoreField {
    area: Window,
    stride: usize,
    slab: usize,
    num_types: usize,
    tables: Vec<i32>,
}

impl ScoreField {
    /// Whether tables for this grid and type count stay inside the budget
    pub fn fits(width: u32, height: u32, num_types: u32) -> bool {
        let slab = (width as usize + 1) * (height as usize + 1);
        slab.saturating_mul(num_types as usize) <= FIELD_BUDGET_ENTRIES
    }

    pub fn new(width: u32, height: u32, num_types: u32) -> Self {
        let stride = width as usize + 1;
        let slab = stride * (height as usize + 1);
        Self {
            area: Window {
                x0: 0,
                y0: 0,
                x1: width.saturating_sub(1),
                y1: height.saturating_sub(1),
            },
            stride,
            slab,
            num_types: num_types as usize,
            tables: vec![0; slab * num_types as usize],
        }
    }

    /// Recompute every table from `grid`. Dimensions must match `new`.
    pub fn rebuild(&mut self, grid: &Grid, affinity: &AffinityMatrix) {
        debug_assert_eq!(self.stride, grid.width() as usize + 1);
        debug_assert_eq!(self.slab, self.stride * (grid.height() as usize + 1));
        let slab = self.slab;
        let area = self.area;

        #[cfg(feature = "parallel")]
        {
            self.tables
                .par_chunks_mut(slab)
                .enumerate()
                .for_each(|(i, table)| fill_table(table, grid, affinity.row((i + 1) as TypeId), &area));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (i, table) in self.tables.chunks_mut(slab).enumerate() {
                fill_table(table, grid, affinity.row((i + 1) as TypeId), &area);
            }
        }
    }

    /// Sum of `affinity(t, cell)` over the window (inclusive bounds)
    #[inline]
    pub fn window_sum(&self, t: TypeId, w: &Window) -> i32 {
        debug_assert!(t as usize >= 1 && t as usize <= self.num_types);
        let base = (t as usize - 1) * self.slab;
        rect_sum(&self.tables[base..base + self.slab], self.stride, &self.area, w)
    }
}

/// Summed-area table of one mover type over a sub-rectangle of the grid
pub struct LocalField {
    area: Window,
    stride: usize,
    table: Vec<i32>,
}

impl LocalField {
    /// Build from `grid` for the affinity row of one mover type
    pub fn build(grid: &Grid, row: &[i8], area: Window) -> Self {
        let stride = (area.x1 - area.x0) as usize + 2;
        let rows = (area.y1 - area.y0) as usize + 2;
        let mut table = vec![0; stride * rows];
        fill_table(&mut table, grid, row, &area);
        Self { area, stride, table }
    }

    /// Sum over `w`, which must lie inside the built area
    #[inline]
    pub fn window_sum(&self, w: &Window) -> i32 {
        rect_sum(&self.table, self.stride, &self.area, w)
    }
}

fn rect_sum(tab: &[i32], stride: usize, area: &Window, w: &Window) -> i32 {
    debug_assert!(area.contains(w.x0, w.y0) && area.contains(w.x1, w.y1));
    let (x0, y0) = ((w.x0 - area.x0) as usize, (w.y0 - area.y0) as usize);
    let (x1, y1) = ((w.x1 - area.x0) as usize + 1, (w.y1 - area.y0) as usize + 1);
    tab[y1 * stride + x1] - tab[y0 * stride + x1] - tab[y1 * stride + x0] + tab[y0 * stride + x0]
}

fn fill_table(table: &mut [i32], grid: &Grid, row: &[i8], area: &Window) {
    let width = grid.width() as usize;
    let (ax0, ax1) = (area.x0 as usize, area.x1 as usize + 1);
    let stride = ax1 - ax0 + 1;
    let cells = grid.as_bytes();

    table[..stride].fill(0);
    for (r, y) in (area.y0 as usize..=area.y1 as usize).enumerate() {
        let src = &cells[y * width + ax0..y * width + ax1];
        let (prev, rest) = table.split_at_mut((r + 1) * stride);
        let above = &prev[r * stride..];
        let out = &mut rest[..stride];
        out[0] = 0;
        let mut running = 0i32;
        for (x, &t) in src.iter().enumerate() {
            running += row[t as usize] as i32;
            out[x + 1] = above[x + 1] + running;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_sum_matches_manual_count() {
        let grid = Grid::from_cells(3, 3, vec![1, 0, 2, 0, 1, 0, 2, 2, 1]).unwrap();
        let affinity = AffinityMatrix::from_values(2, &[10, -3, 4, 7]).unwrap();
        let mut field = ScoreField::new(3, 3, 2);
        field.rebuild(&grid, &affinity);

        let all = Window { x0: 0, y0: 0, x1: 2, y1: 2 };
        // Type 1 sees three 1s (+10 each) and three 2s (-3 each).
        assert_eq!(field.window_sum(1, &all), 21);
        // Type 2 sees three 1s (+4 each) and three 2s (+7 each).
        assert_eq!(field.window_sum(2, &all), 33);

        let corner = Window { x0: 1, y0: 1, x1: 2, y1: 2 };
        assert_eq!(field.window_sum(1, &corner), 10 - 3 + 10);
    }

    #[test]
    fn budget_limits_large_type_counts() {
        assert!(ScoreField::fits(1000, 1000, 8));
        assert!(!ScoreField::fits(1000, 1000, 255));
        assert!(ScoreField::fits(64, 64, 255));
    }

    #[test]
    fn local_field_matches_global_tables() {
        let grid = Grid::from_cells(
            5,
            4,
            vec![1, 0, 2, 2, 0, 0, 1, 0, 1, 2, 2, 2, 1, 0, 0, 1, 0, 0, 2, 1],
        )
        .unwrap();
        let affinity = AffinityMatrix::from_values(2, &[10, -3, 4, 7]).unwrap();
        let mut field = ScoreField::new(5, 4, 2);
        field.rebuild(&grid, &affinity);

        let area = Window { x0: 1, y0: 1, x1: 4, y1: 3 };
        for t in 1..=2u8 {
            let local = LocalField::build(&grid, affinity.row(t), area);
            for y0 in 1..=3 {
                for x0 in 1..=4 {
                    for (y1, x1) in [(y0, x0), (3, 4), (y0, 4), (3, x0)] {
                        let w = Window { x0, y0, x1, y1 };
                        assert_eq!(local.window_sum(&w), field.window_sum(t, &w), "{w:?}");
                    }
                }
            }
        }
    }
}
