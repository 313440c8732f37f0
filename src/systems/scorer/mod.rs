//! Neighborhood scoring
//!
//! Happiness of a position is the sum of `affinity(mover, occupant)` over the
//! occupied cells of the Chebyshev window of `radius` around it (square, side
//! `2*radius+1`), excluding the position itself. Windows clip at the grid
//! edge, and positions are compared by score per scanned cell so edge cells
//! are not penalized for neighbours that do not exist.
//!
//! Every query reads one immutable snapshot. `best_move` takes window sums
//! from the tick's `ScoreField` when there is one, otherwise from a
//! `LocalField` built over the particle's reach. Single lookups without a
//! field scan the window directly. All three give identical results.

use std::cmp::Ordering;

use crate::core::grid::{Grid, Window};
use crate::domain::affinity::AffinityMatrix;
use crate::domain::types::{TypeId, EMPTY};

mod field;
mod scan;

pub use field::{LocalField, ScoreField, FIELD_BUDGET_ENTRIES};
use scan::{chebyshev, rows_nearest_first};

/// Raw affinity sum plus the number of cells it was gathered over.
///
/// Ordering compares `score / scanned` exactly (cross-multiplied), so two
/// positions with different window sizes rank fairly.
#[derive(Clone, Copy, Debug)]
pub struct Happiness {
    score: i32,
    scanned: u32,
}

impl Happiness {
    pub fn new(score: i32, scanned: u32) -> Self {
        Self { score, scanned }
    }

    #[inline]
    pub fn score(&self) -> i32 { self.score }

    #[inline]
    pub fn scanned(&self) -> u32 { self.scanned }

    /// Score per scanned neighbour (0 when nothing was scanned)
    pub fn normalized(&self) -> f64 {
        if self.scanned == 0 {
            0.0
        } else {
            self.score as f64 / self.scanned as f64
        }
    }
}

impl Ord for Happiness {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.score as i64 * other.scanned.max(1) as i64;
        let rhs = other.score as i64 * self.scanned.max(1) as i64;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Happiness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Happiness {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Happiness {}

enum WindowSums<'f> {
    Field(&'f ScoreField),
    Local(LocalField),
    Direct,
}

/// Read-only view used to evaluate particles against a snapshot
#[derive(Clone, Copy)]
pub struct NeighborhoodScorer<'a> {
    grid: &'a Grid,
    affinity: &'a AffinityMatrix,
    radius: u32,
    conversion_threshold: i32,
    field: Option<&'a ScoreField>,
}

impl<'a> NeighborhoodScorer<'a> {
    pub fn new(grid: &'a Grid, affinity: &'a AffinityMatrix, radius: u32) -> Self {
        Self {
            grid,
            affinity,
            radius,
            conversion_threshold: crate::domain::config::DEFAULT_CONVERSION_THRESHOLD,
            field: None,
        }
    }

    /// Use precomputed tables. The field must have been rebuilt from `grid`.
    pub fn with_field(mut self, field: &'a ScoreField) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_conversion_threshold(mut self, threshold: i32) -> Self {
        self.conversion_threshold = threshold;
        self
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    fn window_sum(&self, sums: &WindowSums, t: TypeId, w: &Window) -> i32 {
        match sums {
            WindowSums::Field(field) => field.window_sum(t, w),
            WindowSums::Local(local) => local.window_sum(w),
            WindowSums::Direct => {
                let row = self.affinity.row(t);
                let mut sum = 0i32;
                for y in w.y0..=w.y1 {
                    for x in w.x0..=w.x1 {
                        sum += row[self.grid.type_at(x, y) as usize] as i32;
                    }
                }
                sum
            }
        }
    }

    /// Happiness `t` would have at (x, y). When `origin` is given, that cell
    /// counts as vacated: the mover is evaluating a spot it would leave from.
    fn happiness_from(
        &self,
        sums: &WindowSums,
        x: u32,
        y: u32,
        t: TypeId,
        origin: Option<(u32, u32)>,
    ) -> Happiness {
        let w = self.grid.clipped_window(x, y, self.radius);
        let mut score = self.window_sum(sums, t, &w) - self.affinity.get(t, self.grid.type_at(x, y));
        if let Some((ox, oy)) = origin {
            if (ox, oy) != (x, y) && w.contains(ox, oy) {
                score -= self.affinity.get(t, self.grid.type_at(ox, oy));
            }
        }
        Happiness::new(score, w.cell_count() - 1)
    }

    /// Happiness of type `t` at (x, y), ignoring whatever occupies (x, y).
    pub fn happiness(&self, x: u32, y: u32, t: TypeId) -> Happiness {
        let sums = match self.field {
            Some(field) => WindowSums::Field(field),
            None => WindowSums::Direct,
        };
        self.happiness_from(&sums, x, y, t, None)
    }

    /// Best empty cell in range that is strictly happier than (x, y).
    ///
    /// Candidates are visited nearest row first (the particle's own row, then
    /// the row above, the row below, and outward), left to right within a
    /// row; among equal scores the first visited wins.
    pub fn best_move(&self, x: u32, y: u32, t: TypeId) -> Option<(u32, u32)> {
        let w = self.grid.clipped_window(x, y, self.radius);
        // Every candidate's window lies within twice the radius of (x, y).
        let sums = match self.field {
            Some(field) => WindowSums::Field(field),
            None => {
                let reach = self.grid.clipped_window(x, y, self.radius.saturating_mul(2));
                WindowSums::Local(LocalField::build(self.grid, self.affinity.row(t), reach))
            }
        };
        let mut best = self.happiness_from(&sums, x, y, t, None);
        let mut target = None;

        for cy in rows_nearest_first(y, w.y0, w.y1) {
            for cx in w.x0..=w.x1 {
                if !self.grid.is_empty_at(cx, cy) {
                    continue;
                }
                let h = self.happiness_from(&sums, cx, cy, t, Some((x, y)));
                if h > best {
                    best = h;
                    target = Some((cx, cy));
                }
            }
        }
        target
    }

    /// Neighbour of a different type that `t` likes above the conversion
    /// threshold. Highest affinity wins; ties go to the nearest cell, then
    /// the first in row-major order.
    pub fn conversion_candidate(&self, x: u32, y: u32, t: TypeId) -> Option<(u32, u32)> {
        let w = self.grid.clipped_window(x, y, self.radius);
        let mut best: Option<(i32, u32, (u32, u32))> = None;

        for cy in w.y0..=w.y1 {
            for cx in w.x0..=w.x1 {
                let other = self.grid.type_at(cx, cy);
                if other == EMPTY || other == t {
                    continue;
                }
                let score = self.affinity.get(t, other);
                if score <= self.conversion_threshold {
                    continue;
                }
                let dist = chebyshev(x, y, cx, cy);
                let better = match best {
                    None => true,
                    Some((bs, bd, _)) => score > bs || (score == bs && dist < bd),
                };
                if better {
                    best = Some((score, dist, (cx, cy)));
                }
            }
        }
        best.map(|(_, _, pos)| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn grid_from_rows(rows: &[&[u8]]) -> Grid {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let cells = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Grid::from_cells(w, h, cells).unwrap()
    }

    #[test]
    fn happiness_ordering_is_normalized() {
        assert!(Happiness::new(10, 3) > Happiness::new(10, 5));
        assert_eq!(Happiness::new(2, 4), Happiness::new(1, 2));
        assert!(Happiness::new(-1, 8) > Happiness::new(-1, 3));
        assert!(Happiness::new(0, 0) == Happiness::new(0, 8));
        assert_eq!(Happiness::new(-5, 4).normalized(), -1.25);
    }

    #[test]
    fn happiness_excludes_self_and_empty_cells() {
        let grid = grid_from_rows(&[
            &[0, 2, 0],
            &[1, 1, 0],
            &[0, 0, 2],
        ]);
        let aff = AffinityMatrix::from_values(2, &[5, -7, 3, 1]).unwrap();
        let scorer = NeighborhoodScorer::new(&grid, &aff, 1);

        let h = scorer.happiness(1, 1, 1);
        // Neighbours: 2 at (1,0), 1 at (0,1), 2 at (2,2). Self is skipped.
        assert_eq!(h.score(), -7 + 5 - 7);
        assert_eq!(h.scanned(), 8);
    }

    #[test]
    fn corner_with_oversized_radius_scans_only_in_bounds_cells() {
        // 3x2 grid, radius 5: the window is the whole grid.
        let grid = grid_from_rows(&[
            &[1, 0, 1],
            &[0, 0, 1],
        ]);
        let aff = AffinityMatrix::from_values(1, &[10]).unwrap();
        let scorer = NeighborhoodScorer::new(&grid, &aff, 5);

        let h = scorer.happiness(0, 0, 1);
        assert_eq!(h.score(), 20);
        assert_eq!(h.scanned(), 5);
        assert_eq!(h.normalized(), 4.0);
    }

    #[test]
    fn best_move_requires_strict_improvement() {
        let grid = grid_from_rows(&[
            &[1, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let aff = AffinityMatrix::from_values(1, &[10]).unwrap();
        let scorer = NeighborhoodScorer::new(&grid, &aff, 1);

        // (0,0): 10/3 at home beats 10/5 below and 10/8 diagonally.
        assert_eq!(scorer.best_move(0, 0, 1), None);
        // (1,0): 10/5 at home; (0,1) ties at 10/5 and does not count.
        assert_eq!(scorer.best_move(1, 0, 1), None);
    }

    #[test]
    fn best_move_ignores_the_vacated_origin() {
        let grid = grid_from_rows(&[
            &[1, 0, 1, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let aff = AffinityMatrix::from_values(1, &[10]).unwrap();
        let scorer = NeighborhoodScorer::new(&grid, &aff, 1);

        assert_eq!(scorer.best_move(0, 0, 1), Some((1, 0)));
        // (2,0) evaluates (1,0) with (0,0) as its only neighbour, not itself.
        assert_eq!(scorer.best_move(2, 0, 1), Some((1, 0)));
    }

    #[test]
    fn best_move_breaks_ties_nearest_row_first() {
        // Type 1 hates type 2. Every empty cell left of (1,1) scores 0, the
        // same as cells above and below; the own row is visited first.
        let grid = grid_from_rows(&[
            &[0, 0, 0, 0],
            &[0, 1, 2, 0],
            &[0, 0, 0, 0],
        ]);
        let aff = AffinityMatrix::from_values(2, &[0, -50, 0, 0]).unwrap();
        let scorer = NeighborhoodScorer::new(&grid, &aff, 1);
        assert_eq!(scorer.best_move(1, 1, 1), Some((0, 1)));
    }

    #[test]
    fn conversion_picks_highest_affinity_then_nearest() {
        let grid = grid_from_rows(&[
            &[3, 0, 0, 0, 2],
            &[0, 0, 0, 0, 0],
            &[0, 0, 1, 2, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 3],
        ]);
        let aff = AffinityMatrix::from_values(
            3,
            &[
                0, 80, 90, //
                0, 0, 0, //
                0, 0, 0,
            ],
        )
        .unwrap();
        let scorer = NeighborhoodScorer::new(&grid, &aff, 2).with_conversion_threshold(50);

        // Both type-3 cells are at distance 2 with affinity 90; (0,0) is first.
        assert_eq!(scorer.conversion_candidate(2, 2, 1), Some((0, 0)));

        let scorer = scorer.with_conversion_threshold(90);
        assert_eq!(scorer.conversion_candidate(2, 2, 1), None);
    }

    #[test]
    fn conversion_prefers_nearer_on_equal_affinity() {
        let grid = grid_from_rows(&[
            &[2, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 1, 0],
            &[0, 0, 0, 2],
        ]);
        let aff = AffinityMatrix::from_values(2, &[0, 60, 0, 0]).unwrap();
        let scorer = NeighborhoodScorer::new(&grid, &aff, 2);
        assert_eq!(scorer.conversion_candidate(2, 2, 1), Some((3, 3)));
    }

    #[test]
    fn conversion_never_targets_same_type() {
        let grid = grid_from_rows(&[&[1, 1, 1]]);
        let aff = AffinityMatrix::from_values(1, &[100]).unwrap();
        let scorer = NeighborhoodScorer::new(&grid, &aff, 1).with_conversion_threshold(0);
        assert_eq!(scorer.conversion_candidate(1, 0, 1), None);
    }

    #[test]
    fn best_move_without_field_matches_brute_force() {
        let mut rng = SmallRng::seed_from_u64(0xB0B);
        let (w, h, n) = (19u32, 14u32, 3u32);
        let cells = (0..w * h)
            .map(|_| if rng.gen_bool(0.5) { rng.gen_range(1..=n as u8) } else { 0 })
            .collect();
        let grid = Grid::from_cells(w, h, cells).unwrap();
        let aff = AffinityMatrix::random(n, &mut rng).unwrap();

        for radius in [1, 2, 5, 9] {
            let scorer = NeighborhoodScorer::new(&grid, &aff, radius);
            for y in 0..h {
                for x in 0..w {
                    let t = grid.type_at(x, y);
                    if t == EMPTY {
                        continue;
                    }
                    let mut best = scorer.happiness(x, y, t);
                    let mut expected = None;
                    let win = grid.clipped_window(x, y, radius);
                    for cy in rows_nearest_first(y, win.y0, win.y1) {
                        for cx in win.x0..=win.x1 {
                            if !grid.is_empty_at(cx, cy) {
                                continue;
                            }
                            let cw = grid.clipped_window(cx, cy, radius);
                            let mut score = 0;
                            for ny in cw.y0..=cw.y1 {
                                for nx in cw.x0..=cw.x1 {
                                    if (nx, ny) != (cx, cy) && (nx, ny) != (x, y) {
                                        score += aff.get(t, grid.type_at(nx, ny));
                                    }
                                }
                            }
                            let h = Happiness::new(score, cw.cell_count() - 1);
                            if h > best {
                                best = h;
                                expected = Some((cx, cy));
                            }
                        }
                    }
                    assert_eq!(scorer.best_move(x, y, t), expected, "({x}, {y}) r={radius}");
                }
            }
        }
    }

    #[test]
    fn field_and_direct_scans_agree() {
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let (w, h, n) = (23u32, 17u32, 4u32);
        let cells = (0..w * h)
            .map(|_| if rng.gen_bool(0.45) { rng.gen_range(1..=n as u8) } else { 0 })
            .collect();
        let grid = Grid::from_cells(w, h, cells).unwrap();
        let aff = AffinityMatrix::random(n, &mut rng).unwrap();
        let mut field = ScoreField::new(w, h, n);
        field.rebuild(&grid, &aff);

        for radius in [1, 3, 6] {
            let direct = NeighborhoodScorer::new(&grid, &aff, radius);
            let fast = direct.with_field(&field);
            for y in 0..h {
                for x in 0..w {
                    for t in 1..=n as u8 {
                        let a = direct.happiness(x, y, t);
                        let b = fast.happiness(x, y, t);
                        assert_eq!((a.score(), a.scanned()), (b.score(), b.scanned()));
                    }
                    let t = grid.type_at(x, y);
                    if t != EMPTY {
                        assert_eq!(direct.best_move(x, y, t), fast.best_move(x, y, t));
                    }
                }
            }
        }
    }
}
