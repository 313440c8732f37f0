use super::*;

/// Inclusive rectangle of in-bounds cells around a centre
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Window {
    #[inline]
    pub fn cell_count(&self) -> u32 {
        (self.x1 - self.x0 + 1) * (self.y1 - self.y0 + 1)
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

impl Grid {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((idx % w) as u32, (idx / w) as u32)
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64
    }

    /// Chebyshev window of `radius` around (x, y), clipped to the grid.
    /// No wraparound: cells near an edge get a smaller window.
    #[inline]
    pub fn clipped_window(&self, x: u32, y: u32, radius: u32) -> Window {
        debug_assert!(
            x < self.width && y < self.height,
            "clipped_window: centre ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        Window {
            x0: x.saturating_sub(radius),
            y0: y.saturating_sub(radius),
            x1: x.saturating_add(radius).min(self.width - 1),
            y1: y.saturating_add(radius).min(self.height - 1),
        }
    }
}
