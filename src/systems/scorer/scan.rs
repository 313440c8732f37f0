//! Deterministic scan orders shared by move and conversion searches

/// Rows of a clipped window ordered nearest-first: `y`, `y-1`, `y+1`, `y-2`,
/// `y+2`, ... Rows outside `[y0, y1]` are skipped.
pub(super) fn rows_nearest_first(y: u32, y0: u32, y1: u32) -> impl Iterator<Item = u32> {
    let reach = (y - y0).max(y1 - y);
    std::iter::once(y).chain((1..=reach).flat_map(move |d| {
        let above = y.checked_sub(d).filter(|&r| r >= y0);
        let below = y.checked_add(d).filter(|&r| r <= y1);
        above.into_iter().chain(below)
    }))
}

#[inline]
pub(super) fn chebyshev(ax: u32, ay: u32, bx: u32, by: u32) -> u32 {
    ax.abs_diff(bx).max(ay.abs_diff(by))
}
