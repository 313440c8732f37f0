//! Export - hands the committed grid to the renderer
//!
//! The grid is already one byte per cell in row-major order, which is the
//! layout the renderer uploads as a `size x size` single-channel texture.
//! Export is read-only and always reflects the last committed tick.

use crate::domain::types::TypeId;

use super::SimulationCore;

pub(super) fn export_grid(core: &SimulationCore) -> Vec<TypeId> {
    core.grid.as_bytes().to_vec()
}

/// Valid until the next `step()`: the committed buffer swaps every tick.
pub(super) fn types_ptr(core: &SimulationCore) -> *const TypeId {
    core.grid.as_bytes().as_ptr()
}

pub(super) fn types_len(core: &SimulationCore) -> usize {
    core.grid.size()
}
