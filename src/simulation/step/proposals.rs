//! Proposal phase - every particle decides against the snapshot
//!
//! Reads only the snapshot and writes only its own proposal, so rows are
//! evaluated on rayon workers when the `parallel` feature is on. The output
//! is always in row-major order of the proposing cell.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::types::{TypeId, EMPTY};
use crate::systems::scorer::NeighborhoodScorer;

/// What a particle wants to do this tick. Staying is the absence of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Relocate into an empty cell (cell index)
    Move { to: usize },
    /// Turn a neighbouring particle into the proposer's type (cell index)
    Convert { victim: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub from: usize,
    pub kind: TypeId,
    pub action: Action,
}

/// Movement is tried first. Conversion is permanent, so it is only
/// proposed when no empty cell in range is an improvement.
pub(super) fn propose(scorer: &NeighborhoodScorer, x: u32, y: u32, t: TypeId) -> Option<Action> {
    let grid = scorer.grid();
    if let Some((mx, my)) = scorer.best_move(x, y, t) {
        return Some(Action::Move { to: grid.index(mx, my) });
    }
    scorer
        .conversion_candidate(x, y, t)
        .map(|(vx, vy)| Action::Convert { victim: grid.index(vx, vy) })
}

fn propose_row<'s>(scorer: &'s NeighborhoodScorer<'s>, y: u32) -> impl Iterator<Item = Proposal> + 's {
    let grid = scorer.grid();
    let width = grid.width();
    (0..width).filter_map(move |x| {
        let t = grid.type_at(x, y);
        if t == EMPTY {
            return None;
        }
        propose(scorer, x, y, t).map(|action| Proposal {
            from: grid.index(x, y),
            kind: t,
            action,
        })
    })
}

/// Fill `out` with the proposals of every particle, row-major.
pub(super) fn collect(scorer: &NeighborhoodScorer, out: &mut Vec<Proposal>) {
    out.clear();
    let height = scorer.grid().height();

    #[cfg(feature = "parallel")]
    {
        out.par_extend(
            (0..height)
                .into_par_iter()
                .flat_map_iter(|y| propose_row(scorer, y)),
        );
    }

    #[cfg(not(feature = "parallel"))]
    {
        out.extend((0..height).flat_map(|y| propose_row(scorer, y)));
    }
}
