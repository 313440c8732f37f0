//! Commit phase - the single writer of a tick
//!
//! Proposals arrive in row-major order of the proposer and are applied in
//! that order. Each proposal claims the two cells it touches (its own cell
//! plus the destination or victim); a proposal that finds either cell
//! already claimed degrades to STAY. No cell is written twice, so particles
//! are never duplicated or lost.

use crate::core::grid::Grid;
use crate::domain::types::EMPTY;

use super::proposals::{Action, Proposal};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct CommitOutcome {
    pub(super) moves: u32,
    pub(super) conversions: u32,
    pub(super) conflicts: u32,
}

pub(super) fn commit(
    snapshot: &Grid,
    proposals: &[Proposal],
    next: &mut Grid,
    claimed: &mut [bool],
) -> CommitOutcome {
    debug_assert_eq!(snapshot.size(), next.size());
    debug_assert_eq!(claimed.len(), snapshot.size());

    next.cells.copy_from_slice(&snapshot.cells);
    claimed.fill(false);

    let mut outcome = CommitOutcome::default();
    for p in proposals {
        let other = match p.action {
            Action::Move { to } => to,
            Action::Convert { victim } => victim,
        };
        if claimed[p.from] || claimed[other] {
            outcome.conflicts += 1;
            continue;
        }
        claimed[p.from] = true;
        claimed[other] = true;

        match p.action {
            Action::Move { to } => {
                debug_assert_eq!(next.cells[to], EMPTY);
                next.cells[to] = p.kind;
                next.cells[p.from] = EMPTY;
                outcome.moves += 1;
            }
            Action::Convert { victim } => {
                debug_assert_ne!(next.cells[victim], EMPTY);
                next.cells[victim] = p.kind;
                outcome.conversions += 1;
            }
        }
    }
    outcome
}
