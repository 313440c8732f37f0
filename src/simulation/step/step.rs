use crate::systems::scorer::NeighborhoodScorer;

use super::{commit, proposals, PerfTimer, SimulationCore};

pub(super) fn step(core: &mut SimulationCore) {
    let perf_on = core.perf_enabled;
    let mut timer = if perf_on { Some(PerfTimer::start()) } else { None };

    // Score tables are a pure function of the snapshot
    if let Some(field) = core.field.as_mut() {
        field.rebuild(&core.grid, &core.affinity);
    }
    let field_ms = timer.as_mut().map_or(0.0, |t| t.lap_ms());

    let mut scorer = NeighborhoodScorer::new(&core.grid, &core.affinity, core.config.radius)
        .with_conversion_threshold(core.config.conversion_threshold);
    if let Some(field) = core.field.as_ref() {
        scorer = scorer.with_field(field);
    }
    proposals::collect(&scorer, &mut core.proposals);
    let propose_ms = timer.as_mut().map_or(0.0, |t| t.lap_ms());

    let outcome = commit::commit(&core.grid, &core.proposals, &mut core.next, &mut core.claimed);
    std::mem::swap(&mut core.grid, &mut core.next);
    let commit_ms = timer.as_mut().map_or(0.0, |t| t.lap_ms());

    debug_assert_eq!(
        core.grid.occupied_count(),
        core.particle_count as usize,
        "tick {} changed the particle count",
        core.tick
    );

    let stats = &mut core.stats;
    stats.reset();
    stats.particles_evaluated = core.particle_count;
    stats.proposals = core.proposals.len() as u32;
    stats.moves = outcome.moves;
    stats.conversions = outcome.conversions;
    stats.conflicts = outcome.conflicts;
    stats.score_field = core.field.is_some();
    if let Some(t) = timer {
        stats.field_ms = field_ms;
        stats.propose_ms = propose_ms;
        stats.commit_ms = commit_ms;
        stats.step_ms = t.elapsed_ms();
    }

    core.tick += 1;
    log::trace!(
        "tick {}: {} moves, {} conversions, {} conflicts",
        core.tick,
        outcome.moves,
        outcome.conversions,
        outcome.conflicts
    );
}
