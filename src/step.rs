use tracing::debug;

use crate::{rule::should_live, Diff, Grid, LiveSet, Pos};

/// Cells whose state may change this generation: every alive cell and its
/// neighbours. A dead cell with no alive neighbour stays dead.
pub fn candidates(grid: &Grid, live_set: &LiveSet) -> LiveSet {
    live_set
        .iter()
        .flat_map(|pos| std::iter::once(pos).chain(grid.neighbors(pos)))
        .collect()
}

/// Computes the next generation and the minimal diff from `live_set` to it.
/// Nothing is committed; the caller owns the state.
pub fn step(grid: &Grid, live_set: &LiveSet) -> (LiveSet, Diff) {
    debug_assert!(
        live_set.iter().all(|pos| grid.contains(pos)),
        "live set holds cells outside the grid"
    );

    let next: LiveSet = candidates(grid, live_set)
        .into_iter()
        .filter(|pos: &Pos| should_live(grid, *pos, live_set))
        .collect();
    let diff = Diff::between(live_set, &next);

    debug!(
        alive = next.len(),
        activated = diff.activated.len(),
        deactivated = diff.deactivated.len(),
        "step"
    );
    (next, diff)
}
