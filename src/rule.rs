use crate::{Grid, LiveSet, Pos};

pub fn neighbor_count(grid: &Grid, pos: Pos, live_set: &LiveSet) -> usize {
    grid.neighbors(pos)
        .filter(|neighbor| live_set.is_alive(*neighbor))
        .count()
}

/// Standard B3/S23: born with exactly 3 neighbours, survives with 2 or 3.
pub fn should_live(grid: &Grid, pos: Pos, live_set: &LiveSet) -> bool {
    match (live_set.is_alive(pos), neighbor_count(grid, pos, live_set)) {
        (_, 3) => true,
        (true, 2) => true,
        _ => false,
    }
}
