use std::collections::{hash_set, HashSet};

use metrohash::MetroBuildHasher;

use crate::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    active: bool,
}

impl Cell {
    pub fn active() -> Self {
        Self { active: true }
    }

    pub fn inactive() -> Self {
        Self { active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// The set of alive cells. This is the whole simulation state; everything
/// not in the set is dead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSet {
    cells: HashSet<Pos, MetroBuildHasher>,
}

impl LiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        if cell.is_active() {
            self.cells.insert(pos);
        } else {
            self.cells.remove(&pos);
        }
    }

    pub fn is_alive(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn insert(&mut self, pos: Pos) -> bool {
        self.cells.insert(pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    /// Alive cells in a stable order, for display and comparisons.
    pub fn actives(&self) -> Vec<Pos> {
        let mut actives: Vec<_> = self.iter().collect();
        actives.sort();
        actives
    }

    /// Cells in `self` that are not in `other`.
    pub fn difference(&self, other: &LiveSet) -> LiveSet {
        self.cells.difference(&other.cells).copied().collect()
    }

    pub fn is_disjoint(&self, other: &LiveSet) -> bool {
        self.cells.is_disjoint(&other.cells)
    }

    pub fn is_subset(&self, other: &LiveSet) -> bool {
        self.cells.is_subset(&other.cells)
    }
}

impl FromIterator<Pos> for LiveSet {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        let mut cells = HashSet::with_hasher(MetroBuildHasher::default());
        cells.extend(iter);
        Self { cells }
    }
}

impl IntoIterator for LiveSet {
    type Item = Pos;
    type IntoIter = hash_set::IntoIter<Pos>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// What changed between two consecutive live sets: cells to switch on and
/// cells to switch off. The two halves never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub activated: LiveSet,
    pub deactivated: LiveSet,
}

impl Diff {
    pub fn between(previous: &LiveSet, next: &LiveSet) -> Self {
        Self {
            activated: next.difference(previous),
            deactivated: previous.difference(next),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }

    /// Replays the diff on top of `previous`.
    pub fn apply(&self, previous: &LiveSet) -> LiveSet {
        previous
            .difference(&self.deactivated)
            .into_iter()
            .chain(self.activated.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;

    #[test]
    fn test_set_and_get() {
        let mut set = LiveSet::new();
        set.set(pos!(1, 2), Cell::active());
        assert!(set.is_alive(pos!(1, 2)));
        assert!(!set.is_alive(pos!(2, 1)));
        set.set(pos!(1, 2), Cell::inactive());
        assert!(set.is_empty());
    }

    #[test]
    fn test_diff_between() {
        let previous: LiveSet = [pos!(0, 0), pos!(1, 0)].into_iter().collect();
        let next: LiveSet = [pos!(1, 0), pos!(2, 0)].into_iter().collect();
        let diff = Diff::between(&previous, &next);
        assert_eq!(diff.activated.actives(), vec![pos!(2, 0)]);
        assert_eq!(diff.deactivated.actives(), vec![pos!(0, 0)]);
        assert!(diff.activated.is_disjoint(&diff.deactivated));
        assert_eq!(diff.apply(&previous), next);
    }

    #[test]
    fn test_identical_sets_have_empty_diff() {
        let set: LiveSet = [pos!(3, 3)].into_iter().collect();
        assert!(Diff::between(&set, &set).is_empty());
    }
}
