use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    error::{Error, Result},
    pos, Grid, LiveSet,
};

pub const DEFAULT_SEED: u64 = 7;

/// Side of the square, centred on the grid, that gets randomly populated.
pub const SEED_REGION: i32 = 40;

/// Randomly fills the centre region of `grid`. One bit is drawn per region
/// cell, x-major then y, even for cells the grid clips away, so a given seed
/// always produces the same bit for the same cell.
pub fn seed(grid: &Grid, rng_seed: u64) -> LiveSet {
    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    let center = grid.center();
    let half = SEED_REGION / 2;

    let mut live_set = LiveSet::new();
    for x in (center.x - half)..(center.x + half) {
        for y in (center.y - half)..(center.y + half) {
            let pos = pos!(x, y);
            let alive = rng.gen::<bool>();
            if alive && grid.contains(pos) {
                live_set.insert(pos);
            }
        }
    }
    live_set
}

/// Parses user supplied seed text. Negative integers are accepted and
/// reinterpreted bit-for-bit.
pub fn parse_seed(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    trimmed
        .parse::<u64>()
        .or_else(|_| trimmed.parse::<i64>().map(|n| n as u64))
        .map_err(|_| {
            debug!(input = text, "rejected seed");
            Error::InvalidSeed(text.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_population() {
        let grid = Grid::default();
        let first = seed(&grid, DEFAULT_SEED);
        let second = seed(&grid, DEFAULT_SEED);
        assert_eq!(first.actives(), second.actives());
        assert!(!first.is_empty());
    }

    #[test]
    fn test_different_seeds_differ() {
        let grid = Grid::default();
        assert_ne!(seed(&grid, 7), seed(&grid, 222));
    }

    #[test]
    fn test_population_stays_in_center_region() {
        let grid = Grid::default();
        let live_set = seed(&grid, 3006);
        for pos in live_set.iter() {
            assert!((80..120).contains(&pos.x), "{pos}");
            assert!((42..82).contains(&pos.y), "{pos}");
        }
        // roughly half of the 1600 cells
        assert!((600..1000).contains(&live_set.len()), "{}", live_set.len());
    }

    #[test]
    fn test_known_population_for_default_seed() {
        let live_set = seed(&Grid::default(), DEFAULT_SEED);
        let actives = live_set.actives();
        assert_eq!(actives.len(), 770);
        assert_eq!(
            actives[..5],
            [pos!(80, 47), pos!(80, 49), pos!(80, 51), pos!(80, 52), pos!(80, 57)]
        );
        assert_eq!(actives[actives.len() - 3..], [pos!(119, 75), pos!(119, 78), pos!(119, 80)]);
    }

    #[test]
    fn test_region_is_clipped_on_small_grids() {
        let grid = Grid::new(10, 8).unwrap();
        let live_set = seed(&grid, 1);
        assert!(live_set.iter().all(|pos| grid.contains(pos)));
    }

    #[test]
    fn test_clipped_cells_still_consume_draws() {
        let grid = Grid::new(30, 30).unwrap();
        let center = grid.center();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut expected = LiveSet::new();
        for x in (center.x - 20)..(center.x + 20) {
            for y in (center.y - 20)..(center.y + 20) {
                let pos = pos!(x, y);
                if rng.gen::<bool>() && grid.contains(pos) {
                    expected.insert(pos);
                }
            }
        }
        let live_set = seed(&grid, 7);
        assert_eq!(live_set, expected);
        assert_eq!(live_set.len(), 440);
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("7").unwrap(), 7);
        assert_eq!(parse_seed("  3006\n").unwrap(), 3006);
        assert_eq!(parse_seed("-1").unwrap(), u64::MAX);
        assert_eq!(parse_seed(&u64::MAX.to_string()).unwrap(), u64::MAX);
    }

    #[test]
    fn test_parse_seed_rejects_garbage() {
        for input in ["", "seven", "1.5", "0x10", "12a"] {
            assert!(matches!(parse_seed(input), Err(Error::InvalidSeed(s)) if s == input));
        }
    }
}
