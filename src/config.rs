//! Runtime configuration with defaults matching the classic 200x125 board.

use std::{path::PathBuf, time::Duration};

use crate::{
    error::Result,
    grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
    seed::DEFAULT_SEED,
    Grid,
};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Board width in cells
    pub width: i32,
    /// Board height in cells
    pub height: i32,
    /// Delay between two generations while running
    pub tick_interval: Duration,
    /// Seed for the initial random population and for resets
    pub rng_seed: u64,
    /// `#`-art file used instead of the random population
    pub pattern: Option<PathBuf>,
}

impl Config {
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.width, self.height)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_interval: DEFAULT_TICK_INTERVAL,
            rng_seed: DEFAULT_SEED,
            pattern: None,
        }
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.grid().unwrap(), Grid::default());
    assert_eq!(config.tick_interval, Duration::from_millis(50));
    assert_eq!(config.rng_seed, 7);
}
