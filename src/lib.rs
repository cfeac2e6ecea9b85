//! Conway's game of life on a bounded board.
//!
//! The engine only ever looks at alive cells and their neighbours, and every
//! step reports the exact set of cells that switched on and off so a renderer
//! can update incrementally.

pub use utils::Pos;
mod utils;

pub use error::{Error, Result};
pub mod error;

pub use grid::Grid;
pub mod grid;

pub use world::{Cell, Diff, LiveSet};
pub mod world;

pub use rule::should_live;
pub mod rule;

pub use step::step;
pub mod step;

pub use seed::{parse_seed, seed};
pub mod seed;

pub use pattern::{centered_origin, parse_pattern};
pub mod pattern;

pub use config::Config;
pub mod config;

pub use sim::{Frame, Reset, RunState, Sim, SimCmd, SimHandle, Simulation};
pub mod sim;

pub use view::View;
pub mod view;
