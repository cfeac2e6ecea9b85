//! Error types for lifegrid

use thiserror::Error;

/// Crate error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid seed: {0:?} is not an integer")]
    InvalidSeed(String),

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Pattern cell ({x}, {y}) is outside the grid")]
    PatternOutOfBounds { x: i32, y: i32 },

    #[error("Simulation thread is gone")]
    Disconnected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
