// Puzzle engine modules

pub mod error;
pub mod grid;

pub use error::GridError;
pub use grid::{Grid, FILLER};
