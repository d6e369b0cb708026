pub mod puzzle;

pub use puzzle::{Coordinate, Direction, FillReport, Placement};
