use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell position in the grid, `(row, col)` from the top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell one step along `direction`, if it lies inside a
    /// grid of `size` x `size`.
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let (row_step, col_step) = direction.step();
        let row = self.row.checked_add_signed(row_step)?;
        let col = self.col.checked_add_signed(col_step)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The six ways a word can run through the grid.
///
/// Forward directions move toward higher row/column indices, the reverse
/// ones move back toward the origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum Direction {
    Horizontal,
    Vertical,
    Diagonal,
    ReverseHorizontal,
    ReverseVertical,
    ReverseDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::ReverseHorizontal,
        Direction::ReverseVertical,
        Direction::ReverseDiagonal,
    ];

    /// `(row_step, col_step)` applied once per character.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::ReverseHorizontal => (0, -1),
            Direction::ReverseVertical => (-1, 0),
            Direction::ReverseDiagonal => (-1, -1),
        }
    }

    /// Coarse bound test run before the cell-by-cell scan.
    ///
    /// The reverse rules are stricter than strictly necessary (a word of
    /// length `col + 1` would fit leftwards from `col`), and the reverse
    /// diagonal only bounds the larger axis; the scan rejects whatever
    /// this lets through.
    pub fn within_bounds(self, anchor: Coordinate, len: usize, size: usize) -> bool {
        let Coordinate { row, col } = anchor;
        match self {
            Direction::Horizontal => col + len <= size,
            Direction::Vertical => row + len <= size,
            Direction::Diagonal => (row + len).max(col + len) <= size,
            Direction::ReverseHorizontal => len <= col,
            Direction::ReverseVertical => len <= row,
            Direction::ReverseDiagonal => len <= row.max(col),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A word that made it into the grid, anchored at its first letter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub direction: Direction,
    pub anchor: Coordinate,
    pub word: String,
}

impl Placement {
    /// Every cell the word occupies, in letter order.
    pub fn cells(&self, size: usize) -> Vec<Coordinate> {
        let mut cells = Vec::with_capacity(self.word.len());
        let mut current = Some(self.anchor);
        for _ in self.word.chars() {
            let Some(coord) = current else { break };
            cells.push(coord);
            current = coord.step(self.direction, size);
        }
        cells
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.word, self.direction, self.anchor)
    }
}

/// Outcome of one fill: what went in and what had to be left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillReport {
    pub placements: Vec<Placement>,
    pub dropped: Vec<String>,
}

impl FillReport {
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }
}
