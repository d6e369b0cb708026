use std::fmt;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    game::GridError,
    models::{Coordinate, Direction, FillReport, Placement},
};

/// Marks a cell no word has claimed.
pub const FILLER: char = '_';

/// A square word-search board together with the words placed on it.
///
/// Every shuffle draws from the grid's own random source, so a grid built
/// with [`Grid::with_seed`] lays out the same puzzle for the same word list.
pub struct Grid<R = StdRng> {
    size: usize,
    cells: Vec<Vec<char>>,
    coordinates: Vec<Coordinate>,
    placements: Vec<Placement>,
    dropped: Vec<String>,
    rng: R,
}

impl Grid<StdRng> {
    /// Create an empty grid seeded from the operating system
    pub fn new(size: usize) -> Result<Self, GridError> {
        Self::with_rng(size, StdRng::from_os_rng())
    }

    /// Create an empty grid whose layout is reproducible from `seed`
    pub fn with_seed(size: usize, seed: u64) -> Result<Self, GridError> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Grid<R> {
    pub fn with_rng(size: usize, rng: R) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::InvalidSize(size));
        }

        let mut coordinates = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                coordinates.push(Coordinate::new(row, col));
            }
        }

        Ok(Self {
            size,
            cells: vec![vec![FILLER; size]; size],
            coordinates,
            placements: Vec::new(),
            dropped: Vec::new(),
            rng,
        })
    }

    /// Place as many of `words` as fit, starting from an empty board.
    ///
    /// Word order, anchor order and direction order are all shuffled, and the
    /// first slot that fits wins. Words that are empty, longer than the grid,
    /// or left without a free slot end up in [`FillReport::dropped`].
    pub fn fill<S: AsRef<str>>(&mut self, words: &[S]) -> FillReport {
        let mut order: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
        order.shuffle(&mut self.rng);
        self.reset();

        tracing::debug!(
            "Filling {}x{} grid with {} words",
            self.size,
            self.size,
            order.len()
        );

        for word in order {
            let len = word.chars().count();
            if len == 0 || len > self.size {
                tracing::debug!("Skipping '{}': length {} cannot fit", word, len);
                self.dropped.push(word.to_string());
                continue;
            }

            self.coordinates.shuffle(&mut self.rng);
            if !self.place_word(word, len) {
                tracing::debug!("No free slot left for '{}'", word);
                self.dropped.push(word.to_string());
            }
        }

        tracing::info!(
            "Placed {} words, dropped {}",
            self.placements.len(),
            self.dropped.len()
        );

        FillReport {
            placements: self.placements.clone(),
            dropped: self.dropped.clone(),
        }
    }

    /// Fill the grid and render the board followed by the placement log.
    pub fn display<S: AsRef<str>>(&mut self, words: &[S]) -> String {
        self.fill(words);

        let mut out = self.to_string();
        out.push_str("\n\n");
        for placement in self.placements() {
            out.push_str(&placement.to_string());
            out.push('\n');
        }
        if !self.dropped().is_empty() {
            out.push_str(&format!("\nNot placed: {}\n", self.dropped().join(", ")));
        }
        out
    }

    fn reset(&mut self) {
        self.placements.clear();
        self.dropped.clear();
        for row in &mut self.cells {
            row.fill(FILLER);
        }
    }

    /// Try each direction in random order against the already shuffled
    /// anchors and write the word into the first slot that fits.
    fn place_word(&mut self, word: &str, len: usize) -> bool {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);

        for direction in directions {
            let anchor = self
                .coordinates
                .iter()
                .copied()
                .find(|&anchor| self.has_space(direction, anchor, len));

            if let Some(anchor) = anchor {
                self.write(direction, anchor, word);
                let placement = Placement {
                    direction,
                    anchor,
                    word: word.to_string(),
                };
                debug_assert_eq!(self.read(&placement), placement.word);
                self.placements.push(placement);
                return true;
            }
        }

        false
    }
}

impl<R> Grid<R> {
    /// Whether `len` free cells run from `anchor` along `direction`.
    fn has_space(&self, direction: Direction, anchor: Coordinate, len: usize) -> bool {
        if !direction.within_bounds(anchor, len, self.size) {
            return false;
        }

        let mut remaining = len;
        let mut current = Some(anchor);
        while let Some(coord) = current.filter(|_| remaining > 0) {
            if self.cells[coord.row][coord.col] != FILLER {
                return false;
            }
            remaining -= 1;
            current = coord.step(direction, self.size);
        }

        // Walking off the edge early leaves cells unaccounted for
        remaining == 0
    }

    /// Caller must have checked `has_space` for the same slot.
    fn write(&mut self, direction: Direction, anchor: Coordinate, word: &str) {
        let mut current = Some(anchor);
        for ch in word.chars() {
            let Some(coord) = current else { break };
            self.cells[coord.row][coord.col] = ch;
            current = coord.step(direction, self.size);
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Vec<char>] {
        &self.cells
    }

    pub fn cell(&self, coord: Coordinate) -> Option<char> {
        self.cells.get(coord.row)?.get(coord.col).copied()
    }

    /// Placements from the most recent fill, in the order they were made
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Words the most recent fill could not place
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Read the letters along a placement back off the board.
    pub fn read(&self, placement: &Placement) -> String {
        placement
            .cells(self.size)
            .into_iter()
            .filter_map(|coord| self.cell(coord))
            .collect()
    }

    /// Each row as space-separated characters
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl<R> fmt::Display for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
