use std::path::Path;

use anyhow::{Context, Result};
use rand::{seq::IndexedRandom, Rng};
use tokio::fs;

/// Candidate words read from a newline-delimited file.
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Load a word list from a file, one word per line
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read word list {}", path.display()))?;

        let list = Self::parse(&content);
        tracing::info!("Loaded {} words from {}", list.len(), path.display());

        Ok(list)
    }

    /// Build a word list from text, ignoring blank lines
    pub fn parse(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();

        Self { words }
    }

    /// Create an empty word list (used when the file is missing)
    pub fn empty() -> Self {
        Self { words: Vec::new() }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Pick `count` distinct entries at random; `0` means the whole list.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        let words = self.words();
        if count == 0 || count >= words.len() {
            return words.to_vec();
        }
        words.choose_multiple(rng, count).cloned().collect()
    }

    /// Get the number of words in the list
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
