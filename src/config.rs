use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{env, str::FromStr};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mode: RunMode,
    pub server: ServerConfig,
    pub puzzle: PuzzleConfig,
}

/// What the binary does once configuration is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Generate one puzzle and print it to stdout
    Print,
    /// Serve puzzles over HTTP
    Serve,
}

impl FromStr for RunMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "print" => Ok(RunMode::Print),
            "serve" => Ok(RunMode::Serve),
            other => bail!("unknown run mode '{}', expected 'print' or 'serve'", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleConfig {
    pub word_list_path: String,
    pub grid_size: usize,
    pub max_grid_size: usize,
    /// Words sampled per puzzle; 0 feeds the whole list
    pub word_count: usize,
    /// Upper bound on words per HTTP-generated puzzle
    pub max_word_count: usize,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mode = env::var("RUN_MODE")
            .unwrap_or_else(|_| "print".to_string())
            .parse()
            .context("RUN_MODE must be 'print' or 'serve'")?;

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let puzzle = PuzzleConfig {
            word_list_path: env::var("WORD_LIST_PATH")
                .unwrap_or_else(|_| "./words_alpha.txt".to_string()),
            grid_size: env::var("GRID_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("GRID_SIZE must be a number")?,
            max_grid_size: env::var("MAX_GRID_SIZE")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50),
            word_count: env::var("WORD_COUNT")
                .unwrap_or_else(|_| "25".to_string())
                .parse()
                .unwrap_or(25),
            max_word_count: env::var("MAX_WORD_COUNT")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .context("MAX_WORD_COUNT must be a number")?,
            seed: match env::var("PUZZLE_SEED") {
                Ok(seed) => Some(seed.parse().context("PUZZLE_SEED must be a number")?),
                Err(_) => None,
            },
        };

        puzzle.validate()?;

        Ok(Config {
            mode,
            server,
            puzzle,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl PuzzleConfig {
    /// Reject settings that would make every default request fail
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            bail!("GRID_SIZE must be positive");
        }
        if self.grid_size > self.max_grid_size {
            bail!(
                "GRID_SIZE {} exceeds MAX_GRID_SIZE {}",
                self.grid_size,
                self.max_grid_size
            );
        }
        if self.max_word_count == 0 {
            bail!("MAX_WORD_COUNT must be positive");
        }
        Ok(())
    }
}
