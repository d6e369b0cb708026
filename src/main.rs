mod config;
mod game;
mod models;
mod routes;
mod word_list;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use config::{Config, RunMode};
use game::Grid;
use rand::{rngs::StdRng, SeedableRng};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use word_list::WordList;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub word_list: WordList,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_search_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded ({:?} mode)", config.mode);

    // Load word list
    let word_list = match WordList::load(&config.puzzle.word_list_path).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("{:#}. Using empty word list for now.", e);
            tracing::warn!(
                "Place a newline-delimited word list at {} to get real puzzles",
                config.puzzle.word_list_path
            );
            WordList::empty()
        }
    };

    if word_list.is_empty() {
        tracing::warn!("Word list is empty; puzzles will contain only filler");
    }

    match config.mode {
        RunMode::Print => print_puzzle(&config, &word_list),
        RunMode::Serve => serve(config, word_list).await,
    }
}

/// Generate a single puzzle and write it to stdout
fn print_puzzle(config: &Config, word_list: &WordList) -> Result<()> {
    let size = config.puzzle.grid_size;
    let count = config.puzzle.word_count;

    let (words, mut grid) = match config.puzzle.seed {
        Some(seed) => (
            word_list.sample(&mut StdRng::seed_from_u64(seed), count),
            Grid::with_seed(size, seed)?,
        ),
        None => (word_list.sample(&mut rand::rng(), count), Grid::new(size)?),
    };

    println!("{}", grid.display(&words));

    if !grid.dropped().is_empty() {
        tracing::info!("{} words did not fit", grid.dropped().len());
    }

    Ok(())
}

async fn serve(config: Config, word_list: WordList) -> Result<()> {
    let addr = config.server_addr();
    let state = Arc::new(AppState { config, word_list });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Puzzles: http://{}/api/puzzle", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
