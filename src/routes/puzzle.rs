use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use crate::{config::PuzzleConfig, game::Grid, models::Placement, AppState};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PuzzleQuery {
    pub size: Option<usize>,
    pub seed: Option<u64>,
    /// Number of words drawn from the loaded list, capped at `max_word_count`
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PuzzleRequest {
    pub size: Option<usize>,
    pub seed: Option<u64>,
    pub words: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PuzzleResponse {
    pub size: usize,
    pub grid: Vec<Vec<char>>,
    /// The grid pre-rendered as space-separated rows
    pub rows: Vec<String>,
    pub placements: Vec<Placement>,
    pub dropped: Vec<String>,
}

/// Generate a puzzle from a random sample of the loaded word list
pub async fn random_puzzle(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PuzzleQuery>,
) -> Result<Json<PuzzleResponse>, StatusCode> {
    let settings = &state.config.puzzle;
    let size = resolve_size(settings, query.size)?;
    let count = resolve_count(settings, query.count);
    let mut rng = seeded_rng(query.seed.or(settings.seed));

    let words = state.word_list.sample(&mut rng, count);

    tracing::debug!(
        "Generating {}x{} puzzle from {} sampled words",
        size,
        size,
        words.len()
    );

    build_in_background(size, rng, words).await.map(Json)
}

/// Generate a puzzle from words supplied by the caller
pub async fn custom_puzzle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PuzzleRequest>,
) -> Result<Json<PuzzleResponse>, StatusCode> {
    let settings = &state.config.puzzle;
    let size = resolve_size(settings, payload.size)?;
    if payload.words.len() > settings.max_word_count {
        tracing::warn!(
            "Rejected {} supplied words (max {})",
            payload.words.len(),
            settings.max_word_count
        );
        return Err(StatusCode::BAD_REQUEST);
    }
    let rng = seeded_rng(payload.seed.or(settings.seed));

    tracing::debug!(
        "Generating {}x{} puzzle from {} supplied words",
        size,
        size,
        payload.words.len()
    );

    build_in_background(size, rng, payload.words).await.map(Json)
}

fn resolve_size(settings: &PuzzleConfig, requested: Option<usize>) -> Result<usize, StatusCode> {
    let size = requested.unwrap_or(settings.grid_size);
    if size > settings.max_grid_size {
        tracing::warn!(
            "Rejected grid size {} (max {})",
            size,
            settings.max_grid_size
        );
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(size)
}

/// `0` asks for the whole list, which is clamped like any other oversized count.
fn resolve_count(settings: &PuzzleConfig, requested: Option<usize>) -> usize {
    match requested.unwrap_or(settings.word_count) {
        0 => settings.max_word_count,
        count => count.min(settings.max_word_count),
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Run the fill on the blocking pool so a large puzzle never stalls the runtime
async fn build_in_background(
    size: usize,
    rng: StdRng,
    words: Vec<String>,
) -> Result<PuzzleResponse, StatusCode> {
    tokio::task::spawn_blocking(move || build_puzzle(size, rng, &words))
        .await
        .map_err(|e| {
            tracing::warn!("Puzzle generation task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
}

/// Fill a fresh grid and package it for the response
pub fn build_puzzle(
    size: usize,
    rng: StdRng,
    words: &[String],
) -> Result<PuzzleResponse, StatusCode> {
    let mut grid = Grid::with_rng(size, rng).map_err(|e| {
        tracing::warn!("Failed to create grid: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let report = grid.fill(words);
    tracing::debug!(
        "Puzzle ready: {} of {} words placed",
        report.placed_count(),
        words.len()
    );

    Ok(PuzzleResponse {
        size: grid.size(),
        grid: grid.cells().to_vec(),
        rows: grid.rows(),
        placements: report.placements,
        dropped: report.dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{self, Body},
        http::Request,
    };
    use crate::{
        config::{Config, RunMode, ServerConfig},
        game::FILLER,
        routes,
        word_list::WordList,
    };
    use serde_json::json;
    use tower::ServiceExt;

    fn test_state(words: &str) -> Arc<AppState> {
        Arc::new(AppState {
            config: Config {
                mode: RunMode::Serve,
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                },
                puzzle: PuzzleConfig {
                    word_list_path: "unused.txt".to_string(),
                    grid_size: 6,
                    max_grid_size: 12,
                    word_count: 3,
                    max_word_count: 4,
                    seed: None,
                },
            },
            word_list: WordList::parse(words),
        })
    }

    fn app(state: Arc<AppState>) -> axum::Router {
        routes::create_routes().with_state(state)
    }

    async fn read_puzzle(response: axum::response::Response) -> PuzzleResponse {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_build_puzzle_rejects_zero_size() {
        let result = build_puzzle(0, StdRng::seed_from_u64(1), &["cat".to_string()]);
        assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_build_puzzle_round_trip() {
        let words = vec!["cat".to_string(), "unplaceable".to_string()];
        let puzzle = build_puzzle(5, StdRng::seed_from_u64(9), &words).unwrap();

        assert_eq!(puzzle.size, 5);
        assert_eq!(puzzle.rows.len(), 5);
        assert_eq!(puzzle.dropped, vec!["unplaceable".to_string()]);
        assert_eq!(puzzle.placements.len(), 1);

        let placement = &puzzle.placements[0];
        let spelled: String = placement
            .cells(5)
            .iter()
            .map(|c| puzzle.grid[c.row][c.col])
            .collect();
        assert_eq!(spelled, "cat");
        assert_eq!(
            puzzle.grid.iter().flatten().filter(|&&c| c != FILLER).count(),
            3
        );
    }

    #[tokio::test]
    async fn test_get_puzzle_samples_word_list() {
        let state = test_state("ant\nbee\nfly\nmoth\nwasp\ngnat");
        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/api/puzzle?seed=4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let puzzle = read_puzzle(response).await;
        assert_eq!(puzzle.size, 6);
        assert_eq!(puzzle.placements.len() + puzzle.dropped.len(), 3);
    }

    #[tokio::test]
    async fn test_get_puzzle_is_reproducible_with_seed() {
        let state = test_state("ant\nbee\nfly\nmoth\nwasp\ngnat");
        let request = || {
            Request::builder()
                .uri("/api/puzzle?seed=17&size=7")
                .body(Body::empty())
                .unwrap()
        };

        let first = read_puzzle(app(state.clone()).oneshot(request()).await.unwrap()).await;
        let second = read_puzzle(app(state).oneshot(request()).await.unwrap()).await;
        assert_eq!(first.grid, second.grid);
        assert_eq!(first.placements, second.placements);
    }

    #[tokio::test]
    async fn test_get_puzzle_rejects_oversized_grid() {
        let response = app(test_state("ant"))
            .oneshot(
                Request::builder()
                    .uri("/api/puzzle?size=13")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_puzzle_with_custom_words() {
        let body = json!({ "size": 4, "seed": 2, "words": ["ab", "cd", "toolong"] });
        let response = app(test_state(""))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/puzzle")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let puzzle = read_puzzle(response).await;
        assert_eq!(puzzle.size, 4);
        assert!(puzzle.dropped.contains(&"toolong".to_string()));
        assert!(puzzle.placements.iter().all(|p| p.word != "toolong"));
        assert_eq!(puzzle.placements.len() + puzzle.dropped.len(), 3);
    }

    #[tokio::test]
    async fn test_post_puzzle_rejects_zero_size() {
        let body = json!({ "size": 0, "words": ["ab"] });
        let response = app(test_state(""))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/puzzle")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(test_state(""))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["service"], "word-search-backend");
    }

    #[tokio::test]
    async fn test_get_puzzle_whole_list_is_capped() {
        let state = test_state("ant\nbee\nfly\nmoth\nwasp\ngnat");
        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/api/puzzle?count=0&seed=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let puzzle = read_puzzle(response).await;
        assert_eq!(puzzle.placements.len() + puzzle.dropped.len(), 4);
    }

    #[test]
    fn test_resolve_count_clamps_to_max() {
        let settings = test_state("").config.puzzle.clone();
        assert_eq!(resolve_count(&settings, None), 3);
        assert_eq!(resolve_count(&settings, Some(2)), 2);
        assert_eq!(resolve_count(&settings, Some(0)), 4);
        assert_eq!(resolve_count(&settings, Some(10_000)), 4);
    }

    #[tokio::test]
    async fn test_post_puzzle_rejects_too_many_words() {
        let body = json!({ "size": 6, "words": ["a", "b", "c", "d", "e"] });
        let response = app(test_state(""))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/puzzle")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
