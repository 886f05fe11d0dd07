//! Axum HTTP server over the shared simulation handle.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Welcome message |
//! | GET | `/health` | Health check |
//! | GET | `/teams` | Roster with id, name, bias |
//! | GET | `/games/current` | Season in progress and its games |
//! | GET | `/games/all` | Every completed season |
//! | GET | `/games/{season}` | One completed season, 404 if absent |
//! | GET | `/simulation/status` | Timer state and bounds |
//! | POST | `/simulate-once` | Run one round now |
//! | POST | `/clear-data` | Reset to the epoch |
//! | POST | `/extend-simulation` | Raise the end season by one |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::{error::SimError, simulator::SimHandle, types::Season};

pub type AppState = SimHandle;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn create_router(handle: SimHandle) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health_check))
        .route("/teams", get(handle_get_teams))
        .route("/games/current", get(handle_get_current_games))
        .route("/games/current-year", get(handle_get_current_games))
        .route("/games/all", get(handle_get_all_games))
        .route("/games/{season}", get(handle_get_season_games))
        .route("/simulation/status", get(handle_get_status))
        .route("/simulate-once", post(handle_simulate_once))
        .route("/clear-data", post(handle_clear_data))
        .route("/extend-simulation", post(handle_extend_simulation))
        .layer(cors)
        .with_state(handle)
}

fn error_response(status: StatusCode, msg: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": msg })))
}

fn sim_error_response(err: SimError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        SimError::SeasonNotFound { .. } => StatusCode::NOT_FOUND,
        SimError::NotBounded            => StatusCode::CONFLICT,
        SimError::InvalidConfig(_)      => StatusCode::BAD_REQUEST,
        _                               => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, &err.to_string())
}

// ── GET handlers ────────────────────────────────────────────────────

async fn handle_root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Gridiron season simulator!" }))
}

async fn handle_health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

async fn handle_get_teams(State(handle): State<AppState>) -> Json<Value> {
    let engine = handle.lock().await;
    Json(json!({ "teams": engine.roster() }))
}

async fn handle_get_current_games(State(handle): State<AppState>) -> Json<Value> {
    let engine = handle.lock().await;
    Json(json!({
        "season": engine.current_season(),
        "games": engine.current_games(),
    }))
}

async fn handle_get_all_games(State(handle): State<AppState>) -> Json<Value> {
    let engine = handle.lock().await;
    Json(json!({ "seasons": engine.ledger().archive() }))
}

async fn handle_get_season_games(
    State(handle): State<AppState>,
    Path(season): Path<Season>,
) -> ApiResult {
    let engine = handle.lock().await;
    let games = engine.ledger().season_games(season).map_err(sim_error_response)?;
    Ok(Json(json!({ "season": season, "games": games })))
}

async fn handle_get_status(State(handle): State<AppState>) -> Json<Value> {
    let engine = handle.lock().await;
    Json(json!({
        "state": engine.clock.state,
        "season": engine.current_season(),
        "end_season": engine.clock.end_season,
        "interval_secs": engine.clock.interval_secs,
        "games_per_season": engine.ledger().games_per_season(),
    }))
}

// ── POST handlers ───────────────────────────────────────────────────

async fn handle_simulate_once(State(handle): State<AppState>) -> ApiResult {
    let report = handle.simulate_once().await.map_err(sim_error_response)?;
    Ok(Json(json!({
        "message": format!("Simulated one round of games for season {}.", report.season),
        "season": report.season,
        "seasons_closed": report.seasons_closed(),
        "games": report.current_games,
    })))
}

async fn handle_clear_data(State(handle): State<AppState>) -> ApiResult {
    let event = handle.clear().await.map_err(sim_error_response)?;
    Ok(Json(json!({ "message": "All data has been cleared.", "event": event })))
}

async fn handle_extend_simulation(State(handle): State<AppState>) -> ApiResult {
    let end_season = handle.extend().await.map_err(sim_error_response)?;
    Ok(Json(json!({
        "message": format!("Simulation extended to season {end_season}."),
        "end_season": end_season,
    })))
}
