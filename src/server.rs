//! HTTP transport over the arbitration facade.
//!
//! One route per facade operation, JSON in and out. Errors share a
//! uniform body: `{"error": <stable kind>, "reason": <human string>}`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::arbiter::{Arbiter, ArbiterError, GridReply};
use crate::games::chess::Legality;
use crate::games::tictactoe::Cell;
use crate::ledger::LedgerCounts;

/// Request for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Requested username.
    pub username: String,
}

/// Response to a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// The registered username.
    pub username: String,
}

/// Leaderboard counts keyed by game, then outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoresResponse {
    /// Counts per (game, outcome) pair.
    pub counts: LedgerCounts,
}

/// Request for a grid-game AI move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMoveRequest {
    /// The 9-cell board, row-major, cells `""`/`"X"`/`"O"`.
    pub board: Vec<Cell>,
}

/// Request touching a chess position with a move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChessMoveRequest {
    /// Position encoding (FEN).
    pub fen: String,
    /// Move token (UCI coordinate notation).
    #[serde(rename = "move")]
    pub mv: String,
}

/// Response carrying the successor position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChessApplyResponse {
    /// Successor position encoding (FEN).
    pub fen: String,
}

/// Request for an engine move suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineMoveRequest {
    /// Position encoding (FEN).
    pub fen: String,
    /// Per-call engine binary location, overriding the configured one.
    #[serde(default)]
    pub engine_path: Option<PathBuf>,
}

/// Response carrying the engine's suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineMoveResponse {
    /// Suggested move token (UCI coordinate notation).
    pub uci: String,
}

/// Facade error adapted to an HTTP response.
#[derive(Debug, derive_more::From)]
pub struct ApiError(ArbiterError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ArbiterError::Validation { .. }
            | ArbiterError::IllegalMove { .. }
            | ArbiterError::EngineUnavailable { .. } => StatusCode::BAD_REQUEST,
            ArbiterError::Conflict { .. } => StatusCode::CONFLICT,
            ArbiterError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({
            "error": self.0.kind(),
            "reason": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Builds the service router.
pub fn router(arbiter: Arc<Arbiter>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/scores", get(scores))
        .route("/tictactoe/ai_move", post(tictactoe_ai_move))
        .route("/chess/validate_move", post(chess_validate_move))
        .route("/chess/apply_move", post(chess_apply_move))
        .route("/chess/engine_move", post(chess_engine_move))
        .with_state(arbiter)
}

/// Binds a listener and serves the router until the process exits.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(host: &str, port: u16, arbiter: Arc<Arbiter>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(host = %host, port, "Server ready");
    axum::serve(listener, router(arbiter)).await?;
    Ok(())
}

#[instrument(skip(arbiter, req), fields(username = %req.username))]
async fn register(
    State(arbiter): State<Arc<Arbiter>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let user = arbiter.register(&req.username)?;
    Ok(Json(RegisterResponse {
        ok: true,
        username: user.username().clone(),
    }))
}

#[instrument(skip(arbiter))]
async fn scores(State(arbiter): State<Arc<Arbiter>>) -> Result<Json<ScoresResponse>, ApiError> {
    let counts = arbiter.leaderboard()?;
    Ok(Json(ScoresResponse { counts }))
}

#[instrument(skip(arbiter, req), fields(cells = req.board.len()))]
async fn tictactoe_ai_move(
    State(arbiter): State<Arc<Arbiter>>,
    Json(req): Json<GridMoveRequest>,
) -> Result<Json<GridReply>, ApiError> {
    debug!("Processing grid AI move");
    let reply = arbiter.grid_move(&req.board)?;
    Ok(Json(reply))
}

#[instrument(skip(arbiter, req), fields(mv = %req.mv))]
async fn chess_validate_move(
    State(arbiter): State<Arc<Arbiter>>,
    Json(req): Json<ChessMoveRequest>,
) -> Result<Json<Legality>, ApiError> {
    let legality = arbiter.chess_check(&req.fen, &req.mv)?;
    Ok(Json(legality))
}

#[instrument(skip(arbiter, req), fields(mv = %req.mv))]
async fn chess_apply_move(
    State(arbiter): State<Arc<Arbiter>>,
    Json(req): Json<ChessMoveRequest>,
) -> Result<Json<ChessApplyResponse>, ApiError> {
    let fen = arbiter.chess_apply(&req.fen, &req.mv)?;
    Ok(Json(ChessApplyResponse { fen }))
}

#[instrument(skip(arbiter, req))]
async fn chess_engine_move(
    State(arbiter): State<Arc<Arbiter>>,
    Json(req): Json<EngineMoveRequest>,
) -> Result<Json<EngineMoveResponse>, ApiError> {
    let uci = arbiter
        .chess_suggest(&req.fen, req.engine_path.as_deref())
        .await?;
    Ok(Json(EngineMoveResponse { uci }))
}
