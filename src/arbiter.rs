//! The arbitration facade: the single entry surface the transport layer
//! calls. Dispatches to the grid solver or the chess adapter per game
//! kind, records ledger events, and shapes uniform errors.
//!
//! Every call is a pure function of the state it is given; nothing here
//! holds game state between calls.

use std::path::Path;

use derive_more::{Display, Error, From};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::db::{ArbiterRepository, DbError, User};
use crate::games::chess::{self, ChessError, EngineConfig, Legality};
use crate::games::tictactoe::{self, Board, Cell, GridStatus, Mark};
use crate::games::{GameKind, OutcomeKind};
use crate::ledger::{LedgerCounts, ScoreLedger};

/// Errors surfaced by the facade.
///
/// Each variant maps to a stable machine-readable kind (see
/// [`ArbiterError::kind`]); the display string is the human-readable
/// reason. Nothing is retried internally.
#[derive(Debug, Display, Error, From)]
pub enum ArbiterError {
    /// Malformed request data: wrong board shape, undecodable position or
    /// move token, missing username.
    #[display("invalid request: {reason}")]
    #[from(ignore)]
    Validation {
        /// What was malformed.
        reason: String,
    },
    /// The move decodes but is not legal from the given position.
    #[display("illegal move: {reason}")]
    #[from(ignore)]
    IllegalMove {
        /// The rejected move.
        reason: String,
    },
    /// No external engine is configured or it failed to respond.
    #[display("engine unavailable: {reason}")]
    #[from(ignore)]
    EngineUnavailable {
        /// Why no suggestion could be produced.
        reason: String,
    },
    /// Duplicate registration.
    #[display("conflict: {reason}")]
    #[from(ignore)]
    Conflict {
        /// What conflicted.
        reason: String,
    },
    /// The record store failed.
    #[display("storage error: {_0}")]
    Storage(DbError),
}

impl ArbiterError {
    /// Stable machine-readable error kind for the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            ArbiterError::Validation { .. } => "validation",
            ArbiterError::IllegalMove { .. } => "illegal_move",
            ArbiterError::EngineUnavailable { .. } => "engine_unavailable",
            ArbiterError::Conflict { .. } => "conflict",
            ArbiterError::Storage(_) => "storage",
        }
    }
}

impl From<ChessError> for ArbiterError {
    fn from(err: ChessError) -> Self {
        match err {
            ChessError::InvalidPosition { .. } | ChessError::InvalidMove { .. } => {
                ArbiterError::Validation {
                    reason: err.to_string(),
                }
            }
            ChessError::IllegalMove { .. } => ArbiterError::IllegalMove {
                reason: err.to_string(),
            },
        }
    }
}

/// Reply to a grid AI-move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GridReply {
    /// The board was already terminal, or no move remained: `"X"`, `"O"`
    /// or `"draw"`.
    Finished {
        /// Winning mark or `"draw"`.
        winner: String,
    },
    /// The solver chose a cell for the AI side.
    Chosen {
        /// Index of the chosen cell (0-8).
        ai_index: usize,
    },
}

/// The arbitration facade.
#[derive(Debug, Clone)]
pub struct Arbiter {
    repository: ArbiterRepository,
    ledger: ScoreLedger,
    engine: EngineConfig,
}

impl Arbiter {
    /// Creates a facade over the given record store and engine settings.
    #[instrument(skip(repository, engine))]
    pub fn new(repository: ArbiterRepository, engine: EngineConfig) -> Self {
        info!("Creating Arbiter");
        let ledger = ScoreLedger::new(repository.clone());
        Self {
            repository,
            ledger,
            engine,
        }
    }

    /// Returns the score ledger.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// `Validation` on an empty username, `Conflict` when it is already
    /// taken, `Storage` on any other database failure.
    #[instrument(skip(self))]
    pub fn register(&self, username: &str) -> Result<User, ArbiterError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ArbiterError::Validation {
                reason: "username required".to_string(),
            });
        }
        match self.repository.create_user(username.to_string()) {
            Ok(user) => Ok(user),
            Err(e) if e.is_conflict() => Err(ArbiterError::Conflict {
                reason: format!("username '{username}' already exists"),
            }),
            Err(e) => Err(ArbiterError::Storage(e)),
        }
    }

    /// Returns leaderboard counts by game and outcome.
    ///
    /// # Errors
    ///
    /// `Storage` when the aggregate query fails.
    #[instrument(skip(self))]
    pub fn leaderboard(&self) -> Result<LedgerCounts, ArbiterError> {
        Ok(self.ledger.counts()?)
    }

    /// Computes the AI move for a grid-game board.
    ///
    /// A terminal board short-circuits to its outcome without invoking the
    /// solver. Otherwise the solver plays O and the chosen index is
    /// returned; an exhausted board yields `"draw"`.
    ///
    /// # Errors
    ///
    /// `Validation` when the board is not exactly 9 cells.
    #[instrument(skip(self, cells))]
    pub fn grid_move(&self, cells: &[Cell]) -> Result<GridReply, ArbiterError> {
        let board = Board::from_cells(cells).map_err(|e| ArbiterError::Validation {
            reason: e.to_string(),
        })?;

        match board.status() {
            GridStatus::Won(mark) => {
                let outcome = match mark {
                    Mark::O => OutcomeKind::Win,
                    Mark::X => OutcomeKind::Loss,
                };
                self.record_best_effort(GameKind::Tictactoe, outcome);
                Ok(GridReply::Finished {
                    winner: mark.to_string(),
                })
            }
            GridStatus::Draw => {
                self.record_best_effort(GameKind::Tictactoe, OutcomeKind::Draw);
                Ok(GridReply::Finished {
                    winner: "draw".to_string(),
                })
            }
            GridStatus::InProgress => match tictactoe::solve(board, Mark::O) {
                Some(choice) => {
                    info!(index = choice.index, score = choice.score, "AI move chosen");
                    Ok(GridReply::Chosen {
                        ai_index: choice.index,
                    })
                }
                None => Ok(GridReply::Finished {
                    winner: "draw".to_string(),
                }),
            },
        }
    }

    /// Checks whether a move is legal from a chess position.
    ///
    /// # Errors
    ///
    /// `Validation` when the position cannot be decoded; an undecodable
    /// move token is a soft `legal: false` result.
    #[instrument(skip(self, fen))]
    pub fn chess_check(&self, fen: &str, mv: &str) -> Result<Legality, ArbiterError> {
        Ok(chess::check_legal(fen, mv)?)
    }

    /// Applies a move to a chess position and returns the successor FEN.
    ///
    /// Records a best-effort (chess, move) ledger event on success.
    ///
    /// # Errors
    ///
    /// `Validation` on decode failures, `IllegalMove` when the oracle
    /// rejects the move.
    #[instrument(skip(self, fen))]
    pub fn chess_apply(&self, fen: &str, mv: &str) -> Result<String, ArbiterError> {
        let next = chess::apply_move(fen, mv)?;
        self.record_best_effort(GameKind::Chess, OutcomeKind::Move);
        Ok(next)
    }

    /// Asks the external engine for a suggested move.
    ///
    /// `engine_path` overrides the configured engine location for this
    /// call.
    ///
    /// # Errors
    ///
    /// `Validation` on an undecodable position, `EngineUnavailable` when
    /// no engine could produce a suggestion.
    #[instrument(skip(self, fen))]
    pub async fn chess_suggest(
        &self,
        fen: &str,
        engine_path: Option<&Path>,
    ) -> Result<String, ArbiterError> {
        match chess::suggest_move(fen, engine_path, &self.engine).await? {
            Some(mv) => Ok(mv),
            None => Err(ArbiterError::EngineUnavailable {
                reason: "no engine available".to_string(),
            }),
        }
    }

    /// Ledger writes are a side channel; a failure is logged and never
    /// fails the primary response.
    fn record_best_effort(&self, game: GameKind, outcome: OutcomeKind) {
        if let Err(e) = self.ledger.record(game, outcome) {
            warn!(game = %game, outcome = %outcome, error = %e, "Failed to record score event");
        }
    }
}
