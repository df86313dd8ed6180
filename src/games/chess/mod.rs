//! Thin adapter over the chess rules oracle.
//!
//! Positions travel as FEN strings and moves as UCI coordinate tokens
//! (`e2e4`, `e7e8q`). Both are opaque to this module: decoding is
//! delegated to the [`chess`] crate, which is treated as authoritative for
//! legality and state transitions. Nothing here re-derives chess rules.

mod engine;

pub use engine::{EngineConfig, suggest_move};

use chess::{Board, ChessMove};
use derive_more::{Display, Error};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Errors raised by the adapter.
#[derive(Debug, Clone, Display, Error)]
pub enum ChessError {
    /// The position encoding could not be decoded by the oracle.
    #[display("invalid position: {reason}")]
    InvalidPosition {
        /// Decoder failure detail.
        reason: String,
    },
    /// The move token could not be decoded by the oracle.
    #[display("cannot decode move '{token}'")]
    InvalidMove {
        /// The undecodable token.
        token: String,
    },
    /// The move decodes but is not legal from the given position.
    #[display("illegal move '{token}'")]
    IllegalMove {
        /// The rejected move token.
        token: String,
    },
}

/// Result of a legality check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legality {
    /// Whether the move is legal from the position.
    pub legal: bool,
    /// Failure detail when the move could not even be decoded.
    pub reason: Option<String>,
}

fn parse_position(fen: &str) -> Result<Board, ChessError> {
    Board::from_str(fen).map_err(|e| ChessError::InvalidPosition {
        reason: e.to_string(),
    })
}

/// Checks whether `mv` is legal from the position `fen`.
///
/// An undecodable move token is a soft failure: the move is reported as
/// not legal with reason `invalid_format` rather than an error.
///
/// # Errors
///
/// Returns [`ChessError::InvalidPosition`] when the position itself cannot
/// be decoded.
#[instrument(skip(fen))]
pub fn check_legal(fen: &str, mv: &str) -> Result<Legality, ChessError> {
    let board = parse_position(fen)?;
    let mv = match ChessMove::from_str(mv) {
        Ok(m) => m,
        Err(_) => {
            debug!(token = %mv, "move token failed to decode");
            return Ok(Legality {
                legal: false,
                reason: Some("invalid_format".to_string()),
            });
        }
    };
    Ok(Legality {
        legal: board.legal(mv),
        reason: None,
    })
}

/// Plays `mv` on the position `fen` and returns the successor FEN.
///
/// Legality is re-derived here regardless of any prior [`check_legal`]
/// call. The input position is never modified; either the fully updated
/// successor is returned or the call fails.
///
/// # Errors
///
/// Returns [`ChessError::InvalidPosition`] or [`ChessError::InvalidMove`]
/// on decode failures, and [`ChessError::IllegalMove`] when the move is
/// not in the legal-move set of the position.
#[instrument(skip(fen))]
pub fn apply_move(fen: &str, mv: &str) -> Result<String, ChessError> {
    let board = parse_position(fen)?;
    let parsed = ChessMove::from_str(mv).map_err(|_| ChessError::InvalidMove {
        token: mv.to_string(),
    })?;
    if !board.legal(parsed) {
        return Err(ChessError::IllegalMove {
            token: mv.to_string(),
        });
    }
    let next = board.make_move_new(parsed);
    debug!(token = %mv, "move applied");
    Ok(next.to_string())
}
