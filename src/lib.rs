//! Parlor - stateless game-arbitration service
//!
//! Given a game's current state and a proposed or requested move, the
//! service computes legality, the resulting state, and (for the grid
//! game) an optimal countermove.
//!
//! # Architecture
//!
//! - **Arbiter**: the single facade the HTTP layer calls
//! - **Games**: perfect-play tic-tac-toe solver; chess delegated to the
//!   `chess` rules oracle, with an optional external UCI engine
//! - **Ledger**: append-only score events aggregated into a leaderboard
//! - **Db**: SQLite persistence for users and score events
//!
//! Every call is a pure function of the state it is given; only the
//! ledger's store is shared between calls, and its writes are serialized.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod arbiter;
mod db;
mod games;
mod ledger;

/// HTTP transport over the facade.
pub mod server;

// Crate-level exports - facade
pub use arbiter::{Arbiter, ArbiterError, GridReply};

// Crate-level exports - database layer
pub use db::{ArbiterRepository, DbError, DbErrorKind, NewScoreEvent, ScoreEvent, User};

// Crate-level exports - ledger
pub use ledger::{LedgerCounts, ScoreLedger};

// Crate-level exports - game kinds
pub use games::{GameKind, OutcomeKind};

// Crate-level exports - grid game
pub use games::tictactoe::{Board, BoardShapeError, Cell, Choice, GridStatus, Mark, solve};

// Crate-level exports - chess adapter
pub use games::chess::{
    ChessError, EngineConfig, Legality, apply_move, check_legal, suggest_move,
};
