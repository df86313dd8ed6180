//! Game implementations and the kinds the ledger counts by.

pub mod chess;
pub mod tictactoe;

use serde::{Deserialize, Serialize};

/// The games this service arbitrates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// The 3×3 grid game.
    Tictactoe,
    /// The oracle-mediated game.
    Chess,
}

/// The outcome kinds a score event can carry.
///
/// Win/loss/draw are from the service's (AI's) perspective; `Move` counts
/// a single applied move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// The AI side won.
    Win,
    /// The AI side lost.
    Loss,
    /// The game was drawn.
    Draw,
    /// A single move was applied.
    Move,
}
