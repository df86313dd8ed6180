//! Exhaustive minimax for the 3×3 grid game.
//!
//! O maximizes, X minimizes. Terminal scores are +1 for an O win, -1 for
//! an X win and 0 for a draw. Candidate cells are scanned in ascending
//! index order with strict `>` / `<` comparisons, so ties always resolve
//! to the lowest index. The full tree is at most 9 plies deep; no pruning
//! is needed at this scale.

use tracing::instrument;

use super::types::{Board, Cell, GridStatus, Mark};

/// The move selected by the solver, paired with its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Index of the chosen empty cell (0-8).
    pub index: usize,
    /// Guaranteed score of the position after the move, from O's view.
    pub score: i32,
}

/// Selects the best move for `player` on `board`.
///
/// Returns `None` only when the board has no empty cell; callers should
/// check [`Board::status`] for terminality before asking for a move.
#[instrument(skip(board))]
pub fn solve(board: Board, player: Mark) -> Option<Choice> {
    let mut board = board;
    let mut best: Option<Choice> = None;

    for index in 0..9 {
        if !board.is_empty(index) {
            continue;
        }
        board.set(index, Cell::Occupied(player));
        let score = evaluate(&mut board, player.opponent());
        board.set(index, Cell::Empty);

        let better = match best {
            None => true,
            // Strict comparisons keep the first index that attains the
            // running optimum.
            Some(current) => match player {
                Mark::O => score > current.score,
                Mark::X => score < current.score,
            },
        };
        if better {
            best = Some(Choice { index, score });
        }
    }

    best
}

/// Scores a position with `player` to move, recursing to the full depth
/// of the remaining game tree.
fn evaluate(board: &mut Board, player: Mark) -> i32 {
    match board.status() {
        GridStatus::Won(Mark::O) => return 1,
        GridStatus::Won(Mark::X) => return -1,
        GridStatus::Draw => return 0,
        GridStatus::InProgress => {}
    }

    let mut best = match player {
        Mark::O => i32::MIN,
        Mark::X => i32::MAX,
    };

    for index in 0..9 {
        if !board.is_empty(index) {
            continue;
        }
        board.set(index, Cell::Occupied(player));
        let score = evaluate(board, player.opponent());
        board.set(index, Cell::Empty);

        best = match player {
            Mark::O => best.max(score),
            Mark::X => best.min(score),
        };
    }

    best
}
