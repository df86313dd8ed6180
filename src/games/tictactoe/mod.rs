//! The 3×3 grid game: board types and the perfect-play solver.

mod solver;
mod types;

pub use solver::{Choice, solve};
pub use types::{Board, BoardShapeError, Cell, GridStatus, Mark};
