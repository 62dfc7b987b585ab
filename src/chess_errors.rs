//! Errors used throughout the rules core.
//!
//! `ChessError` is the single error type returned by parsing, move
//! application, history handling and search. Parsing and illegal-move
//! variants are recoverable input problems; `OccupancyConflict` signals a
//! generator or filter bug and is not meant to be recovered from.

use thiserror::Error;

use crate::game_state::chess_types::Square;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// Malformed placement or FEN-like text.
    #[error("invalid board text: {0}")]
    Format(String),

    /// Board dimensions outside 1..=26 files or 1..=16 ranks.
    #[error("unsupported board size {files}x{ranks} (limit 26 files x 16 ranks)")]
    Size { files: usize, ranks: usize },

    /// Requested move string is not in the current legal-move set.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no move to undo")]
    NoHistory,

    /// A square was double-occupied or an empty square was freed.
    #[error("occupancy conflict on square {square}: {reason}")]
    OccupancyConflict { square: Square, reason: &'static str },

    /// A caller raised the stop flag while a search was running.
    #[error("search stopped by caller")]
    SearchStopped,
}

impl ChessError {
    #[inline]
    pub(crate) fn conflict(square: Square, reason: &'static str) -> Self {
        ChessError::OccupancyConflict { square, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::ChessError;

    #[test]
    fn messages_carry_context() {
        let err = ChessError::Size { files: 27, ranks: 8 };
        assert_eq!(
            err.to_string(),
            "unsupported board size 27x8 (limit 26 files x 16 ranks)"
        );

        let err = ChessError::conflict(12, "target occupied by own piece");
        assert!(err.to_string().contains("square 12"));
    }
}
