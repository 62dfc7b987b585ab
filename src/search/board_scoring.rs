//! Pluggable board evaluation.
//!
//! Search delegates static scoring to this trait so alternate heuristics can
//! be swapped without touching the search loop.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 5000,
        }
    }

    #[inline]
    fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        let side_total = |color: Color| -> i32 {
            game_state
                .pieces(color)
                .map(|(_, piece)| Self::piece_value(piece.kind))
                .sum()
        };
        side_total(Color::Light) - side_total(Color::Dark)
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let white_minus_black = Self::material_balance_white_minus_black(game_state);
        match game_state.side_to_move {
            Color::Light => white_minus_black,
            Color::Dark => -white_minus_black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardScorer, MaterialScorer};
    use crate::game_state::game_state::GameState;

    #[test]
    fn material_scorer_is_side_relative() {
        let scorer = MaterialScorer;

        let white_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let black_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").expect("FEN should parse");

        assert_eq!(scorer.score(&white_to_move), 900);
        assert_eq!(scorer.score(&black_to_move), -900);
    }

    #[test]
    fn start_position_is_balanced() {
        let game = GameState::new_game().expect("start position should parse");
        assert_eq!(MaterialScorer.score(&game), 0);
    }
}
