use std::collections::BTreeMap;

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// Every pseudo-legal move for the side to move. King safety is ignored.
pub fn generate_pseudo_legal_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_pseudo_legal_moves_for(game_state, game_state.side_to_move, out);
}

/// Pseudo-legal moves of `side`, whether or not it is that side's turn.
pub fn generate_pseudo_legal_moves_for(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    generate_pawn_moves(game_state, side, out);
    generate_knight_moves(game_state, side, out);
    generate_bishop_moves(game_state, side, out);
    generate_rook_moves(game_state, side, out);
    generate_queen_moves(game_state, side, out);
    generate_king_moves(game_state, side, out);
}

/// Legal moves keyed by their disambiguated algebraic string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoveSet {
    moves: BTreeMap<String, Move>,
}

impl LegalMoveSet {
    pub fn from_map(moves: BTreeMap<String, Move>) -> Self {
        Self { moves }
    }

    #[inline]
    pub fn get(&self, algebraic: &str) -> Option<&Move> {
        self.moves.get(algebraic)
    }

    #[inline]
    pub fn contains(&self, algebraic: &str) -> bool {
        self.moves.contains_key(algebraic)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.moves.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Move)> {
        self.moves.iter().map(|(key, mv)| (key.as_str(), mv))
    }

    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.moves.values()
    }
}

/// Legality strategy: how to tell whether a king could be taken.
///
/// Both hooks observe the position without mutating it; the shared driver in
/// `legal_move_generator` performs the apply/undo pairing around them.
pub trait MoveGenerator: Send + Sync {
    /// Could any pseudo-legal reply of the other side capture `king_side`'s king?
    fn king_capturable(&self, game_state: &GameState, king_side: Color) -> bool;

    /// Does the other side threaten any square the castling king crosses?
    /// Evaluated in the position before the castle is applied.
    fn castle_path_attacked(&self, game_state: &GameState, castle: &Move) -> bool;

    fn generate_legal_moves(&self, game_state: &mut GameState) -> ChessResult<Vec<Move>> {
        crate::move_generation::legal_move_generator::filter_legal_moves(self, game_state)
    }

    fn legal_move_set(&self, game_state: &mut GameState) -> ChessResult<LegalMoveSet> {
        crate::move_generation::legal_move_generator::build_legal_move_set(self, game_state)
    }
}
