//! Rook move generation.
//!
//! Emits rook slides for the side to move, including captures of the first
//! enemy piece on each ray. Castling is produced by the king generator.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_slider_moves;
use crate::moves::piece_offsets::ROOK_DIRECTIONS;

pub fn generate_rook_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    push_slider_moves(
        game_state,
        side,
        PieceKind::Rook,
        &ROOK_DIRECTIONS,
        out,
    );
}
