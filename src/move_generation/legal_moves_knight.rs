use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_step_moves;
use crate::moves::piece_offsets::KNIGHT_OFFSETS;

pub fn generate_knight_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    push_step_moves(
        game_state,
        side,
        PieceKind::Knight,
        &KNIGHT_OFFSETS,
        out,
    );
}
