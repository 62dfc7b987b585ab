use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_slider_moves;
use crate::moves::piece_offsets::QUEEN_DIRECTIONS;

pub fn generate_queen_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    push_slider_moves(
        game_state,
        side,
        PieceKind::Queen,
        &QUEEN_DIRECTIONS,
        out,
    );
}
