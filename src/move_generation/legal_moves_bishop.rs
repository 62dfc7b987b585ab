use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_slider_moves;
use crate::moves::piece_offsets::BISHOP_DIRECTIONS;

pub fn generate_bishop_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    push_slider_moves(
        game_state,
        side,
        PieceKind::Bishop,
        &BISHOP_DIRECTIONS,
        out,
    );
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;

    #[test]
    fn bishop_ray_stops_on_enemy_blocker() {
        let game = GameState::from_fen("4k3/8/8/8/3p4/8/1B6/4K3 w - - 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_bishop_moves(&game, game.side_to_move, &mut moves);

        // a1, a3, c1, c3, xd4
        assert_eq!(moves.len(), 5);
        let captures: Vec<_> = moves.iter().filter(|mv| mv.captured.is_some()).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].captured, Some(PieceKind::Pawn));
    }
}
