use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_step_moves;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::piece_offsets::{
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, PAWN_CAPTURE_FILES, ROOK_DIRECTIONS,
};

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.king_square(color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Reverse probe from `square`: pawn diagonals, knight and king offsets,
/// then the first piece along each ray.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let size = game_state.size();
    let holds = |from: Square, kinds: &[PieceKind]| {
        game_state
            .piece_for(attacker_color, from)
            .is_some_and(|piece| kinds.contains(&piece.kind))
    };

    for d_file in PAWN_CAPTURE_FILES {
        if let Some(from) = size.offset(square, d_file, -attacker_color.forward()) {
            if holds(from, &[PieceKind::Pawn]) {
                return true;
            }
        }
    }

    let step_attack = |offsets: &[(i16, i16)], kind: PieceKind| {
        offsets.iter().any(|&(d_file, d_rank)| {
            size.offset(square, d_file, d_rank)
                .is_some_and(|from| holds(from, &[kind]))
        })
    };
    if step_attack(&KNIGHT_OFFSETS, PieceKind::Knight) || step_attack(&KING_OFFSETS, PieceKind::King)
    {
        return true;
    }

    let ray_attack = |directions: &[(i16, i16)], kinds: &[PieceKind]| {
        directions.iter().any(|&(d_file, d_rank)| {
            let mut cursor = square;
            while let Some(next) = size.offset(cursor, d_file, d_rank) {
                if game_state.is_occupied(next) {
                    return holds(next, kinds);
                }
                cursor = next;
            }
            false
        })
    };
    ray_attack(&ROOK_DIRECTIONS, &[PieceKind::Rook, PieceKind::Queen])
        || ray_attack(&BISHOP_DIRECTIONS, &[PieceKind::Bishop, PieceKind::Queen])
}

/// Squares `side` threatens: targets of every non-pawn, non-castle
/// pseudo-legal move plus both pawn capture diagonals, occupied or not.
pub fn generate_threats(game_state: &GameState, side: Color, out: &mut Vec<Square>) {
    let size = game_state.size();
    let mut moves = Vec::with_capacity(64);
    generate_knight_moves(game_state, side, &mut moves);
    generate_bishop_moves(game_state, side, &mut moves);
    generate_rook_moves(game_state, side, &mut moves);
    generate_queen_moves(game_state, side, &mut moves);
    push_step_moves(game_state, side, PieceKind::King, &KING_OFFSETS, &mut moves);
    out.extend(moves.iter().map(|mv| mv.to));

    for (from, piece) in game_state.pieces(side) {
        if piece.kind != PieceKind::Pawn {
            continue;
        }
        for d_file in PAWN_CAPTURE_FILES {
            if let Some(to) = size.offset(from, d_file, side.forward()) {
                out.push(to);
            }
        }
    }
}

/// Squares the king crosses while castling, source and destination included.
pub fn castle_transit(size: BoardSize, mv: &Move) -> Vec<Square> {
    let MoveKind::Castle { king_to, .. } = mv.kind else {
        return Vec::new();
    };
    let rank = i16::from(size.rank_of(mv.from));
    let from_file = size.file_of(mv.from);
    let to_file = size.file_of(king_to);
    let (low, high) = (from_file.min(to_file), from_file.max(to_file));
    (low..=high)
        .filter_map(|file| size.square(i16::from(file), rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(game: &GameState, name: &str) -> Square {
        algebraic_to_square(name, game.size()).expect("square should parse")
    }

    #[test]
    fn pawn_attacks_diagonally_forward_only() {
        let game = GameState::from_fen("4k3/8/8/8/4p3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, sq(&game, "d3"), Color::Dark));
        assert!(is_square_attacked(&game, sq(&game, "f3"), Color::Dark));
        assert!(!is_square_attacked(&game, sq(&game, "e3"), Color::Dark));
        assert!(!is_square_attacked(&game, sq(&game, "d5"), Color::Dark));
    }

    #[test]
    fn sliders_are_blocked_by_any_piece() {
        let game =
            GameState::from_fen("4k3/8/8/8/r2P3K/8/8/8 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, sq(&game, "d4"), Color::Dark));
        assert!(!is_square_attacked(&game, sq(&game, "h4"), Color::Dark));
        assert!(!is_king_in_check(&game, Color::Light));
    }

    #[test]
    fn threats_include_empty_pawn_diagonals_but_not_pushes() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1").expect("FEN should parse");
        let mut threats = Vec::new();
        generate_threats(&game, Color::Light, &mut threats);
        assert!(threats.contains(&sq(&game, "d3")));
        assert!(threats.contains(&sq(&game, "f3")));
        assert!(!threats.contains(&sq(&game, "e3")));
        assert!(!threats.contains(&sq(&game, "e4")));
    }

    #[test]
    fn transit_runs_from_king_to_landing_square() {
        let size = BoardSize::CLASSICAL;
        let mv = Move::new(4, 0, PieceKind::King, Color::Light)
            .with_kind(MoveKind::Castle { king_to: 2, rook_to: 3 });
        assert_eq!(castle_transit(size, &mv), vec![2, 3, 4]);
    }
}
