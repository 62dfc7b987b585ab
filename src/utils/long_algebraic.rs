//! Coordinate (UCI-style) move strings: source square, target square and a
//! lowercase promotion letter. Castles are written king square then rook
//! square; en passant gets no marker.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{BoardSize, Move};
use crate::move_generation::move_generator::LegalMoveSet;
use crate::utils::algebraic::square_name;

pub fn move_to_uci(mv: &Move, size: BoardSize) -> String {
    let mut out = String::with_capacity(7);
    out.push_str(&square_name(size, mv.from));
    out.push_str(&square_name(size, mv.to));
    if let Some(promotion) = mv.promotion {
        out.push(promotion.letter().to_ascii_lowercase());
    }
    out
}

/// Resolve a coordinate string against the current legal moves.
pub fn uci_to_move(long_algebraic: &str, legal: &LegalMoveSet, size: BoardSize) -> ChessResult<Move> {
    let wanted = long_algebraic.trim();
    legal
        .moves()
        .find(|mv| move_to_uci(mv, size) == wanted)
        .copied()
        .ok_or_else(|| ChessError::IllegalMove(wanted.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;

    fn legal(fen: &str) -> (GameState, LegalMoveSet) {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let set = FastLegalMoveGenerator
            .legal_move_set(&mut game)
            .expect("generation should succeed");
        (game, set)
    }

    #[test]
    fn resolves_plain_and_promotion_moves() {
        let (game, set) = legal(STARTING_POSITION_FEN);
        let mv = uci_to_move("g1f3", &set, game.size()).expect("g1f3 should be legal");
        assert_eq!(mv.piece, PieceKind::Knight);

        let (game, set) = legal("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let mv = uci_to_move("a7a8n", &set, game.size()).expect("a7a8n should be legal");
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(move_to_uci(&mv, game.size()), "a7a8n");
        assert!(uci_to_move("a7a8", &set, game.size()).is_err());
    }

    #[test]
    fn castles_name_the_rook_square() {
        let (game, set) = legal("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let high = set.get(">").expect("high castle should be legal");
        assert_eq!(move_to_uci(high, game.size()), "e1h1");
        let mv = uci_to_move("e1a1", &set, game.size()).expect("low castle should resolve");
        assert!(mv.is_castle());
    }

    #[test]
    fn two_digit_ranks() {
        let size = BoardSize { files: 8, ranks: 12 };
        let from = size.square(4, 9).expect("e10");
        let to = size.square(4, 11).expect("e12");
        let mv = Move::new(from, to, PieceKind::Pawn, Color::Light).with_promotion(PieceKind::Queen);
        assert_eq!(move_to_uci(&mv, size), "e10e12q");
    }

    #[test]
    fn unknown_move_is_illegal() {
        let (game, set) = legal(STARTING_POSITION_FEN);
        assert_eq!(
            uci_to_move("e2e5", &set, game.size()),
            Err(ChessError::IllegalMove("e2e5".to_owned()))
        );
    }
}
