//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal candidates, applies each one in place, asks the
//! generator whether the mover's king could now be taken, and undoes the
//! candidate before looking at the next. Castles additionally need a safe
//! transit path in the position before the move.

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{
    castle_transit, generate_threats, is_square_attacked,
};
use crate::move_generation::move_generator::{
    generate_pseudo_legal_moves, generate_pseudo_legal_moves_for, LegalMoveSet, MoveGenerator,
};
use crate::utils::san::disambiguate;

/// Literal rule: a move is illegal if any opponent reply captures the king.
pub struct LegalMoveGenerator;
/// Same answers through a reverse attack probe from the king square.
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn king_capturable(&self, game_state: &GameState, king_side: Color) -> bool {
        let mut replies = Vec::with_capacity(64);
        generate_pseudo_legal_moves_for(game_state, king_side.opposite(), &mut replies);
        replies
            .iter()
            .any(|reply| reply.captured == Some(PieceKind::King))
    }

    fn castle_path_attacked(&self, game_state: &GameState, castle: &Move) -> bool {
        let mut threats = Vec::with_capacity(64);
        generate_threats(game_state, castle.side.opposite(), &mut threats);
        castle_transit(game_state.size(), castle)
            .iter()
            .any(|square| threats.contains(square))
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn king_capturable(&self, game_state: &GameState, king_side: Color) -> bool {
        game_state
            .king_square(king_side)
            .is_some_and(|king| is_square_attacked(game_state, king, king_side.opposite()))
    }

    fn castle_path_attacked(&self, game_state: &GameState, castle: &Move) -> bool {
        let attacker = castle.side.opposite();
        castle_transit(game_state.size(), castle)
            .into_iter()
            .any(|square| is_square_attacked(game_state, square, attacker))
    }
}

/// Apply `mv`, test the mover's king, undo. The state is restored on every
/// path that returns `Ok`.
pub fn is_legal_move<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    mv: Move,
) -> ChessResult<bool> {
    if mv.is_castle() && generator.castle_path_attacked(game_state, &mv) {
        return Ok(false);
    }
    game_state.apply(mv)?;
    let exposed = generator.king_capturable(game_state, mv.side);
    game_state.undo()?;
    Ok(!exposed)
}

pub fn filter_legal_moves<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
) -> ChessResult<Vec<Move>> {
    let mut pseudo = Vec::with_capacity(128);
    generate_pseudo_legal_moves(game_state, &mut pseudo);

    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        if is_legal_move(generator, game_state, mv)? {
            legal.push(mv);
        }
    }
    Ok(legal)
}

pub fn build_legal_move_set<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
) -> ChessResult<LegalMoveSet> {
    let legal = filter_legal_moves(generator, game_state)?;
    Ok(LegalMoveSet::from_map(disambiguate(&legal, game_state.size())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{STARTING_POSITION_FEN, WIDE_BOARD_FEN};

    const POSITIONS: [&str; 6] = [
        STARTING_POSITION_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        WIDE_BOARD_FEN,
    ];

    fn legal_set(fen: &str) -> LegalMoveSet {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        FastLegalMoveGenerator
            .legal_move_set(&mut game)
            .expect("legal move generation should succeed")
    }

    fn play(game: &mut GameState, algebraic: &str) {
        let set = FastLegalMoveGenerator
            .legal_move_set(game)
            .expect("legal move generation should succeed");
        let mv = *set
            .get(algebraic)
            .unwrap_or_else(|| panic!("{algebraic} should be legal"));
        game.apply(mv).expect("legal move should apply");
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let mut game = GameState::new_game().expect("start position should parse");
        for generator in [&LegalMoveGenerator as &dyn MoveGenerator, &FastLegalMoveGenerator] {
            let set = generator
                .legal_move_set(&mut game)
                .expect("legal move generation should succeed");
            assert_eq!(set.len(), 20);
        }
    }

    #[test]
    fn both_generators_agree() {
        for fen in POSITIONS {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let literal = LegalMoveGenerator
                .legal_move_set(&mut game)
                .expect("literal generation should succeed");
            let fast = FastLegalMoveGenerator
                .legal_move_set(&mut game)
                .expect("fast generation should succeed");
            assert_eq!(literal, fast, "generators disagree on {fen}");
        }
    }

    #[test]
    fn generation_leaves_state_untouched() {
        let mut game = GameState::from_fen(POSITIONS[1]).expect("FEN should parse");
        let before = game.clone();
        let _ = LegalMoveGenerator
            .generate_legal_moves(&mut game)
            .expect("generation should succeed");
        assert_eq!(game, before);
    }

    #[test]
    fn every_legal_move_keeps_the_king_safe() {
        for fen in POSITIONS {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let moves = FastLegalMoveGenerator
                .generate_legal_moves(&mut game)
                .expect("generation should succeed");
            let set = legal_set(fen);
            assert_eq!(set.len(), moves.len(), "duplicate keys in {fen}");

            for mv in moves {
                game.apply(mv).expect("legal move should apply");
                let mut replies = Vec::new();
                generate_pseudo_legal_moves(&game, &mut replies);
                assert!(
                    replies.iter().all(|reply| reply.captured != Some(PieceKind::King)),
                    "king left en prise after {mv:?} in {fen}"
                );
                game.undo().expect("undo should succeed");
            }
        }
    }

    #[test]
    fn en_passant_after_adjacent_double_push() {
        let mut game = GameState::new_game().expect("start position should parse");
        for algebraic in ["e4", "a6", "e5", "d5"] {
            play(&mut game, algebraic);
        }

        let set = FastLegalMoveGenerator
            .legal_move_set(&mut game)
            .expect("legal move generation should succeed");
        let en_passant: Vec<_> = set.iter().filter(|(_, mv)| mv.is_en_passant()).collect();
        assert_eq!(en_passant.len(), 1);
        let (key, mv) = en_passant[0];
        assert_eq!(key, "exd6");
        assert_eq!(game.size().file_of(mv.to), 3);
        assert_eq!(game.size().rank_of(mv.to), 5);

        play(&mut game, "exd6");
        let d5 = game.square(3, 4).expect("d5");
        assert!(!game.is_occupied(d5));
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut game = GameState::new_game().expect("start position should parse");
        for algebraic in ["e4", "a6", "e5", "d5", "Nf3", "h6"] {
            play(&mut game, algebraic);
        }
        let set = FastLegalMoveGenerator
            .legal_move_set(&mut game)
            .expect("legal move generation should succeed");
        assert!(set.moves().all(|mv| !mv.is_en_passant()));
    }

    #[test]
    fn castling_blocked_by_piece_between_king_and_rook() {
        let set = legal_set("r3k2r/8/8/8/8/8/8/R2QK1NR w KQkq - 0 1");
        assert!(!set.contains(">"));
        assert!(!set.contains("<"));
    }

    #[test]
    fn castling_refused_through_attacked_transit() {
        // f1 is covered by the rook on f8; e1 itself is not attacked.
        let set = legal_set("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!set.contains(">"));
        assert!(set.contains("<"));

        let mut game = GameState::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1")
            .expect("FEN should parse");
        let e1 = game.king_square(Color::Light).expect("king on e1");
        assert!(!is_square_attacked(&game, e1, Color::Dark));
        let literal = LegalMoveGenerator
            .legal_move_set(&mut game)
            .expect("legal move generation should succeed");
        assert!(!literal.contains(">"));
    }

    #[test]
    fn castling_refused_when_pawn_eyes_transit() {
        // Pawn on e2 guards d1 and f1 diagonally even though both are empty.
        let set = legal_set("4k3/8/8/8/8/8/4p3/R3K2R w KQ - 0 1");
        assert!(!set.contains(">"));
        assert!(!set.contains("<"));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let set = legal_set("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(set.moves().all(|mv| mv.piece != PieceKind::Knight));
    }

    #[test]
    fn wide_board_castles_onto_configured_files() {
        let mut game = GameState::from_fen("r4k3r/10/10/10/10/10/10/R4K3R w KQkq - 0 1")
            .expect("FEN should parse")
            .with_castling_files(CastlingFiles::symmetric(1, 2, 8, 7));
        let set = LegalMoveGenerator
            .legal_move_set(&mut game)
            .expect("legal move generation should succeed");
        let high = *set.get(">").expect("high castle should be legal");
        game.apply(high).expect("castle should apply");
        let size = game.size();
        assert_eq!(
            game.piece_for(Color::Light, size.square(8, 0).expect("i1")),
            Some(Piece::new(PieceKind::King, true))
        );
        assert_eq!(
            game.piece_for(Color::Light, size.square(7, 0).expect("h1")),
            Some(Piece::new(PieceKind::Rook, true))
        );
    }
}
