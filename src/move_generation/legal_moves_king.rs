//! King steps and castle candidates.
//!
//! Castling looks outward from a virgin king for the nearest piece on its
//! rank; it must be a virgin rook of the same side. Landing files come from
//! the state's `CastlingFiles`, so non-standard starting files and wide
//! boards are handled uniformly. Whether the king passes through an attacked
//! square is decided later by the legality filter.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::move_generation::legal_move_shared::push_step_moves;
use crate::moves::piece_offsets::KING_OFFSETS;

pub fn generate_king_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    push_step_moves(game_state, side, PieceKind::King, &KING_OFFSETS, out);
    generate_castling_moves(game_state, side, out);
}

fn generate_castling_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    let Some(king_from) = game_state.king_square(side) else {
        return;
    };
    let Some(king) = game_state.piece_for(side, king_from) else {
        return;
    };
    if king.has_moved {
        return;
    }

    for wing in CastleWing::BOTH {
        if let Some(mv) = castle_candidate(game_state, side, king_from, king, wing) {
            out.push(mv);
        }
    }
}

fn castle_candidate(
    game_state: &GameState,
    side: Color,
    king_from: Square,
    king: Piece,
    wing: CastleWing,
) -> Option<Move> {
    let size = game_state.size();

    let mut cursor = king_from;
    let rook_from = loop {
        cursor = size.offset(cursor, wing.file_step(), 0)?;
        if game_state.is_occupied(cursor) {
            break cursor;
        }
    };
    game_state
        .piece_for(side, rook_from)
        .filter(|piece| piece.kind == PieceKind::Rook && !piece.has_moved)?;

    let rank = i16::from(size.rank_of(king_from));
    let king_file = game_state.castling_files.king_file(side, wing);
    let rook_file = game_state.castling_files.rook_file(side, wing);
    let king_to = size.square(i16::from(king_file), rank)?;
    let rook_to = size.square(i16::from(rook_file), rank)?;
    if king_to == rook_to {
        return None;
    }

    let files = [
        size.file_of(king_from),
        size.file_of(rook_from),
        king_file,
        rook_file,
    ];
    let low = files.iter().copied().min()?;
    let high = files.iter().copied().max()?;
    for file in low..=high {
        let square = size.square(i16::from(file), rank)?;
        if square != king_from && square != rook_from && game_state.is_occupied(square) {
            return None;
        }
    }

    let mut mv = build_move(game_state, king_from, rook_from, king, side)
        .with_kind(MoveKind::Castle { king_to, rook_to });
    mv.captured_virgin = true;
    Some(mv)
}
