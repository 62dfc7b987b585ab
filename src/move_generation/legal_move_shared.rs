//! Helpers shared by the per-piece pseudo-legal generators.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;

#[inline]
pub fn enemy_piece_on(game_state: &GameState, side: Color, square: Square) -> Option<Piece> {
    game_state.piece_for(side.opposite(), square)
}

/// Own pieces of one kind, ascending by square.
pub fn pieces_of_kind(
    game_state: &GameState,
    side: Color,
    kind: PieceKind,
) -> impl Iterator<Item = (Square, Piece)> + '_ {
    game_state
        .pieces(side)
        .filter(move |(_, piece)| piece.kind == kind)
}

/// Quiet move or capture onto `to`; `None` when `to` holds an own piece.
#[inline]
pub fn step_move(
    game_state: &GameState,
    side: Color,
    from: Square,
    piece: Piece,
    to: Square,
) -> Option<Move> {
    if game_state.piece_for(side, to).is_some() {
        return None;
    }
    let mv = build_move(game_state, from, to, piece, side);
    Some(match enemy_piece_on(game_state, side, to) {
        Some(victim) => mv.with_capture(victim.kind, !victim.has_moved),
        None => mv,
    })
}

/// Fixed-offset movers (knight, king).
pub fn push_step_moves(
    game_state: &GameState,
    side: Color,
    kind: PieceKind,
    offsets: &[(i16, i16)],
    out: &mut Vec<Move>,
) {
    let size = game_state.size();
    for (from, piece) in pieces_of_kind(game_state, side, kind) {
        for &(d_file, d_rank) in offsets {
            let Some(to) = size.offset(from, d_file, d_rank) else {
                continue;
            };
            if let Some(mv) = step_move(game_state, side, from, piece, to) {
                out.push(mv);
            }
        }
    }
}

/// Ray sliders (bishop, rook, queen). Each ray stops at the first occupied
/// square, which is emitted only when it holds an enemy piece.
pub fn push_slider_moves(
    game_state: &GameState,
    side: Color,
    kind: PieceKind,
    directions: &[(i16, i16)],
    out: &mut Vec<Move>,
) {
    let size = game_state.size();
    for (from, piece) in pieces_of_kind(game_state, side, kind) {
        for &(d_file, d_rank) in directions {
            let mut cursor = from;
            while let Some(to) = size.offset(cursor, d_file, d_rank) {
                if let Some(mv) = step_move(game_state, side, from, piece, to) {
                    out.push(mv);
                }
                if game_state.is_occupied(to) {
                    break;
                }
                cursor = to;
            }
        }
    }
}
