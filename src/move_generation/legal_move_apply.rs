//! In-place make/unmake.
//!
//! `apply_move` validates every occupancy precondition before touching the
//! board, so a rejected move leaves the state exactly as it was. `undo_move`
//! reverses the history tail, restoring captured pieces and virgin flags.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};

/// Move of the piece on `from`, stamped with the clock and virgin flag the
/// board currently holds.
#[inline]
pub fn build_move(state: &GameState, from: Square, to: Square, piece: Piece, side: Color) -> Move {
    let mut mv = Move::new(from, to, piece.kind, side);
    mv.halfmove_clock = state.halfmove_clock;
    mv.first_move = !piece.has_moved;
    mv
}

pub fn apply_move(state: &mut GameState, mv: Move) -> ChessResult<()> {
    let size = state.size();
    let mover = mv.side;
    let enemy = mover.opposite();

    for square in [mv.from, mv.to] {
        if !size.contains(square) {
            return Err(ChessError::conflict(square, "square is off the board"));
        }
    }

    let moving = state
        .piece_for(mover, mv.from)
        .ok_or_else(|| ChessError::conflict(mv.from, "no piece of the moving side on source"))?;
    if moving.kind != mv.piece {
        return Err(ChessError::conflict(mv.from, "source holds a different piece kind"));
    }

    let mut record = mv;
    record.halfmove_clock = state.halfmove_clock;
    record.first_move = !moving.has_moved;

    match mv.kind {
        MoveKind::Castle { king_to, rook_to } => {
            if moving.kind != PieceKind::King {
                return Err(ChessError::conflict(mv.from, "only a king can castle"));
            }
            let rook = state
                .piece_for(mover, mv.to)
                .filter(|piece| piece.kind == PieceKind::Rook)
                .ok_or_else(|| ChessError::conflict(mv.to, "castle target holds no own rook"))?;
            if king_to == rook_to {
                return Err(ChessError::conflict(king_to, "king and rook land on one square"));
            }
            for landing in [king_to, rook_to] {
                if !size.contains(landing) {
                    return Err(ChessError::conflict(landing, "castle landing is off the board"));
                }
                if landing != mv.from && landing != mv.to && state.is_occupied(landing) {
                    return Err(ChessError::conflict(landing, "castle landing square occupied"));
                }
            }

            record.captured = None;
            record.captured_virgin = !rook.has_moved;

            state.put(mover, mv.from, None);
            state.put(mover, mv.to, None);
            state.put(mover, king_to, Some(Piece::new(PieceKind::King, true)));
            state.put(mover, rook_to, Some(Piece::new(PieceKind::Rook, true)));
        }
        MoveKind::Normal | MoveKind::EnPassant => {
            let capture_square = mv.capture_square(size);

            if state.piece_for(mover, mv.to).is_some() {
                return Err(ChessError::conflict(mv.to, "target occupied by own piece"));
            }

            match mv.captured {
                Some(captured) => {
                    let victim = state.piece_for(enemy, capture_square).ok_or_else(|| {
                        ChessError::conflict(capture_square, "captured piece is missing")
                    })?;
                    if victim.kind != captured {
                        return Err(ChessError::conflict(
                            capture_square,
                            "captured piece kind does not match",
                        ));
                    }
                    if capture_square != mv.to && state.is_occupied(mv.to) {
                        return Err(ChessError::conflict(mv.to, "en-passant landing occupied"));
                    }
                    record.captured_virgin = !victim.has_moved;
                    state.put(enemy, capture_square, None);
                }
                None => {
                    if state.is_occupied(mv.to) {
                        return Err(ChessError::conflict(mv.to, "quiet move onto occupied square"));
                    }
                    record.captured_virgin = false;
                }
            }

            state.put(mover, mv.from, None);
            state.put(mover, mv.to, Some(Piece::new(mv.landed_kind(), true)));
        }
    }

    state.halfmove_clock = if mv.piece == PieceKind::Pawn || mv.captured.is_some() {
        0
    } else {
        state.halfmove_clock.saturating_add(1)
    };
    if mover == Color::Dark {
        state.fullmove_number = state.fullmove_number.saturating_add(1);
    }
    state.side_to_move = enemy;
    state.history.push(record);

    Ok(())
}

pub fn undo_move(state: &mut GameState) -> ChessResult<Move> {
    let mv = *state.history.last().ok_or(ChessError::NoHistory)?;
    let size = state.size();
    let mover = mv.side;
    let enemy = mover.opposite();

    match mv.kind {
        MoveKind::Castle { king_to, rook_to } => {
            let king = state.piece_for(mover, king_to);
            let rook = state.piece_for(mover, rook_to);
            if king.map(|piece| piece.kind) != Some(PieceKind::King) {
                return Err(ChessError::conflict(king_to, "castled king is missing"));
            }
            if rook.map(|piece| piece.kind) != Some(PieceKind::Rook) {
                return Err(ChessError::conflict(rook_to, "castled rook is missing"));
            }
            for origin in [mv.from, mv.to] {
                if origin != king_to && origin != rook_to && state.is_occupied(origin) {
                    return Err(ChessError::conflict(origin, "castle origin square occupied"));
                }
            }

            state.put(mover, king_to, None);
            state.put(mover, rook_to, None);
            state.put(mover, mv.from, Some(Piece::new(PieceKind::King, !mv.first_move)));
            state.put(mover, mv.to, Some(Piece::new(PieceKind::Rook, !mv.captured_virgin)));
        }
        MoveKind::Normal | MoveKind::EnPassant => {
            let landed = state
                .piece_for(mover, mv.to)
                .ok_or_else(|| ChessError::conflict(mv.to, "moved piece is missing"))?;
            if landed.kind != mv.landed_kind() {
                return Err(ChessError::conflict(mv.to, "target holds a different piece kind"));
            }
            if state.is_occupied(mv.from) {
                return Err(ChessError::conflict(mv.from, "source square occupied"));
            }
            let capture_square = mv.capture_square(size);
            if mv.captured.is_some() && capture_square != mv.to && state.is_occupied(capture_square)
            {
                return Err(ChessError::conflict(capture_square, "capture square occupied"));
            }

            state.put(mover, mv.to, None);
            state.put(mover, mv.from, Some(Piece::new(mv.piece, !mv.first_move)));
            if let Some(captured) = mv.captured {
                state.put(
                    enemy,
                    capture_square,
                    Some(Piece::new(captured, !mv.captured_virgin)),
                );
            }
        }
    }

    state.history.pop();
    state.halfmove_clock = mv.halfmove_clock;
    if mover == Color::Dark {
        state.fullmove_number = state.fullmove_number.saturating_sub(1);
    }
    state.side_to_move = mover;

    Ok(mv)
}
