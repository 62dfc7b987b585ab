//! Pawn move generation.
//!
//! Pushes, virgin double pushes, diagonal captures, en passant against the
//! immediately preceding double push, and promotion expansion on the last
//! rank.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::move_generation::legal_move_shared::{enemy_piece_on, pieces_of_kind};
use crate::moves::piece_offsets::PAWN_CAPTURE_FILES;

pub fn generate_pawn_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    let size = game_state.size();
    let forward = side.forward();
    let promotion_rank = size.promotion_rank(side);

    let double_push = game_state
        .last_move()
        .copied()
        .filter(|mv| mv.side != side && mv.is_double_push(size));

    for (from, pawn) in pieces_of_kind(game_state, side, PieceKind::Pawn) {
        if let Some(one_step) = size.offset(from, 0, forward) {
            if !game_state.is_occupied(one_step) {
                push_pawn_move(
                    size,
                    promotion_rank,
                    build_move(game_state, from, one_step, pawn, side),
                    out,
                );

                if !pawn.has_moved {
                    if let Some(two_step) = size.offset(one_step, 0, forward) {
                        if !game_state.is_occupied(two_step) {
                            push_pawn_move(
                                size,
                                promotion_rank,
                                build_move(game_state, from, two_step, pawn, side),
                                out,
                            );
                        }
                    }
                }
            }
        }

        for d_file in PAWN_CAPTURE_FILES {
            let Some(to) = size.offset(from, d_file, forward) else {
                continue;
            };

            if let Some(victim) = enemy_piece_on(game_state, side, to) {
                let mv = build_move(game_state, from, to, pawn, side)
                    .with_capture(victim.kind, !victim.has_moved);
                push_pawn_move(size, promotion_rank, mv, out);
                continue;
            }

            let Some(pushed) = double_push else {
                continue;
            };
            let beside = size.offset(from, d_file, 0);
            let pushed_pawn = enemy_piece_on(game_state, side, pushed.to)
                .filter(|piece| piece.kind == PieceKind::Pawn);
            if beside == Some(pushed.to) && !game_state.is_occupied(to) {
                if let Some(victim) = pushed_pawn {
                    out.push(
                        build_move(game_state, from, to, pawn, side)
                            .with_capture(PieceKind::Pawn, !victim.has_moved)
                            .with_kind(MoveKind::EnPassant),
                    );
                }
            }
        }
    }
}

/// Push `mv`, expanded into the four promotion choices on the last rank.
fn push_pawn_move(size: BoardSize, promotion_rank: u8, mv: Move, out: &mut Vec<Move>) {
    if size.rank_of(mv.to) == promotion_rank {
        for promotion in PieceKind::PROMOTIONS {
            out.push(mv.with_promotion(promotion));
        }
    } else {
        out.push(mv);
    }
}
