//! Exhaustive node counting over make/unmake.
//!
//! Every pseudo-legal move is applied in place and undone again, including
//! when the move turns out to be illegal or a deeper call fails. Leaf
//! statistics describe the move that reached the leaf.

use std::collections::BTreeMap;

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{generate_pseudo_legal_moves, MoveGenerator};
use crate::utils::long_algebraic::move_to_uci;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }

    fn tally(&mut self, mv: &Move, gives_check: bool) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.is_en_passant() {
            self.en_passant += 1;
        }
        if mv.is_castle() {
            self.castles += 1;
        }
        if mv.promotion.is_some() {
            self.promotions += 1;
        }
        if gives_check {
            self.checks += 1;
        }
    }
}

pub fn perft<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }

    perft_recurse(generator, game_state, depth, &mut counts)?;
    Ok(counts)
}

/// Node counts below each legal root move, keyed by coordinate string.
pub fn perft_divide<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> ChessResult<BTreeMap<String, PerftCounts>> {
    let mut divided = BTreeMap::new();
    if depth == 0 {
        return Ok(divided);
    }

    let size = game_state.size();
    for mv in generator.generate_legal_moves(game_state)? {
        let mut counts = PerftCounts::default();
        game_state.apply(mv)?;
        let outcome = if depth == 1 {
            let gives_check = generator.king_capturable(game_state, game_state.side_to_move);
            counts.tally(&mv, gives_check);
            Ok(())
        } else {
            perft_recurse(generator, game_state, depth - 1, &mut counts)
        };
        game_state.undo()?;
        outcome?;
        divided.insert(move_to_uci(&mv, size), counts);
    }

    Ok(divided)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    let mut pseudo = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, &mut pseudo);

    for mv in pseudo {
        if mv.is_castle() && generator.castle_path_attacked(game_state, &mv) {
            continue;
        }

        game_state.apply(mv)?;
        let outcome = visit_child(generator, game_state, &mv, depth, counts);
        game_state.undo()?;
        outcome?;
    }

    Ok(())
}

fn visit_child<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    mv: &Move,
    depth: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    if generator.king_capturable(game_state, mv.side) {
        return Ok(());
    }

    if depth == 1 {
        let gives_check = generator.king_capturable(game_state, game_state.side_to_move);
        counts.tally(mv, gives_check);
        return Ok(());
    }

    let mut below = PerftCounts::default();
    perft_recurse(generator, game_state, depth - 1, &mut below)?;
    counts.merge(below);
    Ok(())
}
