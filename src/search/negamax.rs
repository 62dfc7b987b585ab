//! Fixed-depth negamax over make/unmake.
//!
//! No pruning or move ordering: every legal move is searched to the
//! configured depth, which keeps the node count a pure function of the
//! position. Positions without legal moves score as mate or stalemate.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub nodes: u64,
}

/// Cooperative stop flag shared between a search and its caller.
#[derive(Debug, Default)]
pub struct SearchControl {
    stop: AtomicBool,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.stop.store(false, Ordering::Relaxed);
    }
}

pub fn negamax_search<G: MoveGenerator + ?Sized, S: BoardScorer + ?Sized>(
    game_state: &mut GameState,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
    control: &SearchControl,
) -> ChessResult<SearchResult> {
    if control.should_stop() {
        return Err(ChessError::SearchStopped);
    }

    if config.max_depth == 0 {
        return Ok(SearchResult {
            best_move: None,
            best_score: scorer.score(game_state),
            nodes: 1,
        });
    }

    let mut nodes = 1u64;
    let moves = generator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        return Ok(SearchResult {
            best_move: None,
            best_score: terminal_score(generator, game_state, 0),
            nodes,
        });
    }

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for mv in moves {
        game_state.apply(mv)?;
        let outcome = negamax(
            game_state,
            generator,
            scorer,
            config.max_depth - 1,
            1,
            control,
            &mut nodes,
        );
        game_state.undo()?;
        let score = -outcome?;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    Ok(SearchResult {
        best_move,
        best_score,
        nodes,
    })
}

fn negamax<G: MoveGenerator + ?Sized, S: BoardScorer + ?Sized>(
    game_state: &mut GameState,
    generator: &G,
    scorer: &S,
    depth: u8,
    ply: u8,
    control: &SearchControl,
    nodes: &mut u64,
) -> ChessResult<i32> {
    if control.should_stop() {
        return Err(ChessError::SearchStopped);
    }
    *nodes += 1;

    // Terminal positions must dominate material even at the horizon.
    let moves = generator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        return Ok(terminal_score(generator, game_state, ply));
    }
    if depth == 0 {
        return Ok(scorer.score(game_state));
    }

    let mut best = i32::MIN;
    for mv in moves {
        game_state.apply(mv)?;
        let outcome = negamax(
            game_state,
            generator,
            scorer,
            depth - 1,
            ply.saturating_add(1),
            control,
            nodes,
        );
        game_state.undo()?;
        best = best.max(-outcome?);
    }

    Ok(best)
}

fn terminal_score<G: MoveGenerator + ?Sized>(generator: &G, game_state: &GameState, ply: u8) -> i32 {
    if generator.king_capturable(game_state, game_state.side_to_move) {
        -MATE_SCORE + i32::from(ply)
    } else {
        0
    }
}
