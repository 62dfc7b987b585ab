//! Caller-facing game facade.
//!
//! Owns one `GameState`, the legality strategy and the current legal move
//! set, which is recomputed after every successful play, undo or reset. Front
//! ends select moves by their algebraic key or coordinate string.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::{LegalMoveSet, MoveGenerator};
use crate::move_generation::perft::{perft, PerftCounts};
use crate::search::board_scoring::MaterialScorer;
use crate::search::negamax::{negamax_search, SearchConfig, SearchControl, SearchResult};
use crate::utils::long_algebraic::{move_to_uci, uci_to_move};

pub struct GameSession {
    game_state: GameState,
    move_generator: Box<dyn MoveGenerator>,
    legal_moves: LegalMoveSet,
}

impl GameSession {
    pub fn new() -> ChessResult<Self> {
        Self::with_state(GameState::new_game()?)
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::with_state(GameState::from_fen(fen)?)
    }

    pub fn from_placement(placement: &str, side_to_move: Color) -> ChessResult<Self> {
        Self::with_state(GameState::from_placement(placement, side_to_move)?)
    }

    pub fn with_state(game_state: GameState) -> ChessResult<Self> {
        let mut session = Self {
            game_state,
            move_generator: Box::new(FastLegalMoveGenerator),
            legal_moves: LegalMoveSet::default(),
        };
        session.refresh()?;
        Ok(session)
    }

    /// Swap the legality strategy.
    pub fn with_generator(mut self, generator: impl MoveGenerator + 'static) -> ChessResult<Self> {
        self.move_generator = Box::new(generator);
        self.refresh()?;
        Ok(self)
    }

    /// Replace the position. A malformed FEN leaves the session as it was.
    pub fn reset(&mut self, fen: &str) -> ChessResult<()> {
        let mut game_state = GameState::from_fen(fen)?;
        let legal_moves = self.move_generator.legal_move_set(&mut game_state)?;
        self.game_state = game_state;
        self.legal_moves = legal_moves;
        Ok(())
    }

    pub fn set_castling_files(&mut self, castling_files: CastlingFiles) -> ChessResult<()> {
        self.game_state.castling_files = castling_files;
        self.refresh()
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[inline]
    pub fn legal_moves(&self) -> &LegalMoveSet {
        &self.legal_moves
    }

    pub fn legal_move_strings(&self) -> Vec<String> {
        self.legal_moves.keys().map(str::to_owned).collect()
    }

    /// Play the legal move keyed by `algebraic` (for example `Nf3`, `exd6`, `>`).
    pub fn play(&mut self, algebraic: &str) -> ChessResult<Move> {
        let mv = *self
            .legal_moves
            .get(algebraic)
            .ok_or_else(|| ChessError::IllegalMove(algebraic.to_owned()))?;
        self.commit(mv)
    }

    /// Play a coordinate move such as `e2e4` or `a7a8q`.
    pub fn play_uci(&mut self, long_algebraic: &str) -> ChessResult<Move> {
        let mv = uci_to_move(long_algebraic, &self.legal_moves, self.game_state.size())?;
        self.commit(mv)
    }

    pub fn undo(&mut self) -> ChessResult<Move> {
        let mv = self.game_state.undo()?;
        self.refresh()?;
        Ok(mv)
    }

    /// Occupant of a square by zero-based file and rank.
    pub fn piece_at(&self, file: u8, rank: u8) -> Option<(Color, PieceKind)> {
        let square = self.game_state.square(i16::from(file), i16::from(rank))?;
        self.game_state
            .piece_at(square)
            .map(|(color, piece)| (color, piece.kind))
    }

    pub fn side_to_move(&self) -> Color {
        self.game_state.side_to_move
    }

    pub fn to_fen(&self) -> String {
        self.game_state.get_fen()
    }

    pub fn move_list_uci(&self) -> Vec<String> {
        let size = self.game_state.size();
        self.game_state
            .history()
            .iter()
            .map(|mv| move_to_uci(mv, size))
            .collect()
    }

    pub fn last_move_uci(&self) -> Option<String> {
        self.game_state
            .history()
            .last()
            .map(|mv| move_to_uci(mv, self.game_state.size()))
    }

    pub fn is_in_check(&self) -> bool {
        self.move_generator
            .king_capturable(&self.game_state, self.game_state.side_to_move)
    }

    pub fn perft(&mut self, depth: u8) -> ChessResult<PerftCounts> {
        perft(self.move_generator.as_ref(), &mut self.game_state, depth)
    }

    pub fn best_move(&mut self, depth: u8) -> ChessResult<SearchResult> {
        self.best_move_with_control(depth, &SearchControl::new())
    }

    pub fn best_move_with_control(
        &mut self,
        depth: u8,
        control: &SearchControl,
    ) -> ChessResult<SearchResult> {
        negamax_search(
            &mut self.game_state,
            self.move_generator.as_ref(),
            &MaterialScorer,
            SearchConfig { max_depth: depth },
            control,
        )
    }

    /// Uniformly random legal move, `None` when the side to move has none.
    pub fn random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Move> {
        let moves: Vec<Move> = self.legal_moves.moves().copied().collect();
        moves.as_slice().choose(rng).copied()
    }

    fn commit(&mut self, mv: Move) -> ChessResult<Move> {
        self.game_state.apply(mv)?;
        self.refresh()?;
        Ok(mv)
    }

    fn refresh(&mut self) -> ChessResult<()> {
        self.legal_moves = self.move_generator.legal_move_set(&mut self.game_state)?;
        Ok(())
    }
}
