//! Core incremental board state representation.
//!
//! `GameState` owns per-side occupancy mailboxes, turn and clock fields, the
//! castling landing-file configuration and the history stack used by
//! make/unmake workflows. All mutation goes through `apply` / `undo`.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{parse_fen, parse_placement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) size: BoardSize,

    // [color][square]
    pub(crate) occupancy: [Vec<Option<Piece>>; 2],

    pub side_to_move: Color,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub castling_files: CastlingFiles,

    // Make/unmake stack, oldest first.
    pub(crate) history: Vec<Move>,

    // Double push implied by a decoded en-passant field; stands in for the
    // previous move until the first applied move.
    pub(crate) en_passant_seed: Option<Move>,
}

impl GameState {
    /// Board with no pieces, Light to move.
    pub fn new_empty(size: BoardSize) -> Self {
        let squares = size.square_count();
        Self {
            size,
            occupancy: [vec![None; squares], vec![None; squares]],
            side_to_move: Color::Light,
            halfmove_clock: 0,
            fullmove_number: 1,
            castling_files: CastlingFiles::for_board(size.files),
            history: Vec::new(),
            en_passant_seed: None,
        }
    }

    #[inline]
    pub fn new_game() -> ChessResult<Self> {
        parse_fen(STARTING_POSITION_FEN)
    }

    /// Placement field plus side to move; virgin flags follow the pieces'
    /// home ranks.
    #[inline]
    pub fn from_placement(placement: &str, side_to_move: Color) -> ChessResult<Self> {
        let mut state = parse_placement(placement)?;
        state.side_to_move = side_to_move;
        Ok(state)
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Replace the castling landing files.
    pub fn with_castling_files(mut self, castling_files: CastlingFiles) -> Self {
        self.castling_files = castling_files;
        self
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[inline]
    pub fn square(&self, file: i16, rank: i16) -> Option<Square> {
        self.size.square(file, rank)
    }

    #[inline]
    pub fn file_of(&self, square: Square) -> u8 {
        self.size.file_of(square)
    }

    #[inline]
    pub fn rank_of(&self, square: Square) -> u8 {
        self.size.rank_of(square)
    }

    #[inline]
    pub fn piece_for(&self, color: Color, square: Square) -> Option<Piece> {
        self.occupancy[color.index()]
            .get(usize::from(square))
            .copied()
            .flatten()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Color, Piece)> {
        Color::BOTH
            .into_iter()
            .find_map(|color| self.piece_for(color, square).map(|piece| (color, piece)))
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Squares and pieces of one side, ascending by square.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupancy[color.index()]
            .iter()
            .copied()
            .enumerate()
            .filter_map(|(sq, slot)| slot.map(|piece| (sq as Square, piece)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Most recent move, or the double push implied by a decoded en-passant
    /// field when nothing has been played yet.
    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().or(self.en_passant_seed.as_ref())
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn apply(&mut self, mv: Move) -> ChessResult<()> {
        apply_move(self, mv)
    }

    #[inline]
    pub fn undo(&mut self) -> ChessResult<Move> {
        undo_move(self)
    }

    // Raw slot writes for the parser and apply/undo; callers validate first.
    #[inline]
    pub(crate) fn put(&mut self, color: Color, square: Square, piece: Option<Piece>) {
        self.occupancy[color.index()][usize::from(square)] = piece;
    }
}
