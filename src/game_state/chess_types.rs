//! Core value types shared by the board model, generators and notation.
//!
//! Boards are rectangular with at most 26 files and 16 ranks, so squares are
//! plain indices `rank * files + file` rather than bitboard positions.

pub use crate::game_state::game_state::GameState;
pub use crate::moves::move_descriptions::{Move, MoveKind};

/// Largest supported file count (single-letter file names `a..=z`).
pub const MAX_FILES: usize = 26;
/// Largest supported rank count.
pub const MAX_RANKS: usize = 16;

/// Board square index (`0..files * ranks`).
pub type Square = u16;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank step a pawn of this color advances by.
    #[inline]
    pub const fn forward(self) -> i16 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind. Color and move history are carried separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Promotion choices in the order candidates are emitted.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Uppercase letter used in placement text and algebraic notation.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Kinds whose first move unlocks or removes a special rule.
    #[inline]
    pub const fn tracks_first_move(self) -> bool {
        matches!(self, PieceKind::Pawn | PieceKind::Rook | PieceKind::King)
    }
}

/// A piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, has_moved: bool) -> Self {
        Self { kind, has_moved }
    }

    /// Pawn, rook or king that has not moved yet.
    #[inline]
    pub const fn is_virgin(self) -> bool {
        !self.has_moved && self.kind.tracks_first_move()
    }
}

/// Castling wing, named by the direction the rook lies in from the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleWing {
    /// Toward lower file indices (queenside on a classical board).
    Low,
    /// Toward higher file indices (kingside on a classical board).
    High,
}

impl CastleWing {
    pub const BOTH: [CastleWing; 2] = [CastleWing::High, CastleWing::Low];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastleWing::Low => 0,
            CastleWing::High => 1,
        }
    }

    #[inline]
    pub const fn file_step(self) -> i16 {
        match self {
            CastleWing::Low => -1,
            CastleWing::High => 1,
        }
    }
}

/// Rectangular board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize {
    pub files: u8,
    pub ranks: u8,
}

impl BoardSize {
    pub const CLASSICAL: BoardSize = BoardSize { files: 8, ranks: 8 };

    #[inline]
    pub const fn square_count(self) -> usize {
        self.files as usize * self.ranks as usize
    }

    /// Square index for in-bounds coordinates.
    #[inline]
    pub fn square(self, file: i16, rank: i16) -> Option<Square> {
        if file < 0 || rank < 0 || file >= i16::from(self.files) || rank >= i16::from(self.ranks)
        {
            return None;
        }
        Some(rank as Square * Square::from(self.files) + file as Square)
    }

    #[inline]
    pub fn file_of(self, square: Square) -> u8 {
        (square % Square::from(self.files)) as u8
    }

    #[inline]
    pub fn rank_of(self, square: Square) -> u8 {
        (square / Square::from(self.files)) as u8
    }

    #[inline]
    pub fn contains(self, square: Square) -> bool {
        usize::from(square) < self.square_count()
    }

    /// Step from `square` by a file/rank delta, `None` when leaving the board.
    #[inline]
    pub fn offset(self, square: Square, d_file: i16, d_rank: i16) -> Option<Square> {
        let file = i16::from(self.file_of(square)) + d_file;
        let rank = i16::from(self.rank_of(square)) + d_rank;
        self.square(file, rank)
    }

    /// Rank index where `color`'s king and rooks start.
    #[inline]
    pub fn back_rank(self, color: Color) -> u8 {
        match color {
            Color::Light => 0,
            Color::Dark => self.ranks.saturating_sub(1),
        }
    }

    /// Rank index where `color`'s pawns start and may double-push from.
    #[inline]
    pub fn pawn_home_rank(self, color: Color) -> u8 {
        match color {
            Color::Light => 1.min(self.ranks.saturating_sub(1)),
            Color::Dark => self.ranks.saturating_sub(2),
        }
    }

    /// Rank index a pawn of `color` promotes on.
    #[inline]
    pub fn promotion_rank(self, color: Color) -> u8 {
        self.back_rank(color.opposite())
    }
}

/// Landing files for castling, per color and wing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingFiles {
    /// `[color][wing]` file the king ends on.
    pub king: [[u8; 2]; 2],
    /// `[color][wing]` file the rook ends on.
    pub rook: [[u8; 2]; 2],
}

impl CastlingFiles {
    /// Classical landing files generalized to `files` columns: the High wing
    /// lands on the last-but-one/last-but-two files, the Low wing on c/d.
    pub fn for_board(files: u8) -> Self {
        let high_king = files.saturating_sub(2);
        let high_rook = files.saturating_sub(3);
        let side = [[2, high_king], [3, high_rook]];
        Self {
            king: [side[0], side[0]],
            rook: [side[1], side[1]],
        }
    }

    /// Same landing files for both colors.
    pub fn symmetric(low_king: u8, low_rook: u8, high_king: u8, high_rook: u8) -> Self {
        Self {
            king: [[low_king, high_king]; 2],
            rook: [[low_rook, high_rook]; 2],
        }
    }

    #[inline]
    pub fn king_file(&self, color: Color, wing: CastleWing) -> u8 {
        self.king[color.index()][wing.index()]
    }

    #[inline]
    pub fn rook_file(&self, color: Color, wing: CastleWing) -> u8 {
        self.rook[color.index()][wing.index()]
    }

    pub fn set(&mut self, color: Color, wing: CastleWing, king_file: u8, rook_file: u8) {
        self.king[color.index()][wing.index()] = king_file;
        self.rook[color.index()][wing.index()] = rook_file;
    }
}

impl Default for CastlingFiles {
    fn default() -> Self {
        Self::for_board(BoardSize::CLASSICAL.files)
    }
}
