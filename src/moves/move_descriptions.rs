//! Move records.
//!
//! A `Move` carries everything `undo_move` needs to reverse it: captured
//! kind, prior virgin flags and the half-move clock before the move. The
//! previous move is whatever sits below it on the history stack.

use crate::game_state::chess_types::{BoardSize, Color, PieceKind, Square};

/// Special-move tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    /// King takes the rook's square as target; both land on the configured files.
    Castle { king_to: Square, rook_to: Square },
    EnPassant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
    pub side: Color,
    /// Half-move clock before this move was applied.
    pub halfmove_clock: u16,
    /// Moved piece had not moved before.
    pub first_move: bool,
    /// Captured piece had not moved before. For castles: the rook had not moved.
    pub captured_virgin: bool,
}

impl Move {
    /// Quiet move or capture of the piece standing on `to`.
    #[inline]
    pub fn new(from: Square, to: Square, piece: PieceKind, side: Color) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            kind: MoveKind::Normal,
            side,
            halfmove_clock: 0,
            first_move: false,
            captured_virgin: false,
        }
    }

    #[inline]
    pub fn with_capture(mut self, captured: PieceKind, captured_virgin: bool) -> Self {
        self.captured = Some(captured);
        self.captured_virgin = captured_virgin;
        self
    }

    #[inline]
    pub fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    #[inline]
    pub fn with_kind(mut self, kind: MoveKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    /// Piece kind standing on the target square once the move is made.
    #[inline]
    pub fn landed_kind(&self) -> PieceKind {
        self.promotion.unwrap_or(self.piece)
    }

    /// Square the captured piece is removed from. En passant takes the pawn
    /// beside the source square, on the target's file.
    #[inline]
    pub fn capture_square(&self, size: BoardSize) -> Square {
        match self.kind {
            MoveKind::EnPassant => {
                let file = i16::from(size.file_of(self.to));
                let rank = i16::from(size.rank_of(self.from));
                size.square(file, rank).unwrap_or(self.to)
            }
            _ => self.to,
        }
    }

    /// Pawn move advancing two ranks.
    #[inline]
    pub fn is_double_push(&self, size: BoardSize) -> bool {
        self.piece == PieceKind::Pawn
            && size.file_of(self.from) == size.file_of(self.to)
            && size.rank_of(self.from).abs_diff(size.rank_of(self.to)) == 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_passant_removes_pawn_beside_source() {
        let size = BoardSize::CLASSICAL;
        let e5 = size.square(4, 4).expect("e5");
        let d6 = size.square(3, 5).expect("d6");
        let d5 = size.square(3, 4).expect("d5");
        let mv = Move::new(e5, d6, PieceKind::Pawn, Color::Light)
            .with_capture(PieceKind::Pawn, false)
            .with_kind(MoveKind::EnPassant);

        assert_eq!(mv.capture_square(size), d5);
        assert!(mv.is_en_passant());
        assert!(!mv.is_double_push(size));
    }

    #[test]
    fn promotion_changes_landed_kind() {
        let mv = Move::new(52, 60, PieceKind::Pawn, Color::Light).with_promotion(PieceKind::Queen);
        assert_eq!(mv.landed_kind(), PieceKind::Queen);
    }
}
