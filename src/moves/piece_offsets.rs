//! Step and ray tables as `(d_file, d_rank)` pairs.
//!
//! Board sizes vary, so pieces move by coordinate deltas resolved through
//! `BoardSize::offset` instead of precomputed square masks.

pub const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i16, i16); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRECTIONS: [(i16, i16); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const BISHOP_DIRECTIONS: [(i16, i16); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const QUEEN_DIRECTIONS: [(i16, i16); 8] = KING_OFFSETS;

/// File deltas of a pawn's two capture diagonals.
pub const PAWN_CAPTURE_FILES: [i16; 2] = [-1, 1];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::BoardSize;

    #[test]
    fn knight_in_center_of_wide_board_has_eight_targets() {
        let size = BoardSize { files: 12, ranks: 12 };
        let center = size.square(5, 5).expect("center square");
        let targets = KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(df, dr)| size.offset(center, df, dr))
            .count();
        assert_eq!(targets, 8);
    }

    #[test]
    fn knight_in_corner_has_two_targets() {
        let size = BoardSize::CLASSICAL;
        let targets = KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(df, dr)| size.offset(0, df, dr))
            .count();
        assert_eq!(targets, 2);
    }
}
