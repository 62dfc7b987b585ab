//! Square name conversions.
//!
//! Files are single letters `a..=z`, ranks are 1-based numbers that may take
//! two digits on boards taller than nine ranks (`c10`, `p16`).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{BoardSize, Square};

#[inline]
pub fn file_char(file: u8) -> char {
    char::from(b'a' + file)
}

#[inline]
pub fn rank_label(rank: u8) -> String {
    (u16::from(rank) + 1).to_string()
}

/// Name of an on-board square; callers pass squares from the same board.
#[inline]
pub fn square_name(size: BoardSize, square: Square) -> String {
    format!(
        "{}{}",
        file_char(size.file_of(square)),
        rank_label(size.rank_of(square))
    )
}

/// Convert a square index to its name (for example `e4`).
pub fn square_to_algebraic(square: Square, size: BoardSize) -> ChessResult<String> {
    if !size.contains(square) {
        return Err(ChessError::Format(format!(
            "square index {square} is outside a {}x{} board",
            size.files, size.ranks
        )));
    }
    Ok(square_name(size, square))
}

/// Convert a square name (for example `e4` or `j10`) to its index.
pub fn algebraic_to_square(square: &str, size: BoardSize) -> ChessResult<Square> {
    let mut chars = square.chars();
    let file = chars
        .next()
        .filter(char::is_ascii_lowercase)
        .ok_or_else(|| ChessError::Format(format!("invalid square file: {square}")))?;
    let rank_part = chars.as_str();
    if rank_part.is_empty() || !rank_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChessError::Format(format!("invalid square rank: {square}")));
    }
    let rank = rank_part
        .parse::<i16>()
        .map_err(|_| ChessError::Format(format!("invalid square rank: {square}")))?;

    let file_index = i16::from(file as u8 - b'a');
    size.square(file_index, rank - 1)
        .ok_or_else(|| ChessError::Format(format!("square {square} is off the board")))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::game_state::chess_types::BoardSize;

    #[test]
    fn round_trip_square_conversions() {
        let size = BoardSize::CLASSICAL;
        assert_eq!(algebraic_to_square("a1", size).expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8", size).expect("h8 should parse"), 63);
        assert_eq!(square_to_algebraic(0, size).expect("0 should convert"), "a1");
        assert_eq!(square_to_algebraic(63, size).expect("63 should convert"), "h8");
    }

    #[test]
    fn two_digit_ranks_on_tall_boards() {
        let size = BoardSize { files: 26, ranks: 16 };
        let z16 = algebraic_to_square("z16", size).expect("z16 should parse");
        assert_eq!(z16, 26 * 16 - 1);
        assert_eq!(square_to_algebraic(z16, size).expect("z16 should convert"), "z16");
        assert_eq!(
            square_to_algebraic(algebraic_to_square("c10", size).expect("c10"), size)
                .expect("c10 should convert"),
            "c10"
        );
    }

    #[test]
    fn rejects_off_board_and_malformed_names() {
        let size = BoardSize::CLASSICAL;
        assert!(algebraic_to_square("i1", size).is_err());
        assert!(algebraic_to_square("a9", size).is_err());
        assert!(algebraic_to_square("a0", size).is_err());
        assert!(algebraic_to_square("A1", size).is_err());
        assert!(algebraic_to_square("e", size).is_err());
        assert!(square_to_algebraic(64, size).is_err());
    }
}
