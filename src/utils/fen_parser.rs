//! FEN-to-GameState parser.
//!
//! Accepts boards up to 26 files by 16 ranks. Runs of empty squares may take
//! several digits (`10`, `12`). Only the placement and side-to-move fields are
//! required; castling rights, en-passant square and both clocks are optional
//! and default to home-rank virgin flags, no en passant, `0` and `1`.
//!
//! The castling field, when present, decides which kings and rooks are
//! virgin. `K`/`Q` name the outermost rook on the high/low wing of the king;
//! any other letter names the rook's file directly (uppercase for Light).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

type PlacedPiece = Option<(Color, PieceKind)>;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| format_error("missing board layout in FEN"))?;
    let side_part = parts
        .next()
        .ok_or_else(|| format_error("missing side-to-move in FEN"))?;
    let castling_part = parts.next();
    let en_passant_part = parts.next();
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(format_error("FEN has extra trailing fields"));
    }

    let mut game_state = parse_placement(board_part)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;

    if let Some(castling_part) = castling_part {
        apply_castling_rights(&mut game_state, castling_part)?;
    }
    if let Some(en_passant_part) = en_passant_part {
        game_state.en_passant_seed = parse_en_passant(&game_state, en_passant_part)?;
    }
    if let Some(halfmove_part) = halfmove_part {
        game_state.halfmove_clock = halfmove_part
            .parse::<u16>()
            .map_err(|_| format_error(format!("invalid halfmove clock: {halfmove_part}")))?;
    }
    if let Some(fullmove_part) = fullmove_part {
        game_state.fullmove_number = fullmove_part
            .parse::<u16>()
            .map_err(|_| format_error(format!("invalid fullmove number: {fullmove_part}")))?;
    }

    Ok(game_state)
}

/// Parse the placement field alone. Kings and rooks on their back rank and
/// pawns on their home rank start virgin. Light is to move.
pub fn parse_placement(board_part: &str) -> ChessResult<GameState> {
    let rows: Vec<&str> = board_part.split('/').collect();
    let ranks = rows.len();
    if ranks > MAX_RANKS {
        return Err(ChessError::Size {
            files: 0,
            ranks,
        });
    }

    let mut grid = Vec::with_capacity(ranks);
    for row in &rows {
        grid.push(parse_row(row, ranks)?);
    }

    let files = grid.first().map_or(0, Vec::len);
    if files == 0 {
        return Err(ChessError::Size { files, ranks });
    }
    for (index, row) in grid.iter().enumerate() {
        if row.len() != files {
            return Err(format_error(format!(
                "rank {} has {} squares, expected {files}",
                ranks - index,
                row.len()
            )));
        }
    }

    let size = BoardSize {
        files: files as u8,
        ranks: ranks as u8,
    };
    let mut game_state = GameState::new_empty(size);
    let mut king_count = [0usize; 2];

    for (index, row) in grid.into_iter().enumerate() {
        let rank = (ranks - 1 - index) as u8;
        for (file, slot) in row.into_iter().enumerate() {
            let Some((color, kind)) = slot else {
                continue;
            };
            let home_rank = match kind {
                PieceKind::King | PieceKind::Rook => Some(size.back_rank(color)),
                PieceKind::Pawn => Some(size.pawn_home_rank(color)),
                _ => None,
            };
            let has_moved = home_rank.is_some_and(|home| home != rank);
            if kind == PieceKind::King {
                king_count[color.index()] += 1;
            }

            let square = size
                .square(file as i16, i16::from(rank))
                .ok_or_else(|| format_error("square outside parsed board"))?;
            game_state.put(color, square, Some(Piece::new(kind, has_moved)));
        }
    }

    for color in Color::BOTH {
        if king_count[color.index()] != 1 {
            return Err(format_error(format!(
                "{color:?} must have exactly one king, found {}",
                king_count[color.index()]
            )));
        }
    }

    Ok(game_state)
}

fn parse_row(row: &str, ranks: usize) -> ChessResult<Vec<PlacedPiece>> {
    let mut cells: Vec<PlacedPiece> = Vec::with_capacity(MAX_FILES);
    let mut chars = row.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch.is_ascii_digit() {
            let mut end = start + 1;
            while let Some(&(next, digit)) = chars.peek() {
                if !digit.is_ascii_digit() {
                    break;
                }
                end = next + 1;
                chars.next();
            }
            let run = row[start..end]
                .parse::<usize>()
                .map_err(|_| format_error(format!("invalid empty-square count '{}'", &row[start..end])))?;
            if run == 0 || row[start..end].starts_with('0') {
                return Err(format_error("empty-square count must be positive without leading zeros"));
            }
            if cells.len() + run > MAX_FILES {
                return Err(ChessError::Size {
                    files: cells.len() + run,
                    ranks,
                });
            }
            cells.extend(std::iter::repeat(None).take(run));
            continue;
        }

        let placed = piece_from_fen_char(ch)
            .ok_or_else(|| format_error(format!("invalid piece character '{ch}' in board layout")))?;
        if cells.len() == MAX_FILES {
            return Err(ChessError::Size {
                files: cells.len() + 1,
                ranks,
            });
        }
        cells.push(Some(placed));
    }

    Ok(cells)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(format_error(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn apply_castling_rights(game_state: &mut GameState, castling_part: &str) -> ChessResult<()> {
    for color in Color::BOTH {
        let tracked: Vec<(Square, Piece)> = game_state
            .pieces(color)
            .filter(|(_, piece)| matches!(piece.kind, PieceKind::King | PieceKind::Rook))
            .collect();
        for (square, piece) in tracked {
            game_state.put(color, square, Some(Piece::new(piece.kind, true)));
        }
    }

    if castling_part == "-" {
        return Ok(());
    }

    let size = game_state.size();
    let mut has_right = [false; 2];
    for ch in castling_part.chars() {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return Err(format_error(format!("invalid castling rights character: {ch}")));
        };
        let king = game_state
            .king_square(color)
            .ok_or_else(|| format_error("castling right without a king"))?;

        let rook = match ch.to_ascii_uppercase() {
            'K' => outermost_rook(game_state, color, king, CastleWing::High),
            'Q' => outermost_rook(game_state, color, king, CastleWing::Low),
            letter => size
                .square(
                    i16::from(letter as u8 - b'A'),
                    i16::from(size.rank_of(king)),
                )
                .filter(|&square| {
                    square != king
                        && game_state
                            .piece_for(color, square)
                            .is_some_and(|piece| piece.kind == PieceKind::Rook)
                }),
        }
        .ok_or_else(|| format_error(format!("castling right '{ch}' has no rook")))?;

        game_state.put(color, rook, Some(Piece::new(PieceKind::Rook, false)));
        has_right[color.index()] = true;
    }

    for color in Color::BOTH {
        if has_right[color.index()] {
            if let Some(king) = game_state.king_square(color) {
                game_state.put(color, king, Some(Piece::new(PieceKind::King, false)));
            }
        }
    }

    Ok(())
}

/// Rook of `color` nearest the board edge on `wing`, on the king's rank.
pub(crate) fn outermost_rook(
    game_state: &GameState,
    color: Color,
    king: Square,
    wing: CastleWing,
) -> Option<Square> {
    let size = game_state.size();
    let rank = i16::from(size.rank_of(king));
    let king_file = i16::from(size.file_of(king));
    let is_rook = |file: i16| {
        size.square(file, rank).filter(|&square| {
            game_state
                .piece_for(color, square)
                .is_some_and(|piece| piece.kind == PieceKind::Rook)
        })
    };

    match wing {
        CastleWing::High => ((king_file + 1)..i16::from(size.files))
            .rev()
            .find_map(is_rook),
        CastleWing::Low => (0..king_file).find_map(is_rook),
    }
}

/// Seed the double push implied by an en-passant square.
fn parse_en_passant(game_state: &GameState, en_passant_part: &str) -> ChessResult<Option<Move>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let size = game_state.size();
    let passed = algebraic_to_square(en_passant_part, size)?;
    let pusher = game_state.side_to_move.opposite();
    let forward = pusher.forward();

    let to = size.offset(passed, 0, forward);
    let from = size.offset(passed, 0, -forward);
    let (Some(from), Some(to)) = (from, to) else {
        return Err(format_error(format!(
            "en-passant square {en_passant_part} has no double push behind it"
        )));
    };

    let pushed_pawn = game_state
        .piece_for(pusher, to)
        .is_some_and(|piece| piece.kind == PieceKind::Pawn);
    if !pushed_pawn || game_state.is_occupied(passed) || game_state.is_occupied(from) {
        return Err(format_error(format!(
            "en-passant square {en_passant_part} has no double push behind it"
        )));
    }

    let mut seed = Move::new(from, to, PieceKind::Pawn, pusher);
    seed.first_move = true;
    Ok(Some(seed))
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    Some((color, PieceKind::from_letter(ch)?))
}

fn format_error(message: impl Into<String>) -> ChessError {
    ChessError::Format(message.into())
}

#[cfg(test)]
mod tests {
    use super::{parse_fen, parse_placement};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::{STARTING_POSITION_FEN, WIDE_BOARD_FEN};
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn piece(game: &GameState, color: Color, name: &str) -> Option<Piece> {
        let square = algebraic_to_square(name, game.size()).expect("square should parse");
        game.piece_for(color, square)
    }

    #[test]
    fn parses_starting_position() {
        let game = parse_fen(STARTING_POSITION_FEN).expect("start position should parse");
        assert_eq!(game.size(), BoardSize::CLASSICAL);
        assert_eq!(game.side_to_move, Color::Light);
        assert_eq!(game.pieces(Color::Dark).count(), 16);
        assert!(piece(&game, Color::Light, "e1").is_some_and(Piece::is_virgin));
        assert!(piece(&game, Color::Dark, "a8").is_some_and(Piece::is_virgin));
        assert!(piece(&game, Color::Dark, "d7").is_some_and(Piece::is_virgin));
        assert_eq!(game.fullmove_number, 1);
    }

    #[test]
    fn optional_fields_default() {
        let game = parse_fen("4k3/8/8/8/8/8/4P3/R3K2R b").expect("short FEN should parse");
        assert_eq!(game.side_to_move, Color::Dark);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.fullmove_number, 1);
        assert!(game.last_move().is_none());
        assert!(piece(&game, Color::Light, "h1").is_some_and(Piece::is_virgin));
        assert!(piece(&game, Color::Dark, "e8").is_some_and(Piece::is_virgin));
    }

    #[test]
    fn multi_digit_runs_and_wide_boards() {
        let game = parse_fen(WIDE_BOARD_FEN).expect("wide board should parse");
        assert_eq!(game.size(), BoardSize { files: 10, ranks: 8 });

        let tall = parse_placement("k11/12/12/12/12/12/12/12/12/12/12/11K")
            .expect("12x12 board should parse");
        assert_eq!(tall.size(), BoardSize { files: 12, ranks: 12 });
        assert_eq!(tall.king_square(Color::Light), Some(11));
    }

    #[test]
    fn rejects_mismatched_rank_lengths_and_bad_characters() {
        assert!(matches!(
            parse_fen("4k3/9/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessError::Format(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K2X w - - 0 1"),
            Err(ChessError::Format(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/04K3 w - - 0 1"),
            Err(ChessError::Format(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(ChessError::Format(_))
        ));
    }

    #[test]
    fn rejects_oversized_boards() {
        assert!(matches!(
            parse_placement("k26/27/K26"),
            Err(ChessError::Size { .. })
        ));
        let seventeen_ranks = ["k7"]
            .into_iter()
            .chain(std::iter::repeat("8").take(15))
            .chain(["K7"])
            .collect::<Vec<_>>()
            .join("/");
        assert!(matches!(
            parse_placement(&seventeen_ranks),
            Err(ChessError::Size { ranks: 17, .. })
        ));
    }

    #[test]
    fn requires_exactly_one_king_per_side() {
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessError::Format(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(ChessError::Format(_))
        ));
    }

    #[test]
    fn castling_field_governs_king_and_rook_virginity() {
        let game =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("FEN should parse");
        assert!(piece(&game, Color::Light, "h1").is_some_and(Piece::is_virgin));
        assert!(!piece(&game, Color::Light, "a1").is_some_and(Piece::is_virgin));
        assert!(piece(&game, Color::Light, "e1").is_some_and(Piece::is_virgin));
        assert!(piece(&game, Color::Dark, "a8").is_some_and(Piece::is_virgin));
        assert!(!piece(&game, Color::Dark, "h8").is_some_and(Piece::is_virgin));

        let none = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert!(!piece(&none, Color::Light, "e1").is_some_and(Piece::is_virgin));
        assert!(!piece(&none, Color::Dark, "a8").is_some_and(Piece::is_virgin));
    }

    #[test]
    fn file_letter_rights_pick_inner_rooks() {
        let game = parse_fen("4k3/8/8/8/8/8/8/1R2K1RR w G - 0 1").expect("FEN should parse");
        assert!(piece(&game, Color::Light, "g1").is_some_and(Piece::is_virgin));
        assert!(!piece(&game, Color::Light, "h1").is_some_and(Piece::is_virgin));
        assert!(!piece(&game, Color::Light, "b1").is_some_and(Piece::is_virgin));
    }

    #[test]
    fn castling_right_without_rook_is_rejected() {
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K2R w Q - 0 1"),
            Err(ChessError::Format(_))
        ));
    }

    #[test]
    fn en_passant_field_seeds_previous_double_push() {
        let game = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").expect("FEN should parse");
        let seed = game.last_move().expect("seeded double push");
        assert_eq!(seed.side, Color::Dark);
        assert!(seed.is_double_push(game.size()));
        assert_eq!(seed.to, algebraic_to_square("d5", game.size()).expect("d5"));

        assert!(matches!(
            parse_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 3"),
            Err(ChessError::Format(_))
        ));
    }
}
