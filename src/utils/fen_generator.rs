use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::{file_char, square_name};
use crate::utils::fen_parser::outermost_rook;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state);
    let en_passant = generate_en_passant_field(game_state);

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

pub fn generate_board_field(game_state: &GameState) -> String {
    let size = game_state.size();
    let mut out = String::new();

    for rank in (0..i16::from(size.ranks)).rev() {
        let mut empty_count = 0usize;

        for file in 0..i16::from(size.files) {
            let occupant = size
                .square(file, rank)
                .and_then(|square| game_state.piece_at(square));
            if let Some((color, piece)) = occupant {
                if empty_count > 0 {
                    out.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(color, piece.kind));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push_str(&empty_count.to_string());
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

/// Rights follow the virgin flags: a virgin king plus each virgin rook on its
/// rank. The outermost rook of a wing is written `K`/`Q`, inner ones by file.
fn generate_castling_field(game_state: &GameState) -> String {
    let size = game_state.size();
    let mut out = String::new();

    for color in Color::BOTH {
        let Some(king) = game_state.king_square(color) else {
            continue;
        };
        if !game_state.piece_for(color, king).is_some_and(Piece::is_virgin) {
            continue;
        }

        let mut rights = Vec::new();
        for wing in CastleWing::BOTH {
            let outer = outermost_rook(game_state, color, king, wing);
            let wing_letter = match wing {
                CastleWing::High => 'K',
                CastleWing::Low => 'Q',
            };
            for (square, piece) in game_state.pieces(color) {
                let on_wing = size.rank_of(square) == size.rank_of(king)
                    && match wing {
                        CastleWing::High => square > king,
                        CastleWing::Low => square < king,
                    };
                if piece.kind != PieceKind::Rook || !piece.is_virgin() || !on_wing {
                    continue;
                }
                if Some(square) == outer {
                    rights.push(wing_letter);
                } else {
                    rights.push(file_char(size.file_of(square)).to_ascii_uppercase());
                }
            }
        }

        // K before Q when both wings hold an outermost right.
        rights.sort_by_key(|letter| match letter {
            'K' => 0,
            'Q' => 1,
            _ => 2,
        });
        for letter in rights {
            out.push(match color {
                Color::Light => letter,
                Color::Dark => letter.to_ascii_lowercase(),
            });
        }
    }

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

/// Square passed over by a double push on the previous ply, else `-`.
fn generate_en_passant_field(game_state: &GameState) -> String {
    let size = game_state.size();
    game_state
        .last_move()
        .filter(|mv| mv.is_double_push(size))
        .and_then(|mv| size.offset(mv.from, 0, mv.side.forward()))
        .map_or_else(|| "-".to_owned(), |passed| square_name(size, passed))
}

fn piece_to_fen_char(color: Color, piece: PieceKind) -> char {
    let letter = piece.letter();
    match color {
        Color::Light => letter,
        Color::Dark => letter.to_ascii_lowercase(),
    }
}
