//! Short algebraic move strings and disambiguation.
//!
//! Pawns: source file, `x` plus target file when capturing, target rank and
//! `=Q`-style promotion suffix (`e4`, `exd5`, `a8=N`). Pieces: letter, `x` when
//! capturing, target square (`Nf3`, `Rxa7`). Castles are `>` toward higher
//! files and `<` toward lower ones. No check or mate suffixes are added.

use std::collections::BTreeMap;

use crate::game_state::chess_types::{BoardSize, Move, MoveKind, PieceKind};
use crate::utils::algebraic::{file_char, rank_label, square_name};

pub fn move_to_algebraic(mv: &Move, size: BoardSize) -> String {
    if let MoveKind::Castle { .. } = mv.kind {
        return if mv.to > mv.from { ">" } else { "<" }.to_owned();
    }

    let mut out = String::with_capacity(8);
    if mv.piece == PieceKind::Pawn {
        out.push(file_char(size.file_of(mv.from)));
        if mv.is_capture() {
            out.push('x');
            out.push(file_char(size.file_of(mv.to)));
        }
        out.push_str(&rank_label(size.rank_of(mv.to)));
        if let Some(promotion) = mv.promotion {
            out.push('=');
            out.push(promotion.letter());
        }
    } else {
        out.push(mv.piece.letter());
        if mv.is_capture() {
            out.push('x');
        }
        out.push_str(&square_name(size, mv.to));
    }
    out
}

/// Key every move by its algebraic string, qualifying clashes with the
/// source file, else the source rank, else both.
pub fn disambiguate(moves: &[Move], size: BoardSize) -> BTreeMap<String, Move> {
    let mut groups: BTreeMap<String, Vec<Move>> = BTreeMap::new();
    for mv in moves {
        groups
            .entry(move_to_algebraic(mv, size))
            .or_default()
            .push(*mv);
    }

    let mut keyed = BTreeMap::new();
    for (base, group) in groups {
        if group.len() == 1 {
            keyed.insert(base, group[0]);
            continue;
        }

        for (index, mv) in group.iter().enumerate() {
            let file = size.file_of(mv.from);
            let rank = size.rank_of(mv.from);
            let others = || {
                group
                    .iter()
                    .enumerate()
                    .filter(move |(other, _)| *other != index)
                    .map(|(_, other)| other.from)
            };

            let qualifier = if !others().any(|from| size.file_of(from) == file) {
                file_char(file).to_string()
            } else if !others().any(|from| size.rank_of(from) == rank) {
                rank_label(rank)
            } else {
                square_name(size, mv.from)
            };

            let split = base.chars().next().map_or(0, char::len_utf8);
            keyed.insert(
                format!("{}{}{}", &base[..split], qualifier, &base[split..]),
                *mv,
            );
        }
    }
    keyed
}
