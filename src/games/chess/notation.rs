//! Move notation: SAN formatting and UCI parsing.

use log::debug;

use super::fen;
use super::moves::{Move, MoveKind};
use super::position::Position;
use super::types::{PieceKind, Square};
use crate::core::{Result, StateError};

/// Annotations appended to a SAN move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SanFlags {
    /// Mark the move as mating (`#`) instead of checking it for `+`.
    pub leads_to_win: bool,
    /// Append a `{book}` comment.
    pub is_book_move: bool,
}

/// Format `mv` in Standard Algebraic Notation.
///
/// `legal` is the legal move list of `position`, used to pick the shortest
/// origin disambiguation.
#[must_use]
pub fn to_san(position: &Position, mv: Move, legal: &[Move], flags: SanFlags) -> String {
    let mut san = match mv.kind {
        MoveKind::Castling if mv.is_king_side_castle() => "O-O".to_string(),
        MoveKind::Castling => "O-O-O".to_string(),
        _ => piece_move_san(position, mv, legal),
    };

    if flags.leads_to_win {
        san.push('#');
    } else if position.gives_check(mv) {
        san.push('+');
    }
    if flags.is_book_move {
        san.push_str(" {book}");
    }
    san
}

fn piece_move_san(position: &Position, mv: Move, legal: &[Move]) -> String {
    let kind = position
        .board
        .get(mv.from)
        .map_or(PieceKind::Pawn, |piece| piece.kind);
    let capture = position.is_capture(mv);
    let mut san = String::with_capacity(8);

    if kind == PieceKind::Pawn {
        if capture {
            san.push(mv.from.file_char());
        }
    } else {
        san.push(kind.to_char().to_ascii_uppercase());
        san.push_str(&disambiguation(position, mv, kind, legal));
    }
    if capture {
        san.push('x');
    }
    san.push_str(&mv.to.to_string());
    if let MoveKind::Promotion(piece) = mv.kind {
        san.push('=');
        san.push(piece.to_char().to_ascii_uppercase());
    }
    san
}

fn disambiguation(position: &Position, mv: Move, kind: PieceKind, legal: &[Move]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| {
            other.to == mv.to
                && other.from != mv.from
                && other.kind != MoveKind::Castling
                && position.board.get(other.from).map(|p| p.kind) == Some(kind)
        })
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

/// Parse a UCI move and match it against `legal`, the legal moves of
/// `position`.
///
/// In standard mode castling is accepted both as the king's two-square
/// step (`e1g1`, king on the e-file only) and as king-takes-rook
/// (`e1h1`). In Chess960 mode only king-takes-rook is castling; `f1g1`
/// there is a plain king move.
///
/// # Errors
///
/// `StateError::MalformedNotation` if `uci` is not a coordinate move, and
/// `StateError::IllegalMove` if no legal move matches.
pub fn parse_uci(position: &Position, legal: &[Move], uci: &str, chess960: bool) -> Result<Move> {
    let text = uci.trim();
    if !is_well_formed(text) {
        debug!("rejecting malformed move notation '{uci}'");
        return Err(StateError::MalformedNotation {
            notation: uci.to_string(),
        });
    }

    let found = legal
        .iter()
        .find(|mv| mv.to_uci(chess960) == text)
        .or_else(|| {
            (!chess960)
                .then(|| legal.iter().find(|mv| mv.to_uci(true) == text))
                .flatten()
        });

    match found {
        Some(mv) => Ok(*mv),
        None => {
            let fen = fen::format(position, chess960);
            debug!("rejecting illegal move '{uci}' in '{fen}'");
            Err(StateError::IllegalMove {
                notation: uci.to_string(),
                fen,
            })
        }
    }
}

fn is_well_formed(text: &str) -> bool {
    let squares_ok = text.is_ascii()
        && text.len() >= 4
        && Square::parse(&text[0..2]).is_some()
        && Square::parse(&text[2..4]).is_some();
    let promotion_ok = match text.len() {
        4 => true,
        5 => matches!(text.as_bytes()[4], b'n' | b'b' | b'r' | b'q'),
        _ => false,
    };
    squares_ok && promotion_ok
}
