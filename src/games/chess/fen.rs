//! FEN parsing and formatting.
//!
//! Castling accepts `KQkq`, Shredder-FEN (`HAha`) and X-FEN file letters in
//! any mix. `KQkq` refer to the outermost rook on that wing. The half-move
//! clock and full-move number are optional and default to `0 1`.

use super::position::{CastlingRights, CastlingSide, Position};
use super::types::{color_name, pawn_push, Board, Color, Piece, PieceKind, Square, BLACK, WHITE};
use crate::core::{Result, StateError, START_FEN};

/// Parse a FEN string, or the `startpos` shorthand.
///
/// # Errors
///
/// Returns `StateError::InvalidDescription` if the text is not a well-formed
/// FEN or describes an impossible position.
pub fn parse(text: &str) -> Result<Position> {
    let trimmed = text.trim();
    let source = if trimmed == "startpos" { START_FEN } else { trimmed };
    let invalid = |reason: String| StateError::invalid_description(text, reason);

    let fields: Vec<&str> = source.split_whitespace().collect();
    if !(4..=6).contains(&fields.len()) {
        return Err(invalid(format!("expected 4 to 6 fields, got {}", fields.len())));
    }

    let board = parse_board(fields[0]).map_err(&invalid)?;
    let side_to_move = match fields[1] {
        "w" => WHITE,
        "b" => BLACK,
        other => return Err(invalid(format!("invalid side to move '{other}'"))),
    };

    for color in [WHITE, BLACK] {
        let kings = board.count(Piece::new(color, PieceKind::King));
        if kings != 1 {
            return Err(invalid(format!("expected one {} king, found {kings}", color_name(color))));
        }
    }
    let back_rank_pawn = board
        .pieces()
        .any(|(sq, p)| p.kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7));
    if back_rank_pawn {
        return Err(invalid("pawn on the first or last rank".to_string()));
    }
    if board.in_check(!side_to_move) {
        return Err(invalid("side not to move is in check".to_string()));
    }

    let castling = parse_castling(fields[2], &board).map_err(&invalid)?;

    let rule50 = match fields.get(4) {
        Some(field) => field
            .parse()
            .map_err(|_| invalid(format!("invalid half-move clock '{field}'")))?,
        None => 0,
    };
    let fullmove = match fields.get(5) {
        Some(field) => field
            .parse::<u32>()
            .map_err(|_| invalid(format!("invalid full-move number '{field}'")))?
            .max(1),
        None => 1,
    };

    let mut position = Position {
        board,
        side_to_move,
        castling,
        ep_square: None,
        rule50,
        fullmove,
    };
    position.ep_square = parse_ep(fields[3], &position).map_err(&invalid)?;
    Ok(position)
}

fn parse_board(field: &str) -> std::result::Result<Board, String> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(format!("expected 8 ranks, got {}", ranks.len()));
    }

    let mut board = Board::empty();
    for (row, text) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as u8;
            } else {
                let piece = Piece::from_fen_char(c).ok_or_else(|| format!("invalid piece '{c}'"))?;
                if file >= 8 {
                    return Err(format!("rank {} has more than 8 files", rank + 1));
                }
                board.set(Square::new(file, rank), Some(piece));
                file += 1;
            }
            if file > 8 {
                return Err(format!("rank {} has more than 8 files", rank + 1));
            }
        }
        if file != 8 {
            return Err(format!("rank {} has {file} files", rank + 1));
        }
    }
    Ok(board)
}

fn parse_castling(field: &str, board: &Board) -> std::result::Result<CastlingRights, String> {
    let mut rights = CastlingRights::default();
    if field == "-" {
        return Ok(rights);
    }

    for c in field.chars() {
        let color = if c.is_ascii_uppercase() { WHITE } else { BLACK };
        let back_rank = Square::new(0, 0).relative_to(color).rank();
        let king = board
            .king_square(color)
            .filter(|k| k.rank() == back_rank)
            .ok_or_else(|| format!("castling '{c}' without a {} king on its back rank", color_name(color)))?;
        let rook = Some(Piece::new(color, PieceKind::Rook));

        let rook_square = match c.to_ascii_lowercase() {
            'k' => (king.file() + 1..8)
                .rev()
                .map(|f| Square::new(f, back_rank))
                .find(|sq| board.get(*sq) == rook),
            'q' => (0..king.file())
                .map(|f| Square::new(f, back_rank))
                .find(|sq| board.get(*sq) == rook),
            file @ 'a'..='h' => {
                Some(Square::new(file as u8 - b'a', back_rank)).filter(|sq| board.get(*sq) == rook)
            }
            _ => return Err(format!("invalid castling field '{field}'")),
        }
        .ok_or_else(|| format!("castling '{c}' without a matching rook"))?;

        if rook_square == king {
            return Err(format!("invalid castling field '{field}'"));
        }
        let side = if rook_square.file() > king.file() {
            CastlingSide::King
        } else {
            CastlingSide::Queen
        };
        rights.grant(color, side, rook_square);
    }
    Ok(rights)
}

fn parse_ep(field: &str, position: &Position) -> std::result::Result<Option<Square>, String> {
    if field == "-" {
        return Ok(None);
    }
    let target = Square::parse(field).ok_or_else(|| format!("invalid en passant square '{field}'"))?;
    let us = position.side_to_move;
    if target.relative_to(us).rank() != 5 {
        return Err(format!("en passant square '{field}' on the wrong rank"));
    }

    // The pawn that just advanced two squares must stand in front of the target.
    let pushed = target.offset(0, -pawn_push(us));
    let them_pawn = Some(Piece::new(!us, PieceKind::Pawn));
    if pushed.and_then(|sq| position.board.get(sq)) != them_pawn {
        return Ok(None);
    }
    Ok(position.legal_ep_target(target))
}

/// Format a position as FEN.
///
/// With `chess960` castling rights are written as Shredder-FEN file letters.
/// Otherwise `KQkq` are used for outermost rooks and X-FEN file letters for
/// any inner rook.
#[must_use]
pub fn format(position: &Position, chess960: bool) -> String {
    let mut fen = String::with_capacity(90);
    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match position.board.get(Square::new(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(if position.side_to_move == WHITE { 'w' } else { 'b' });
    fen.push(' ');
    if position.castling.any() {
        for (color, side, rook) in position.castling.iter() {
            fen.push(castling_char(position, color, side, rook, chess960));
        }
    } else {
        fen.push('-');
    }
    fen.push(' ');
    match position.ep_square {
        Some(sq) => fen.push_str(&sq.to_string()),
        None => fen.push('-'),
    }
    fen.push_str(&format!(" {} {}", position.rule50, position.fullmove));
    fen
}

fn castling_char(position: &Position, color: Color, side: CastlingSide, rook: Square, chess960: bool) -> char {
    let outermost = || {
        let rook_piece = Some(Piece::new(color, PieceKind::Rook));
        let beyond = match side {
            CastlingSide::King => rook.file() + 1..8,
            CastlingSide::Queen => 0..rook.file(),
        };
        !beyond
            .map(|f| Square::new(f, rook.rank()))
            .any(|sq| position.board.get(sq) == rook_piece)
    };
    let c = if chess960 || !outermost() {
        rook.file_char()
    } else {
        match side {
            CastlingSide::King => 'k',
            CastlingSide::Queen => 'q',
        }
    };
    if color == WHITE {
        c.to_ascii_uppercase()
    } else {
        c
    }
}
