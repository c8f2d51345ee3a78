//! Chess moves and their action encoding.
//!
//! Layout of the 16 low bits of an action:
//!
//! | bits  | field |
//! |-------|-------|
//! | 0-5   | origin square |
//! | 6-11  | target square (castling: the castling rook's square) |
//! | 12-13 | kind: normal, promotion, en passant, castling |
//! | 14-15 | promotion piece: knight, bishop, rook, queen |
//!
//! `a1a1` is never a move, so the all-zero encoding stays free for
//! `Action::NONE`.

use smallvec::SmallVec;

use super::types::{PieceKind, Square};
use crate::core::Action;

/// Kind of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Promotion(PieceKind),
    EnPassant,
    Castling,
}

/// A chess move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

/// Move list for generation.
pub type MoveList = SmallVec<[Move; 64]>;

const KIND_SHIFT: i32 = 12;
const PROMOTION_SHIFT: i32 = 14;

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }

    #[must_use]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Normal)
    }

    /// Encode as an action.
    #[must_use]
    pub fn to_action(self) -> Action {
        let (kind, promotion) = match self.kind {
            MoveKind::Normal => (0, 0),
            MoveKind::Promotion(piece) => (1, promotion_code(piece)),
            MoveKind::EnPassant => (2, 0),
            MoveKind::Castling => (3, 0),
        };
        Action::new(
            self.from.index() as i32
                | (self.to.index() as i32) << 6
                | kind << KIND_SHIFT
                | promotion << PROMOTION_SHIFT,
        )
    }

    /// Decode an action. Returns `None` for `Action::NONE` and for values
    /// outside the encoding.
    #[must_use]
    pub fn from_action(action: Action) -> Option<Move> {
        let raw = action.raw();
        if action.is_none() || !(0..1 << 16).contains(&raw) {
            return None;
        }
        let from = Square::from_index((raw & 63) as usize);
        let to = Square::from_index((raw >> 6 & 63) as usize);
        let promotion = promotion_kind(raw >> PROMOTION_SHIFT & 3);
        let kind = match raw >> KIND_SHIFT & 3 {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion(promotion),
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        };
        if from == to || (kind != MoveKind::Promotion(promotion) && raw >> PROMOTION_SHIFT != 0) {
            return None;
        }
        Some(Move::new(from, to, kind))
    }

    /// Check if this move castles on the king side (rook to the king's right).
    #[must_use]
    pub fn is_king_side_castle(self) -> bool {
        self.kind == MoveKind::Castling && self.to.file() > self.from.file()
    }

    /// Target square of the king (for castling) or of the moving piece.
    #[must_use]
    pub fn king_target(self) -> Square {
        match self.kind {
            MoveKind::Castling => {
                let file = if self.is_king_side_castle() { 6 } else { 2 };
                Square::new(file, self.from.rank())
            }
            _ => self.to,
        }
    }

    /// Format in UCI notation.
    ///
    /// Castling is written as the king's two-square step (`e1g1`) in
    /// standard mode when the king starts on the e-file, and king-takes-rook
    /// (`e1h1`) otherwise. Any other king placement could make the step
    /// read as a plain king move.
    #[must_use]
    pub fn to_uci(self, chess960: bool) -> String {
        let to = if self.kind == MoveKind::Castling && !chess960 && self.from.file() == 4 {
            self.king_target()
        } else {
            self.to
        };
        match self.kind {
            MoveKind::Promotion(piece) => format!("{}{}{}", self.from, to, piece.to_char()),
            _ => format!("{}{}", self.from, to),
        }
    }
}

fn promotion_code(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Knight => 0,
        PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        _ => 3,
    }
}

fn promotion_kind(code: i32) -> PieceKind {
    match code {
        0 => PieceKind::Knight,
        1 => PieceKind::Bishop,
        2 => PieceKind::Rook,
        _ => PieceKind::Queen,
    }
}
