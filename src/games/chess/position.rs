//! Chess position and move generation.
//!
//! `Position` holds everything the rules need and nothing about the
//! episode: no history, no key. It is `Copy`, so making a move on a scratch
//! copy is the legality test and a snapshot is the undo record.

use super::moves::{Move, MoveKind, MoveList};
use super::types::{
    pawn_push, Board, Color, Piece, PieceKind, Square, DIAGONAL_DIRS, KING_STEPS, KNIGHT_STEPS,
    STRAIGHT_DIRS, WHITE,
};
use crate::core::SideMap;

/// Castling wing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    King,
    Queen,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::King, CastlingSide::Queen];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            CastlingSide::King => 0,
            CastlingSide::Queen => 1,
        }
    }

    /// Files the king and the rook land on.
    #[must_use]
    pub const fn target_files(self) -> (u8, u8) {
        match self {
            CastlingSide::King => (6, 5),
            CastlingSide::Queen => (2, 3),
        }
    }
}

/// Castling rights, stored as the square of the rook each right refers to.
///
/// Storing the rook square rather than a flag makes Chess960 a non-event:
/// the rook may start on any file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    rooks: SideMap<[Option<Square>; 2]>,
}

impl CastlingRights {
    /// Rook square for a right, if the right is held.
    #[must_use]
    pub fn rook(&self, color: Color, side: CastlingSide) -> Option<Square> {
        self.rooks[color][side.index()]
    }

    /// Grant a right.
    pub fn grant(&mut self, color: Color, side: CastlingSide, rook: Square) {
        self.rooks[color][side.index()] = Some(rook);
    }

    /// Drop every right of `color`.
    pub fn clear(&mut self, color: Color) {
        self.rooks[color] = [None; 2];
    }

    /// Drop any right whose rook stands on `sq`.
    pub fn remove_rook(&mut self, sq: Square) {
        for color in [WHITE, !WHITE] {
            for slot in self.rooks[color].iter_mut() {
                if *slot == Some(sq) {
                    *slot = None;
                }
            }
        }
    }

    /// Check if any right is held.
    #[must_use]
    pub fn any(&self) -> bool {
        self.iter().next().is_some()
    }

    /// Iterate over held rights as (colour, wing, rook square).
    pub fn iter(&self) -> impl Iterator<Item = (Color, CastlingSide, Square)> + '_ {
        self.rooks.iter().flat_map(|(color, rooks)| {
            CastlingSide::ALL
                .into_iter()
                .filter_map(move |side| rooks[side.index()].map(|sq| (color, side, sq)))
        })
    }

    /// Rights after mirroring the board and swapping colours.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mirror = |rooks: [Option<Square>; 2]| rooks.map(|r| r.map(Square::flip_rank));
        let rooks = self.rooks.swapped();
        Self {
            rooks: SideMap::new(mirror(rooks[WHITE]), mirror(rooks[!WHITE])),
        }
    }
}

/// A chess position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Only set when a legal en passant capture exists.
    pub ep_square: Option<Square>,
    /// Plies since the last capture or pawn move.
    pub rule50: u32,
    /// Full-move number, starting at 1 and incremented after black moves.
    pub fullmove: u32,
}

impl Position {
    /// King square of `color`.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king; positions are validated on construction.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.board
            .king_square(color)
            .unwrap_or_else(|| panic!("position without {color} king: {:?}", self.board))
    }

    /// Check if the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.board.in_check(self.side_to_move)
    }

    /// All legal moves, in generation order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = self.pseudo_legal_moves();
        moves.retain(|mv| self.is_legal(*mv));
        moves
    }

    /// Check whether a pseudo-legal move keeps the mover's king safe.
    #[must_use]
    pub fn is_legal(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let mut board = self.board;
        apply_to_board(&mut board, mv, us);
        !board.in_check(us)
    }

    /// Check whether `mv` attacks the opponent's king once played.
    #[must_use]
    pub fn gives_check(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let mut board = self.board;
        apply_to_board(&mut board, mv, us);
        board.in_check(!us)
    }

    /// Check whether `mv` removes an opponent piece.
    #[must_use]
    pub fn is_capture(&self, mv: Move) -> bool {
        match mv.kind {
            MoveKind::EnPassant => true,
            MoveKind::Castling => false,
            _ => self.board.get(mv.to).is_some(),
        }
    }

    /// Generate moves that obey piece movement but may leave the king in check.
    #[must_use]
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let us = self.side_to_move;
        for (from, piece) in self.board.pieces().filter(|(_, p)| p.color == us) {
            match piece.kind {
                PieceKind::Pawn => self.pawn_moves(from, &mut moves),
                PieceKind::Knight => self.step_moves(from, &KNIGHT_STEPS, &mut moves),
                PieceKind::Bishop => self.slider_moves(from, &DIAGONAL_DIRS, &mut moves),
                PieceKind::Rook => self.slider_moves(from, &STRAIGHT_DIRS, &mut moves),
                PieceKind::Queen => {
                    self.slider_moves(from, &STRAIGHT_DIRS, &mut moves);
                    self.slider_moves(from, &DIAGONAL_DIRS, &mut moves);
                }
                PieceKind::King => {
                    self.step_moves(from, &KING_STEPS, &mut moves);
                    self.castling_moves(from, &mut moves);
                }
            }
        }
        moves
    }

    fn is_enemy(&self, sq: Square) -> bool {
        self.board
            .get(sq)
            .is_some_and(|p| p.color != self.side_to_move)
    }

    fn pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move;
        let push = pawn_push(us);
        let start_rank = from.relative_to(us).rank() == 1;

        let push_or_promote =|to: Square, moves: &mut MoveList| {
            if to.relative_to(us).rank() == 7 {
                for piece in PieceKind::PROMOTIONS {
                    moves.push(Move::new(from, to, MoveKind::Promotion(piece)));
                }
            } else {
                moves.push(Move::normal(from, to));
            }
        };

        if let Some(one) = from.offset(0, push).filter(|s| self.board.get(*s).is_none()) {
            push_or_promote(one, moves);
            if start_rank {
                if let Some(two) = one.offset(0, push).filter(|s| self.board.get(*s).is_none()) {
                    moves.push(Move::normal(from, two));
                }
            }
        }

        for to in [-1, 1].into_iter().filter_map(|df| from.offset(df, push)) {
            if self.is_enemy(to) {
                push_or_promote(to, moves);
            } else if Some(to) == self.ep_square {
                moves.push(Move::new(from, to, MoveKind::EnPassant));
            }
        }
    }

    fn step_moves(&self, from: Square, steps: &[(i8, i8)], moves: &mut MoveList) {
        for to in steps.iter().filter_map(|&(df, dr)| from.offset(df, dr)) {
            if self.board.get(to).is_none() || self.is_enemy(to) {
                moves.push(Move::normal(from, to));
            }
        }
    }

    fn slider_moves(&self, from: Square, dirs: &[(i8, i8)], moves: &mut MoveList) {
        for &(df, dr) in dirs {
            let mut sq = from;
            while let Some(to) = sq.offset(df, dr) {
                match self.board.get(to) {
                    None => moves.push(Move::normal(from, to)),
                    Some(piece) => {
                        if piece.color != self.side_to_move {
                            moves.push(Move::normal(from, to));
                        }
                        break;
                    }
                }
                sq = to;
            }
        }
    }

    fn castling_moves(&self, king: Square, moves: &mut MoveList) {
        let us = self.side_to_move;
        for side in CastlingSide::ALL {
            let Some(rook) = self.castling.rook(us, side) else {
                continue;
            };
            if self.can_castle(king, rook, side) {
                moves.push(Move::new(king, rook, MoveKind::Castling));
            }
        }
    }

    /// Generalized castling test, valid for standard chess and Chess960.
    ///
    /// Every square the king or rook crosses or lands on must be empty apart
    /// from the two castling pieces, and no square the king stands on or
    /// crosses may be attacked.
    fn can_castle(&self, king: Square, rook: Square, side: CastlingSide) -> bool {
        let us = self.side_to_move;
        if self.board.get(rook) != Some(Piece::new(us, PieceKind::Rook)) || king.rank() != rook.rank() {
            return false;
        }
        let (king_file, rook_file) = side.target_files();
        let rank = king.rank();
        let king_to = Square::new(king_file, rank);
        let rook_to = Square::new(rook_file, rank);

        let files = [king.file(), rook.file(), king_to.file(), rook_to.file()];
        let low = files.iter().copied().min().unwrap_or(0);
        let high = files.iter().copied().max().unwrap_or(7);
        let path_clear = (low..=high)
            .map(|file| Square::new(file, rank))
            .all(|sq| sq == king || sq == rook || self.board.get(sq).is_none());
        if !path_clear {
            return false;
        }

        // Attacks are probed without our king so it cannot shield squares behind it.
        let mut probe = self.board;
        probe.set(king, None);
        let (from_file, to_file) = if king.file() <= king_to.file() {
            (king.file(), king_to.file())
        } else {
            (king_to.file(), king.file())
        };
        (from_file..=to_file)
            .map(|file| Square::new(file, rank))
            .all(|sq| !probe.is_attacked(sq, !us))
    }

    /// Play a move in place. The move must be legal.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let moved = self
            .board
            .get(mv.from)
            .unwrap_or_else(|| panic!("no piece on {} for move {}", mv.from, mv.to_uci(true)));
        let captured = apply_to_board(&mut self.board, mv, us);

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.rule50 = 0;
        } else {
            self.rule50 += 1;
        }

        if moved.kind == PieceKind::King {
            self.castling.clear(us);
        }
        self.castling.remove_rook(mv.from);
        self.castling.remove_rook(mv.to);

        self.ep_square = None;
        if us == !WHITE {
            self.fullmove += 1;
        }
        self.side_to_move = !us;

        let double_push = moved.kind == PieceKind::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2;
        if double_push {
            let skipped = Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2);
            self.ep_square = self.legal_ep_target(skipped);
        }
    }

    /// `target` if the side to move has a legal en passant capture onto it.
    #[must_use]
    pub fn legal_ep_target(&self, target: Square) -> Option<Square> {
        let us = self.side_to_move;
        let pawn = Some(Piece::new(us, PieceKind::Pawn));
        let behind = -pawn_push(us);
        let legal = [-1, 1]
            .into_iter()
            .filter_map(|df| target.offset(df, behind))
            .filter(|from| self.board.get(*from) == pawn)
            .any(|from| self.is_legal(Move::new(from, target, MoveKind::EnPassant)));
        legal.then_some(target)
    }

    /// Mirror ranks and swap colours, keeping clocks.
    #[must_use]
    pub fn flipped(&self) -> Position {
        Position {
            board: self.board.flipped(),
            side_to_move: !self.side_to_move,
            castling: self.castling.flipped(),
            ep_square: self.ep_square.map(Square::flip_rank),
            rule50: self.rule50,
            fullmove: self.fullmove,
        }
    }

    /// Check if neither side has enough material to mate.
    ///
    /// Covers bare kings, a single minor piece, and any number of bishops
    /// all on squares of one colour.
    #[must_use]
    pub fn has_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishop_colors = [false; 2];
        for (sq, piece) in self.board.pieces() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Knight => minors += 1,
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_colors[usize::from(sq.is_light())] = true;
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        let knights = self.board.count(Piece::new(WHITE, PieceKind::Knight))
            + self.board.count(Piece::new(!WHITE, PieceKind::Knight));
        minors <= 1 || (knights == 0 && !(bishop_colors[0] && bishop_colors[1]))
    }
}

/// Move pieces on `board` for `mv` played by `us`, returning any captured piece.
pub(crate) fn apply_to_board(board: &mut Board, mv: Move, us: Color) -> Option<Piece> {
    match mv.kind {
        MoveKind::Normal => {
            let piece = board.set(mv.from, None);
            board.set(mv.to, piece)
        }
        MoveKind::Promotion(kind) => {
            board.set(mv.from, None);
            board.set(mv.to, Some(Piece::new(us, kind)))
        }
        MoveKind::EnPassant => {
            let piece = board.set(mv.from, None);
            board.set(mv.to, piece);
            board.set(Square::new(mv.to.file(), mv.from.rank()), None)
        }
        MoveKind::Castling => {
            let side = if mv.is_king_side_castle() {
                CastlingSide::King
            } else {
                CastlingSide::Queen
            };
            let (king_file, rook_file) = side.target_files();
            let rank = mv.from.rank();
            let king = board.set(mv.from, None);
            let rook = board.set(mv.to, None);
            board.set(Square::new(king_file, rank), king);
            board.set(Square::new(rook_file, rank), rook);
            None
        }
    }
}
