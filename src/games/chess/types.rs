//! Board primitives: colours, pieces, squares and the mailbox board.

use crate::core::Side;

/// Piece colour. White moves first.
pub type Color = Side;

/// White (the first player).
pub const WHITE: Color = Side::First;

/// Black (the second player).
pub const BLACK: Color = Side::Second;

/// Colour name as used in chess.
#[must_use]
pub const fn color_name(color: Color) -> &'static str {
    match color {
        Side::First => "white",
        Side::Second => "black",
    }
}

/// Kind of a chess piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All kinds in plane order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// 0-based index in plane order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse a piece letter, either case.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase piece letter.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    fn is_diagonal_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen)
    }

    fn is_straight_slider(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Queen)
    }
}

/// A coloured piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Parse a FEN piece letter (uppercase = white).
    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() { WHITE } else { BLACK };
        Some(Self::new(color, kind))
    }

    /// FEN piece letter (uppercase = white).
    #[must_use]
    pub fn fen_char(self) -> char {
        let c = self.kind.to_char();
        if self.color == WHITE {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Same kind, other colour.
    #[must_use]
    pub const fn recolored(self) -> Self {
        Self::new(self.color.opposite(), self.kind)
    }
}

/// A board square, a1 = 0 through h8 = 63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Create a square from 0-based file and rank.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if file or rank is outside 0..8.
    #[must_use]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Self(rank * 8 + file)
    }

    /// Create a square from its 0..64 index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Self(index as u8)
    }

    /// Iterate over all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// Step by a file/rank delta, or `None` when leaving the board.
    #[must_use]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Mirror across the horizontal axis (a1 <-> a8).
    #[must_use]
    pub const fn flip_rank(self) -> Square {
        Square(self.0 ^ 56)
    }

    /// The square as seen from `color`'s side of the board.
    #[must_use]
    pub const fn relative_to(self, color: Color) -> Square {
        match color {
            Side::First => self,
            Side::Second => self.flip_rank(),
        }
    }

    /// Parse algebraic coordinates such as `e4`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a').filter(|f| *f < 8)?;
        let rank = bytes[1].checked_sub(b'1').filter(|r| *r < 8)?;
        Some(Square::new(file, rank))
    }

    /// File letter, `a` through `h`.
    #[must_use]
    pub fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    /// Rank digit, `1` through `8`.
    #[must_use]
    pub fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }

    /// Check if the square is one of the four centre squares.
    #[must_use]
    pub fn is_center(self) -> bool {
        (3..=4).contains(&self.file()) && (3..=4).contains(&self.rank())
    }

    /// Check if the square is a light square.
    #[must_use]
    pub fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

pub(crate) const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(crate) const STRAIGHT_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Rank direction pawns of `color` move in.
#[must_use]
pub(crate) const fn pawn_push(color: Color) -> i8 {
    match color {
        Side::First => 1,
        Side::Second => -1,
    }
}

/// 64-square mailbox board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with no pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self { squares: [None; 64] }
    }

    /// Get the piece on a square.
    #[must_use]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Put a piece on (or clear) a square, returning what was there.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.index()], piece)
    }

    /// Iterate over occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (Square::from_index(i), p)))
    }

    /// Count pieces matching `piece`.
    #[must_use]
    pub fn count(&self, piece: Piece) -> usize {
        self.squares.iter().filter(|p| **p == Some(piece)).count()
    }

    /// Find the king of `color`.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces().find(|(_, p)| *p == king).map(|(sq, _)| sq)
    }

    /// Check if `sq` is attacked by any piece of colour `by`.
    #[must_use]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        // A pawn attacks diagonally forward, so look one rank behind from its point of view.
        let behind = -pawn_push(by);
        let pawn = Some(Piece::new(by, PieceKind::Pawn));
        if [-1, 1]
            .into_iter()
            .filter_map(|df| sq.offset(df, behind))
            .any(|from| self.get(from) == pawn)
        {
            return true;
        }

        let knight = Some(Piece::new(by, PieceKind::Knight));
        if KNIGHT_STEPS
            .iter()
            .filter_map(|&(df, dr)| sq.offset(df, dr))
            .any(|from| self.get(from) == knight)
        {
            return true;
        }

        let king = Some(Piece::new(by, PieceKind::King));
        if KING_STEPS
            .iter()
            .filter_map(|&(df, dr)| sq.offset(df, dr))
            .any(|from| self.get(from) == king)
        {
            return true;
        }

        let slider = |dirs: &[(i8, i8)], is_slider: fn(PieceKind) -> bool| {
            dirs.iter().any(|&(df, dr)| {
                match self.first_piece_along(sq, df, dr) {
                    Some(piece) => piece.color == by && is_slider(piece.kind),
                    None => false,
                }
            })
        };

        slider(&STRAIGHT_DIRS, PieceKind::is_straight_slider)
            || slider(&DIAGONAL_DIRS, PieceKind::is_diagonal_slider)
    }

    /// Check if the king of `color` is attacked.
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked(king, color.opposite()))
    }

    fn first_piece_along(&self, from: Square, df: i8, dr: i8) -> Option<Piece> {
        let mut sq = from;
        while let Some(next) = sq.offset(df, dr) {
            if let Some(piece) = self.get(next) {
                return Some(piece);
            }
            sq = next;
        }
        None
    }

    /// Mirror ranks and swap piece colours.
    #[must_use]
    pub fn flipped(&self) -> Board {
        let mut board = Board::empty();
        for (sq, piece) in self.pieces() {
            board.set(sq.flip_rank(), Some(piece.recolored()));
        }
        board
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let c = self
                    .get(Square::new(file, rank))
                    .map_or('.', Piece::fen_char);
                write!(f, "{c}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}
