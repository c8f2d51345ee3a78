//! Zobrist keys for chess positions.
//!
//! Keys are drawn once per process from a fixed ChaCha8 seed, so a given
//! position hashes to the same value in every run and on every platform.

use std::sync::LazyLock;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::position::Position;
use super::types::{Color, WHITE};
use crate::core::{Key, Variant};

const KEY_SEED: u64 = 0x5EED_C4E5_5000_0001;

// ============================================================================
// Key Tables
// ============================================================================

/// Pre-computed random keys.
pub struct ZobristKeys {
    /// Indexed by [colour][piece kind][square].
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XORed in when the second player is to move.
    pub side_to_move: u64,
    /// Indexed by the square of the rook a castling right refers to.
    pub castling: [u64; 64],
    /// Indexed by the file of a recorded en passant square.
    pub ep_file: [u64; 8],
    /// Indexed by variant id.
    pub variant: [u64; 2],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(KEY_SEED);
        let mut keys = ZobristKeys {
            pieces: [[[0; 64]; 6]; 2],
            side_to_move: 0,
            castling: [0; 64],
            ep_file: [0; 8],
            variant: [0; 2],
        };

        for color in keys.pieces.iter_mut() {
            for kind in color.iter_mut() {
                kind.iter_mut().for_each(|k| *k = rng.next_u64());
            }
        }
        keys.side_to_move = rng.next_u64();
        keys.castling.iter_mut().for_each(|k| *k = rng.next_u64());
        keys.ep_file.iter_mut().for_each(|k| *k = rng.next_u64());
        // The default variant hashes to zero so plain chess keys carry no variant term.
        keys.variant[1] = rng.next_u64();

        keys
    }

    /// Key contribution of a piece on a square.
    #[must_use]
    pub fn piece(&self, color: Color, kind_index: usize, square_index: usize) -> u64 {
        self.pieces[color.index()][kind_index][square_index]
    }
}

/// Process-wide key tables, built on first use.
pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

/// Compute the key of a position from scratch.
///
/// Everything that decides the legal continuations enters the key: piece
/// placement, side to move, castling rights, a capturable en passant square
/// and the variant. Clocks do not.
#[must_use]
pub fn position_key(position: &Position, variant: Variant) -> Key {
    let keys = &*ZOBRIST;
    let mut key = 0;

    for (sq, piece) in position.board.pieces() {
        key ^= keys.piece(piece.color, piece.kind.index(), sq.index());
    }
    if position.side_to_move != WHITE {
        key ^= keys.side_to_move;
    }
    for (_, _, rook) in position.castling.iter() {
        key ^= keys.castling[rook.index()];
    }
    if let Some(ep) = position.ep_square {
        key ^= keys.ep_file[usize::from(ep.file())];
    }
    key ^ keys.variant[variant.id() as usize]
}
