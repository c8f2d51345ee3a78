//! Neural network input planes.
//!
//! 25 channels of 8x8, always from the side to move's point of view: the
//! board is mirrored when the second player is to move, so "own" pieces
//! start on the bottom ranks.
//!
//! | channel | content |
//! |---------|---------|
//! | 0-5     | own pawn, knight, bishop, rook, queen, king |
//! | 6-11    | opponent pieces, same order |
//! | 12-13   | position seen at least once / twice before |
//! | 14      | colour: 1 when the first player is to move |
//! | 15      | full-move number |
//! | 16-19   | castling: own king side, own queen side, opponent king side, opponent queen side |
//! | 20      | no-progress (fifty-move) counter |
//! | 21      | en passant square |
//! | 22      | Chess960 |
//! | 23-24   | variant one-hot |

use super::position::{CastlingSide, Position};
use crate::core::Variant;

pub const NB_CHANNELS: usize = 25;
pub const BOARD_HEIGHT: usize = 8;
pub const BOARD_WIDTH: usize = 8;
pub const PLANE_SIZE: usize = BOARD_HEIGHT * BOARD_WIDTH;
pub const NB_VALUES_TOTAL: usize = NB_CHANNELS * PLANE_SIZE;

const CHANNEL_REPETITION: usize = 12;
const CHANNEL_COLOR: usize = 14;
const CHANNEL_MOVE_COUNT: usize = 15;
const CHANNEL_CASTLING: usize = 16;
const CHANNEL_NO_PROGRESS: usize = 20;
const CHANNEL_EP: usize = 21;
const CHANNEL_CHESS960: usize = 22;
const CHANNEL_VARIANT: usize = 23;

/// Divisor for the full-move number when normalizing.
pub const MAX_FULL_MOVES: f32 = 500.0;
/// Divisor for the no-progress counter when normalizing.
pub const MAX_NO_PROGRESS: f32 = 40.0;

/// Inputs beyond the position itself.
#[derive(Clone, Copy, Debug)]
pub struct PlaneContext {
    pub repetitions: u32,
    pub variant: Variant,
    pub chess960: bool,
    pub normalize: bool,
}

/// Write the planes of `position` into `planes`.
///
/// # Panics
///
/// Panics if `planes` is shorter than `NB_VALUES_TOTAL`.
pub fn write_planes(position: &Position, ctx: PlaneContext, planes: &mut [f32]) {
    assert!(
        planes.len() >= NB_VALUES_TOTAL,
        "plane buffer holds {} floats, need {NB_VALUES_TOTAL}",
        planes.len()
    );
    let planes = &mut planes[..NB_VALUES_TOTAL];
    planes.fill(0.0);

    let us = position.side_to_move;
    for (sq, piece) in position.board.pieces() {
        let offset = if piece.color == us { 0 } else { 6 };
        let cell = sq.relative_to(us).index();
        planes[(offset + piece.kind.index()) * PLANE_SIZE + cell] = 1.0;
    }

    let fill = |planes: &mut [f32], channel: usize, value: f32| {
        planes[channel * PLANE_SIZE..(channel + 1) * PLANE_SIZE].fill(value);
    };

    if ctx.repetitions >= 1 {
        fill(planes, CHANNEL_REPETITION, 1.0);
    }
    if ctx.repetitions >= 2 {
        fill(planes, CHANNEL_REPETITION + 1, 1.0);
    }
    if us == super::types::WHITE {
        fill(planes, CHANNEL_COLOR, 1.0);
    }

    let (move_count, no_progress) = if ctx.normalize {
        (
            position.fullmove as f32 / MAX_FULL_MOVES,
            position.rule50 as f32 / MAX_NO_PROGRESS,
        )
    } else {
        (position.fullmove as f32, position.rule50 as f32)
    };
    fill(planes, CHANNEL_MOVE_COUNT, move_count);
    fill(planes, CHANNEL_NO_PROGRESS, no_progress);

    for (i, (color, side)) in [
        (us, CastlingSide::King),
        (us, CastlingSide::Queen),
        (!us, CastlingSide::King),
        (!us, CastlingSide::Queen),
    ]
    .into_iter()
    .enumerate()
    {
        if position.castling.rook(color, side).is_some() {
            fill(planes, CHANNEL_CASTLING + i, 1.0);
        }
    }

    if let Some(ep) = position.ep_square {
        planes[CHANNEL_EP * PLANE_SIZE + ep.relative_to(us).index()] = 1.0;
    }
    if ctx.chess960 {
        fill(planes, CHANNEL_CHESS960, 1.0);
    }
    fill(planes, CHANNEL_VARIANT + ctx.variant.id() as usize, 1.0);
}
