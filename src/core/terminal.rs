//! Terminal classification and absolute game results.
//!
//! Two distinct vocabularies:
//!
//! - `TerminalType` is relative to the side to move ("am I lost?"), and is
//!   what the search driver turns into a node value.
//! - `GameResult` is absolute ("who won?"), and is what a game loop records.

use serde::{Deserialize, Serialize};

use super::side::Side;

/// Terminal classification from the perspective of the side to move.
///
/// `Custom` carries a finite value the search driver uses directly instead
/// of a fixed loss/draw/win score, for variants with graduated outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TerminalType {
    /// The side to move has lost.
    Loss,
    /// The game is drawn.
    Draw,
    /// The side to move has won.
    Win,
    /// Terminal with a variant-defined value.
    Custom(f32),
    /// Not terminal.
    None,
}

impl TerminalType {
    /// Create a custom terminal classification.
    ///
    /// # Panics
    ///
    /// Panics if `value` is NaN or infinite.
    #[must_use]
    pub fn custom(value: f32) -> Self {
        assert!(value.is_finite(), "custom terminal value must be finite, got {value}");
        Self::Custom(value)
    }

    /// Check if this classification denotes a finished game.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, TerminalType::None)
    }

    /// Node value for the side to move: -1 / 0 / +1, or the custom value.
    ///
    /// Returns `None` for non-terminal states.
    #[must_use]
    pub fn value(self) -> Option<f32> {
        match self {
            TerminalType::Loss => Some(-1.0),
            TerminalType::Draw => Some(0.0),
            TerminalType::Win => Some(1.0),
            TerminalType::Custom(value) => Some(value),
            TerminalType::None => None,
        }
    }

    /// The same outcome seen from the other side.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            TerminalType::Loss => TerminalType::Win,
            TerminalType::Win => TerminalType::Loss,
            TerminalType::Custom(value) => TerminalType::Custom(-value),
            other => other,
        }
    }
}

/// Absolute outcome of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Neither side won.
    Drawn,
    /// The first player (white) won.
    FirstPlayerWin,
    /// The second player (black) won.
    SecondPlayerWin,
    /// The game is not over.
    NoResult,
}

impl GameResult {
    /// Result for a win by `side`.
    #[must_use]
    pub const fn win_for(side: Side) -> Self {
        match side {
            Side::First => GameResult::FirstPlayerWin,
            Side::Second => GameResult::SecondPlayerWin,
        }
    }

    /// Check if the game is over.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameResult::NoResult)
    }

    /// Get the winning side, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            GameResult::FirstPlayerWin => Some(Side::First),
            GameResult::SecondPlayerWin => Some(Side::Second),
            GameResult::Drawn | GameResult::NoResult => None,
        }
    }

    /// Translate into a terminal classification relative to `side`.
    #[must_use]
    pub fn terminal_for(self, side: Side) -> TerminalType {
        match self {
            GameResult::Drawn => TerminalType::Draw,
            GameResult::NoResult => TerminalType::None,
            won => {
                if won.winner() == Some(side) {
                    TerminalType::Win
                } else {
                    TerminalType::Loss
                }
            }
        }
    }

    /// PGN result token.
    #[must_use]
    pub const fn pgn(self) -> &'static str {
        match self {
            GameResult::Drawn => "1/2-1/2",
            GameResult::FirstPlayerWin => "1-0",
            GameResult::SecondPlayerWin => "0-1",
            GameResult::NoResult => "*",
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.pgn())
    }
}
