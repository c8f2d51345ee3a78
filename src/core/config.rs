//! Variant selection and rule configuration.
//!
//! - `Variant`: which rule set a state follows, selected by integer id at
//!   `set` time.
//! - `RuleConfig`: tunable draw rules shared by every variant.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::StateError;

/// Standard chess start position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Rule set of a state.
///
/// The integer ids are part of the `set` interface and never change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Standard chess. Combine with the Chess960 flag for random start positions.
    #[default]
    Chess,
    /// Chess where moving your king to d4, e4, d5 or e5 wins immediately.
    KingOfTheHill,
}

impl Variant {
    /// All supported variants.
    pub const ALL: [Variant; 2] = [Variant::Chess, Variant::KingOfTheHill];

    /// Integer selector used by `State::set`.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Variant::Chess => 0,
            Variant::KingOfTheHill => 1,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Chess => "chess",
            Variant::KingOfTheHill => "kingofthehill",
        }
    }

    /// Start position of the variant.
    #[must_use]
    pub const fn start_fen(self) -> &'static str {
        match self {
            Variant::Chess | Variant::KingOfTheHill => START_FEN,
        }
    }
}

impl TryFrom<i32> for Variant {
    type Error = StateError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Variant::ALL
            .into_iter()
            .find(|v| v.id() == id)
            .ok_or(StateError::UnknownVariant(id))
    }
}

impl FromStr for Variant {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chess" | "standard" => Ok(Variant::Chess),
            "kingofthehill" | "koth" => Ok(Variant::KingOfTheHill),
            _ => Err(StateError::UnknownVariantName(s.to_string())),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Draw rules applied by `is_terminal` and `check_result`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Occurrences of the same position that end the game in a draw
    /// (default: 3, i.e. three-fold repetition). 0 disables the rule.
    pub repetition_limit: u32,

    /// Plies without capture or pawn move that end the game in a draw
    /// (default: 100, the fifty-move rule). 0 disables the rule.
    pub fifty_move_plies: u32,

    /// Declare positions where neither side can mate drawn (default: true).
    /// Only consulted by variants where material decides mating potential.
    pub insufficient_material: bool,

    /// Value reported for drawn positions, from the side to move.
    /// 0.0 reports `TerminalType::Draw`; anything else reports
    /// `TerminalType::Custom(draw_value)`.
    pub draw_value: f32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            repetition_limit: 3,
            fifty_move_plies: 100,
            insufficient_material: true,
            draw_value: 0.0,
        }
    }
}

impl RuleConfig {
    /// Set the repetition limit.
    pub fn with_repetition_limit(mut self, limit: u32) -> Self {
        self.repetition_limit = limit;
        self
    }

    /// Set the no-progress limit in plies.
    pub fn with_fifty_move_plies(mut self, plies: u32) -> Self {
        self.fifty_move_plies = plies;
        self
    }

    /// Enable or disable insufficient-material draws.
    pub fn with_insufficient_material(mut self, enabled: bool) -> Self {
        self.insufficient_material = enabled;
        self
    }

    /// Set the draw value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not finite.
    pub fn with_draw_value(mut self, value: f32) -> Self {
        assert!(value.is_finite(), "draw value must be finite");
        self.draw_value = value;
        self
    }

    /// Check if a position seen `repetitions` times before is a draw.
    #[must_use]
    pub fn is_repetition_draw(&self, repetitions: u32) -> bool {
        self.repetition_limit > 0 && repetitions + 1 >= self.repetition_limit
    }

    /// Check if `rule50` plies without progress is a draw.
    #[must_use]
    pub fn is_fifty_move_draw(&self, rule50: u32) -> bool {
        self.fifty_move_plies > 0 && rule50 >= self.fifty_move_plies
    }
}
