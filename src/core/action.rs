//! Action and position-key representation.
//!
//! An action is an opaque integer in the variant's own encoding. The search
//! driver never interprets it: it only stores actions as tree edges and
//! hands them back to the state that produced them.

use serde::{Deserialize, Serialize};

/// Fixed-width key identifying a semantic position.
///
/// Used for transposition lookups and repetition counting. Stable for the
/// lifetime of the process, not cryptographically strong.
pub type Key = u64;

/// A discrete move identifier.
///
/// Actions are only meaningful relative to the state they were generated
/// from; the same integer may denote different moves in different states.
///
/// ## Example
///
/// ```
/// use variant_state::core::Action;
///
/// let action = Action::new(796);
/// assert!(!action.is_none());
/// assert_eq!(action.raw(), 796);
///
/// assert!(Action::NONE.is_none());
/// assert_eq!(Action::default(), Action::NONE);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Action(pub i32);

impl Action {
    /// Reserved sentinel meaning "no action". Never produced by move generation.
    pub const NONE: Action = Action(0);

    /// Wrap a raw action value.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Get the raw integer value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Check if this is the `NONE` sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl From<i32> for Action {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "Action(none)")
        } else {
            write!(f, "Action({})", self.0)
        }
    }
}
