//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! Two-player identifier. The first player moves first from the standard
//! start position (white in chess).
//!
//! ## SideMap
//!
//! Fixed two-entry storage indexed by `Side`, for O(1) per-side access
//! without heap allocation.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Not};

/// The side to move, or the owner of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// First player (white in chess).
    First,
    /// Second player (black in chess).
    Second,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::First, Side::Second];

    /// Get the 0-based index (`First` = 0).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// Get the side for a 0-based index. Only the lowest bit is used.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        if index & 1 == 0 {
            Side::First
        } else {
            Side::Second
        }
    }

    /// Get the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use variant_state::core::{Side, SideMap};
///
/// let mut castled: SideMap<bool> = SideMap::with_value(false);
/// castled[Side::Second] = true;
///
/// assert!(!castled[Side::First]);
/// assert!(castled[Side::Second]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map from the first and second side's values.
    pub const fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Return the map with both entries exchanged.
    #[must_use]
    pub fn swapped(self) -> Self {
        let [first, second] = self.data;
        Self::new(second, first)
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
