//! Core value types: actions, keys, sides, terminal outcomes, configuration, errors.
//!
//! Everything here is variant-agnostic. Variants give meaning to actions and
//! keys; the search driver only moves these values around.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod side;
pub mod terminal;

pub use action::{Action, Key};
pub use config::{RuleConfig, Variant, START_FEN};
pub use error::{Result, StateError};
pub use rng::PlayoutRng;
pub use side::{Side, SideMap};
pub use terminal::{GameResult, TerminalType};
