//! State contract for tree search.
//!
//! Variants implement `State` to expose:
//! - Legal actions and reversible mutation (`do_action` / `undo_action`)
//! - Terminal detection (`is_terminal`, `check_result`, `leads_to_terminal`)
//! - Transposition identity and repetition counting
//! - Notation and neural network plane encoding
//!
//! The search driver calls into `State` but never interprets
//! variant-specific concepts directly.

pub mod contract;

pub use contract::State;
