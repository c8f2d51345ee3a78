//! # rust-variant-state
//!
//! A game-state contract for tree search over turn-based, perfect-information
//! variants, plus a chess-family implementation of it.
//!
//! ## Design Principles
//!
//! 1. **Static Dispatch**: The search driver is generic over `S: State`.
//!    Every state operation is monomorphized; no trait objects on the
//!    per-node path.
//!
//! 2. **Exclusive Ownership**: A state belongs to one tree node or scratch
//!    copy at a time. Hypothetical exploration goes through `Clone`.
//!
//! 3. **Exact Rollback**: `do_action` followed by `undo_action` restores
//!    every observable property, key and repetition count included.
//!
//! ## Architecture
//!
//! - **Terminal Values in the Type**: `TerminalType::Custom(f32)` carries
//!   graduated outcomes alongside loss/draw/win.
//!
//! - **Persistent History**: `im::Vector` keeps clones of long episodes cheap.
//!
//! ## Modules
//!
//! - `core`: Actions, keys, sides, terminal outcomes, configuration, errors
//! - `state`: The `State` contract
//! - `games`: Variant implementations (chess, Chess960, King of the Hill)
//! - `nn`: Plane encoding into owned tensors
//! - `explore`: Perft and random playouts written against `State`

pub mod core;
pub mod explore;
pub mod games;
pub mod nn;
pub mod state;

// Re-export commonly used types
pub use crate::core::{
    Action, GameResult, Key, PlayoutRng, Result, RuleConfig, Side, SideMap, StateError,
    TerminalType, Variant,
};

pub use crate::state::State;

pub use crate::games::chess::ChessState;

pub use crate::nn::{EncodedState, PlaneEncoder, StateEncoder};

pub use crate::explore::{divide, perft, random_playout, PerftCache, Playout};
