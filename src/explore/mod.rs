//! Generic consumers of the state contract.
//!
//! Written once against `State`, like a search driver would be, and used
//! to verify and benchmark variant implementations.

pub mod perft;
pub mod playout;

pub use perft::{divide, perft, PerftCache};
pub use playout::{random_playout, Playout};
