//! Variant implementations of the state contract.

pub mod chess;
