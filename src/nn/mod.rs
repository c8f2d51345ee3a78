//! Neural network input encoding.
//!
//! Inference itself lives outside this crate. This module only turns states
//! into owned tensors through `State::get_state_planes`.
//!
//! ## Usage
//!
//! ```
//! use variant_state::games::chess::ChessState;
//! use variant_state::nn::{PlaneEncoder, StateEncoder};
//!
//! let encoder = PlaneEncoder::default();
//! let encoded = encoder.encode(&ChessState::default());
//! assert_eq!(encoded.shape, vec![25, 8, 8]);
//! ```

pub mod encoder;
pub mod traits;

pub use encoder::{PlaneEncoder, StateEncoder};
pub use traits::EncodedState;
