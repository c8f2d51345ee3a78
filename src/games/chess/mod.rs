//! Chess family: standard chess, Chess960 and King of the Hill.
//!
//! ## Overview
//!
//! - **Board**: `types` (squares, pieces, mailbox board, attacks)
//! - **Moves**: `moves` (action encoding), `position` (generation and make)
//! - **Text**: `fen`, `notation` (SAN, UCI)
//! - **Search support**: `zobrist` keys, `planes` network input
//! - **Contract**: `ChessState`
//!
//! ## Usage
//!
//! ```
//! use variant_state::games::chess::ChessState;
//! use variant_state::state::State;
//!
//! let mut state = ChessState::default();
//! let e4 = state.uci_to_action("e2e4").unwrap();
//! state.do_action(e4);
//!
//! assert_eq!(state.action_to_uci(e4), "e2e4");
//! assert_eq!(state.steps_from_null(), 1);
//! ```

pub mod fen;
pub mod moves;
pub mod notation;
pub mod planes;
pub mod position;
pub mod state;
pub mod types;
pub mod zobrist;

pub use moves::{Move, MoveKind};
pub use position::{CastlingRights, CastlingSide, Position};
pub use state::ChessState;
pub use types::{Board, Color, Piece, PieceKind, Square, BLACK, WHITE};
