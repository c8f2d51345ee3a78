//! The state contract every variant implements.
//!
//! The search driver is written once against `State` and instantiated per
//! variant type, so every call below resolves at compile time. There are no
//! trait objects on the per-node path.
//!
//! ## Implementation Notes
//!
//! - `do_action` / `undo_action`: exact rollback. After a do/undo pair the
//!   state must agree with the original on legal actions, key, side to move
//!   and repetition count.
//! - `hash_key`: identical for positions equal in every rules-relevant
//!   respect, whatever the move order that reached them.
//! - `is_terminal` / `check_result`: terminality is derived, never stored.
//! - `Clone`: the only sanctioned way to explore hypothetically. A clone
//!   shares no mutable storage with its original.

use crate::core::{Action, GameResult, Key, Result, Side, TerminalType};

/// Game state contract for tree search.
///
/// A state is owned by exactly one component at a time (a tree node, a
/// scratch clone, a game loop). Operations are synchronous and must not be
/// called concurrently on the same instance; parallel search gives each
/// branch its own clone.
///
/// ## Example
///
/// ```
/// use variant_state::games::chess::ChessState;
/// use variant_state::state::State;
///
/// fn count_terminal_replies<S: State>(state: &S) -> usize {
///     state
///         .legal_actions()
///         .into_iter()
///         .filter(|&a| state.leads_to_terminal(a))
///         .count()
/// }
///
/// let state = ChessState::default();
/// assert_eq!(state.legal_actions().len(), 20);
/// assert_eq!(count_terminal_replies(&state), 0);
/// ```
pub trait State: Clone + std::fmt::Display {
    /// Shape of the plane encoding: (channels, height, width).
    const PLANE_SHAPE: [usize; 3];

    /// Number of floats written by `get_state_planes`.
    const NB_VALUES_TOTAL: usize =
        Self::PLANE_SHAPE[0] * Self::PLANE_SHAPE[1] * Self::PLANE_SHAPE[2];

    // ========================================================================
    // EPISODE SETUP
    // ========================================================================

    /// Replace the whole state from a textual description.
    ///
    /// Resets the key, repetition history and step count as for a fresh
    /// episode rooted at `description`. On error the state is left exactly
    /// as it was.
    ///
    /// # Arguments
    /// * `description` - Variant-specific notation (e.g. FEN)
    /// * `is_chess960` - Enable non-standard start position rules
    /// * `variant` - Integer variant selector
    fn set(&mut self, description: &str, is_chess960: bool, variant: i32) -> Result<()>;

    // ========================================================================
    // TRAVERSAL
    // ========================================================================

    /// Every legal action, in an order the variant defines.
    ///
    /// Empty iff the side to move has no legal action. Callers must not
    /// assume a canonical order.
    fn legal_actions(&self) -> Vec<Action>;

    /// Apply a legal action in place.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `action` was not legal in this state.
    /// Passing an illegal action is a caller bug, never a recoverable error.
    fn do_action(&mut self, action: Action);

    /// Revert the most recent `do_action(action)`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `action` is not the most recent action.
    fn undo_action(&mut self, action: Action);

    /// Check whether `action` would give check, without mutating the state.
    fn gives_check(&self, action: Action) -> bool;

    // ========================================================================
    // TERMINAL DETECTION
    // ========================================================================

    /// Absolute result of the current state, or `NoResult` if the game goes on.
    ///
    /// `in_check` tells mate from stalemate when no legal action exists; it
    /// is `gives_check` of the action that led here.
    fn check_result(&self, in_check: bool) -> GameResult;

    /// Terminal classification from the side to move's perspective.
    ///
    /// Takes the already computed legal action count and check status so
    /// the search driver never generates moves twice.
    fn is_terminal(&self, number_legal_actions: usize, in_check: bool) -> TerminalType;

    /// Check whether applying `action` would end the game, leaving `self`
    /// untouched.
    ///
    /// Check status is taken on the clone before the action is applied:
    /// `gives_check` is defined on the state preceding the action, while
    /// `check_result` is defined on the state following it.
    fn leads_to_terminal(&self, action: Action) -> bool {
        let mut probe = self.clone();
        let gives_check = probe.gives_check(action);
        probe.do_action(action);
        probe.check_result(gives_check) != GameResult::NoResult
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Transposition key of the current semantic position.
    fn hash_key(&self) -> Key;

    /// Prior occurrences of the current position in this episode.
    fn number_repetitions(&self) -> u32;

    /// Actions applied since the episode was rooted by `set`.
    fn steps_from_null(&self) -> u32;

    /// Side to move.
    fn side_to_move(&self) -> Side;

    /// Check if non-standard start position rules are active.
    fn is_chess960(&self) -> bool;

    /// Textual description of the current state, accepted by `set`.
    fn fen(&self) -> String;

    /// Check if `action` is legal in the current state.
    fn is_legal(&self, action: Action) -> bool {
        self.legal_actions().contains(&action)
    }

    // ========================================================================
    // SYMMETRY
    // ========================================================================

    /// Mirror the state along the board's symmetry axis, in place.
    ///
    /// Legal actions before and after are in bijection under the mirrored
    /// coordinates. The key is updated consistently with the variant's own
    /// symmetry convention.
    fn flip(&mut self);

    // ========================================================================
    // NOTATION
    // ========================================================================

    /// Parse a move in UCI notation into an action legal in this state.
    fn uci_to_action(&self, uci: &str) -> Result<Action>;

    /// Format an action in UCI notation.
    fn action_to_uci(&self, action: Action) -> String;

    /// Format an action in SAN for the current position.
    ///
    /// `leads_to_win` and `is_book_move` only affect annotation, never the
    /// move itself.
    fn action_to_san(
        &self,
        action: Action,
        legal_actions: &[Action],
        leads_to_win: bool,
        is_book_move: bool,
    ) -> String;

    // ========================================================================
    // NEURAL NETWORK INPUT
    // ========================================================================

    /// Write the plane encoding into caller-owned memory.
    ///
    /// Writes exactly `NB_VALUES_TOTAL` floats, row-major in `PLANE_SHAPE`.
    ///
    /// # Panics
    ///
    /// Panics if `planes` holds fewer than `NB_VALUES_TOTAL` floats.
    fn get_state_planes(&self, normalize: bool, planes: &mut [f32]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateError;

    /// Take-away game: remove 1-3 stones, whoever takes the last stone ends
    /// the game. Finishing with an odd take "checks" and wins outright;
    /// finishing with an even take is a graduated outcome.
    #[derive(Clone, Debug)]
    struct TakeAway {
        pile: u32,
        side: Side,
        steps: u32,
    }

    impl TakeAway {
        fn new(pile: u32) -> Self {
            Self {
                pile,
                side: Side::First,
                steps: 0,
            }
        }
    }

    impl std::fmt::Display for TakeAway {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "pile {} ({} to move)", self.pile, self.side)
        }
    }

    impl State for TakeAway {
        const PLANE_SHAPE: [usize; 3] = [2, 1, 1];

        fn set(&mut self, description: &str, _is_chess960: bool, _variant: i32) -> Result<()> {
            let pile = description
                .parse()
                .map_err(|_| StateError::invalid_description(description, "expected pile size"))?;
            *self = Self::new(pile);
            Ok(())
        }

        fn legal_actions(&self) -> Vec<Action> {
            (1..=self.pile.min(3) as i32).map(Action::new).collect()
        }

        fn do_action(&mut self, action: Action) {
            self.pile -= action.raw() as u32;
            self.side = !self.side;
            self.steps += 1;
        }

        fn undo_action(&mut self, action: Action) {
            self.pile += action.raw() as u32;
            self.side = !self.side;
            self.steps -= 1;
        }

        fn gives_check(&self, action: Action) -> bool {
            action.raw() as u32 == self.pile && action.raw() % 2 == 1
        }

        fn check_result(&self, in_check: bool) -> GameResult {
            match (self.pile, in_check) {
                (0, true) => GameResult::win_for(!self.side),
                (0, false) => GameResult::Drawn,
                _ => GameResult::NoResult,
            }
        }

        fn is_terminal(&self, number_legal_actions: usize, in_check: bool) -> TerminalType {
            match (number_legal_actions, in_check) {
                (0, true) => TerminalType::Loss,
                (0, false) => TerminalType::custom(0.25),
                _ => TerminalType::None,
            }
        }

        fn hash_key(&self) -> Key {
            (u64::from(self.pile) << 1) | self.side.index() as u64
        }

        fn number_repetitions(&self) -> u32 {
            0
        }

        fn steps_from_null(&self) -> u32 {
            self.steps
        }

        fn side_to_move(&self) -> Side {
            self.side
        }

        fn is_chess960(&self) -> bool {
            false
        }

        fn fen(&self) -> String {
            self.pile.to_string()
        }

        fn flip(&mut self) {
            self.side = !self.side;
        }

        fn uci_to_action(&self, uci: &str) -> Result<Action> {
            let take: i32 = uci.parse().map_err(|_| StateError::MalformedNotation {
                notation: uci.to_string(),
            })?;
            let action = Action::new(take);
            if self.is_legal(action) {
                Ok(action)
            } else {
                Err(StateError::IllegalMove {
                    notation: uci.to_string(),
                    fen: self.fen(),
                })
            }
        }

        fn action_to_uci(&self, action: Action) -> String {
            action.raw().to_string()
        }

        fn action_to_san(&self, action: Action, _: &[Action], leads_to_win: bool, _: bool) -> String {
            let suffix = if leads_to_win { "#" } else { "" };
            format!("-{}{}", action.raw(), suffix)
        }

        fn get_state_planes(&self, _normalize: bool, planes: &mut [f32]) {
            planes[0] = self.pile as f32;
            planes[1] = self.side.index() as f32;
        }
    }

    #[test]
    fn test_nb_values_total_default() {
        assert_eq!(TakeAway::NB_VALUES_TOTAL, 2);
    }

    #[test]
    fn test_leads_to_terminal_does_not_mutate() {
        let state = TakeAway::new(3);
        let key = state.hash_key();

        assert!(state.leads_to_terminal(Action::new(3)));
        assert!(!state.leads_to_terminal(Action::new(1)));

        assert_eq!(state.hash_key(), key);
        assert_eq!(state.steps_from_null(), 0);
    }

    #[test]
    fn test_check_status_taken_before_action() {
        let mut state = TakeAway::new(3);
        let gives_check = state.gives_check(Action::new(3));
        assert!(gives_check);

        state.do_action(Action::new(3));
        // After the move the pile is empty and a post-move gives_check would be false.
        assert!(!state.gives_check(Action::new(3)));
        assert_eq!(state.check_result(gives_check), GameResult::FirstPlayerWin);
    }

    #[test]
    fn test_custom_terminal() {
        let mut state = TakeAway::new(2);
        let gives_check = state.gives_check(Action::new(2));
        state.do_action(Action::new(2));

        let terminal = state.is_terminal(state.legal_actions().len(), gives_check);
        assert_eq!(terminal, TerminalType::Custom(0.25));
        assert_eq!(terminal.value(), Some(0.25));
    }

    #[test]
    fn test_is_legal() {
        let state = TakeAway::new(2);
        assert!(state.is_legal(Action::new(2)));
        assert!(!state.is_legal(Action::new(3)));
        assert!(!state.is_legal(Action::NONE));
    }

    #[test]
    fn test_set_rejects_garbage_and_keeps_state() {
        let mut state = TakeAway::new(5);
        assert!(state.set("lots", false, 0).is_err());
        assert_eq!(state.fen(), "5");

        state.set("7", false, 0).unwrap();
        assert_eq!(state.fen(), "7");
    }

    #[test]
    fn test_uci_to_action() {
        let state = TakeAway::new(2);
        assert_eq!(state.uci_to_action("2"), Ok(Action::new(2)));
        assert!(matches!(state.uci_to_action("x"), Err(StateError::MalformedNotation { .. })));
        assert!(matches!(state.uci_to_action("3"), Err(StateError::IllegalMove { .. })));
    }
}
