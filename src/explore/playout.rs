//! Uniformly random playouts.

use log::debug;

use crate::core::{Action, GameResult, PlayoutRng, TerminalType};
use crate::state::State;

/// Outcome of a random playout.
#[derive(Clone, Debug)]
pub struct Playout<S> {
    /// State at the end of the playout.
    pub state: S,
    /// Terminal classification of `state` for its side to move, or
    /// `TerminalType::None` when the ply limit cut the game short.
    pub terminal: TerminalType,
    /// Absolute result of `state`.
    pub result: GameResult,
    /// Actions played, in order.
    pub actions: Vec<Action>,
}

impl<S> Playout<S> {
    #[must_use]
    pub fn plies(&self) -> usize {
        self.actions.len()
    }
}

/// Play random legal actions from a clone of `state` until the game ends or
/// `max_plies` actions have been played.
///
/// `in_check` is the check status of `state` itself, as the search driver
/// tracks it: the `gives_check` of the action that led to `state`.
pub fn random_playout<S: State>(
    state: &S,
    in_check: bool,
    rng: &mut PlayoutRng,
    max_plies: usize,
) -> Playout<S> {
    let mut state = state.clone();
    let mut in_check = in_check;
    let mut actions = Vec::new();

    let terminal = loop {
        let legal = state.legal_actions();
        let terminal = state.is_terminal(legal.len(), in_check);
        if terminal.is_terminal() || actions.len() >= max_plies {
            break terminal;
        }
        let Some(&action) = rng.choose(&legal) else {
            break terminal;
        };
        in_check = state.gives_check(action);
        state.do_action(action);
        actions.push(action);
    };

    let result = state.check_result(in_check);
    debug!(
        "playout ended after {} plies with {terminal:?} ({})",
        actions.len(),
        result.pgn()
    );
    Playout {
        state,
        terminal,
        result,
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::ChessState;

    #[test]
    fn test_playout_is_deterministic() {
        let start = ChessState::default();
        let a = random_playout(&start, false, &mut PlayoutRng::new(7), 60);
        let b = random_playout(&start, false, &mut PlayoutRng::new(7), 60);

        assert_eq!(a.actions, b.actions);
        assert_eq!(a.state.hash_key(), b.state.hash_key());
        assert!(a.plies() <= 60);
        // The source state is untouched.
        assert_eq!(start.steps_from_null(), 0);
    }

    #[test]
    fn test_playout_respects_ply_limit() {
        let start = ChessState::default();
        let playout = random_playout(&start, false, &mut PlayoutRng::new(1), 0);

        assert_eq!(playout.plies(), 0);
        assert_eq!(playout.terminal, TerminalType::None);
        assert_eq!(playout.result, GameResult::NoResult);
    }

    #[test]
    fn test_playout_replays_through_undo() {
        let start = ChessState::default();
        let mut playout = random_playout(&start, false, &mut PlayoutRng::new(99), 40);

        for &action in playout.actions.iter().rev() {
            playout.state.undo_action(action);
        }
        assert_eq!(playout.state.fen(), start.fen());
        assert_eq!(playout.state.hash_key(), start.hash_key());
    }

    #[test]
    fn test_playout_from_terminal_state() {
        let mated = ChessState::from_description(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            false,
            0,
        )
        .unwrap();
        let playout = random_playout(&mated, true, &mut PlayoutRng::new(3), 100);

        assert_eq!(playout.plies(), 0);
        assert_eq!(playout.terminal, TerminalType::Loss);
        assert_eq!(playout.result, GameResult::SecondPlayerWin);
    }
}
