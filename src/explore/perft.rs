//! Move path enumeration over the state contract.
//!
//! Perft counts the leaves of the legal action tree to a fixed depth. Known
//! counts for reference positions pin down move generation, and running it
//! through `do_action`/`undo_action` exercises exact rollback at every node.

use rustc_hash::FxHashMap;

use crate::core::{Action, Key};
use crate::state::State;

/// Count leaf nodes `depth` plies below `state`.
///
/// `state` is mutated during the walk and restored before returning.
pub fn perft<S: State>(state: &mut S, depth: usize) -> u64 {
    let actions = state.legal_actions();
    match depth {
        0 => 1,
        1 => actions.len() as u64,
        _ => actions
            .into_iter()
            .map(|action| {
                state.do_action(action);
                let nodes = perft(state, depth - 1);
                state.undo_action(action);
                nodes
            })
            .sum(),
    }
}

/// Per-action leaf counts at the root, in legal action order.
pub fn divide<S: State>(state: &mut S, depth: usize) -> Vec<(Action, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    state
        .legal_actions()
        .into_iter()
        .map(|action| {
            state.do_action(action);
            let nodes = perft(state, depth - 1);
            state.undo_action(action);
            (action, nodes)
        })
        .collect()
}

/// Perft with a transposition table keyed by (position key, depth).
#[derive(Debug, Default)]
pub struct PerftCache {
    table: FxHashMap<(Key, usize), u64>,
    hits: u64,
}

impl PerftCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count leaf nodes, reusing counts of transposed subtrees.
    pub fn perft<S: State>(&mut self, state: &mut S, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let entry = (state.hash_key(), depth);
        if let Some(&nodes) = self.table.get(&entry) {
            self.hits += 1;
            return nodes;
        }

        let actions = state.legal_actions();
        let nodes = if depth == 1 {
            actions.len() as u64
        } else {
            let mut nodes = 0;
            for action in actions {
                state.do_action(action);
                nodes += self.perft(state, depth - 1);
                state.undo_action(action);
            }
            nodes
        };
        self.table.insert(entry, nodes);
        nodes
    }

    /// Number of stored subtree counts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of lookups answered from the table.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
    }
}
