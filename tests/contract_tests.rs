//! State contract integration tests using ChessState.

use variant_state::core::{GameResult, RuleConfig, Side, StateError, TerminalType};
use variant_state::games::chess::ChessState;
use variant_state::state::State;
use variant_state::Action;

const FOOLS_MATE: [&str; 3] = ["f2f3", "e7e5", "g2g4"];
const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

fn play(state: &mut ChessState, moves: &[&str]) {
    for uci in moves {
        let action = state.uci_to_action(uci).unwrap();
        state.do_action(action);
    }
}

fn from_fen(fen: &str) -> ChessState {
    ChessState::from_description(fen, false, 0).unwrap()
}

// =============================================================================
// Traversal
// =============================================================================

#[test]
fn test_start_position_actions() {
    let state = ChessState::default();
    let actions = state.legal_actions();

    assert_eq!(actions.len(), 20);
    assert!(!actions.contains(&Action::NONE));
    assert_eq!(state.side_to_move(), Side::First);
    assert_eq!(state.number_repetitions(), 0);
}

#[test_log::test]
fn test_do_undo_round_trip() {
    let mut state = ChessState::default();
    play(&mut state, &["e2e4", "c7c5", "g1f3"]);

    for action in state.legal_actions() {
        let fen = state.fen();
        let key = state.hash_key();
        let actions = state.legal_actions();

        state.do_action(action);
        assert_eq!(state.steps_from_null(), 4);
        state.undo_action(action);

        assert_eq!(state.fen(), fen);
        assert_eq!(state.hash_key(), key);
        assert_eq!(state.legal_actions(), actions);
        assert_eq!(state.number_repetitions(), 0);
        assert_eq!(state.steps_from_null(), 3);
    }
}

#[test]
fn test_clone_is_independent() {
    let mut original = ChessState::default();
    play(&mut original, &["d2d4"]);
    let fen = original.fen();

    let mut copy = original.clone();
    play(&mut copy, &["d7d5", "c2c4"]);

    assert_eq!(original.fen(), fen);
    assert_eq!(original.steps_from_null(), 1);
    assert_eq!(copy.steps_from_null(), 3);

    // Unwinding the clone leaves the original's history alone.
    let actions: Vec<Action> = copy.action_history().collect();
    for &action in actions.iter().rev() {
        copy.undo_action(action);
    }
    assert_eq!(copy.fen(), variant_state::core::START_FEN);
    assert_eq!(original.fen(), fen);
    assert_eq!(original.action_history().count(), 1);
}

#[test]
fn test_hash_invariant_under_transposition() {
    let mut a = ChessState::default();
    play(&mut a, &["e2e4", "e7e6", "d2d4"]);
    let mut b = ChessState::default();
    play(&mut b, &["d2d4", "e7e6", "e2e4"]);

    assert_eq!(a.hash_key(), b.hash_key());
    assert_eq!(a.hash_key(), from_fen(&a.fen()).hash_key());
}

#[test]
fn test_gives_check_matches_result() {
    let mut state = from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let check = state.uci_to_action("a1a8").unwrap();
    let quiet = state.uci_to_action("a1a7").unwrap();

    assert!(state.gives_check(check));
    assert!(!state.gives_check(quiet));

    state.do_action(check);
    assert!(state.in_check());
}

// =============================================================================
// Terminal Detection
// =============================================================================

#[test]
fn test_fools_mate() {
    let mut state = ChessState::default();
    play(&mut state, &FOOLS_MATE);

    let mate = state.uci_to_action("d8h4").unwrap();
    assert!(state.gives_check(mate));
    assert!(state.leads_to_terminal(mate));
    assert_eq!(state.steps_from_null(), 3);

    let in_check = state.gives_check(mate);
    state.do_action(mate);

    assert!(state.legal_actions().is_empty());
    assert_eq!(state.check_result(in_check), GameResult::SecondPlayerWin);
    assert_eq!(state.is_terminal(0, in_check), TerminalType::Loss);
}

#[test]
fn test_stalemate() {
    let state = from_fen(STALEMATE);

    assert!(state.legal_actions().is_empty());
    assert!(!state.in_check());
    assert_eq!(state.check_result(false), GameResult::Drawn);
    assert_eq!(state.is_terminal(0, false), TerminalType::Draw);
}

#[test]
fn test_stalemate_reached_by_move() {
    let mut state = from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");
    let action = state.uci_to_action("f1f7").unwrap();

    assert!(!state.gives_check(action));
    assert!(state.leads_to_terminal(action));
    state.do_action(action);
    assert_eq!(state.fen(), "7k/5Q2/6K1/8/8/8/8/8 b - - 1 1");
    assert_eq!(state.check_result(false), GameResult::Drawn);
}

#[test_log::test]
fn test_threefold_repetition() {
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    let mut state = ChessState::default();
    play(&mut state, &shuffle);
    assert_eq!(state.number_repetitions(), 1);
    assert_eq!(state.check_result(false), GameResult::NoResult);

    play(&mut state, &shuffle[..3]);
    let last = state.uci_to_action("f6g8").unwrap();
    assert!(state.leads_to_terminal(last));

    state.do_action(last);
    assert_eq!(state.number_repetitions(), 2);
    assert_eq!(state.check_result(false), GameResult::Drawn);
    assert_eq!(
        state.is_terminal(state.legal_actions().len(), false),
        TerminalType::Draw
    );

    state.undo_action(last);
    assert_eq!(state.number_repetitions(), 1);
}

#[test]
fn test_repetition_rule_can_be_disabled() {
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    let mut state = ChessState::default().with_rules(RuleConfig::default().with_repetition_limit(0));
    play(&mut state, &shuffle);
    play(&mut state, &shuffle);

    assert_eq!(state.number_repetitions(), 2);
    assert_eq!(state.check_result(false), GameResult::NoResult);
}

#[test]
fn test_fifty_move_rule() {
    let mut state = from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 99 80");
    let action = state.uci_to_action("a1a2").unwrap();
    assert!(state.leads_to_terminal(action));
    state.do_action(action);

    assert_eq!(state.check_result(false), GameResult::Drawn);
    assert_eq!(state.is_terminal(state.legal_actions().len(), false), TerminalType::Draw);

    // A pawn move resets the clock.
    let fresh = from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 99 80");
    let pawn = fresh.uci_to_action("e2e3").unwrap();
    assert!(!fresh.leads_to_terminal(pawn));
}

#[test]
fn test_insufficient_material() {
    let mut state = from_fen("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1");
    let capture = state.uci_to_action("e1d2").unwrap();
    assert!(state.leads_to_terminal(capture));
    state.do_action(capture);

    assert_eq!(state.check_result(false), GameResult::Drawn);

    let relaxed = RuleConfig::default().with_insufficient_material(false);
    let bare = state.clone().with_rules(relaxed);
    assert_eq!(bare.check_result(false), GameResult::NoResult);
}

#[test]
fn test_draw_value_reports_custom_terminal() {
    let rules = RuleConfig::default().with_draw_value(-0.25);
    let state = from_fen(STALEMATE).with_rules(rules);

    assert_eq!(state.check_result(false), GameResult::Drawn);
    let terminal = state.is_terminal(0, false);
    assert_eq!(terminal, TerminalType::Custom(-0.25));
    assert_eq!(terminal.value(), Some(-0.25));
}

#[test]
fn test_leads_to_terminal_leaves_state_untouched() {
    let mut state = ChessState::default();
    play(&mut state, &FOOLS_MATE);
    let fen = state.fen();
    let key = state.hash_key();

    let terminal: Vec<Action> = state
        .legal_actions()
        .into_iter()
        .filter(|&a| state.leads_to_terminal(a))
        .collect();

    assert_eq!(terminal, vec![state.uci_to_action("d8h4").unwrap()]);
    assert_eq!(state.fen(), fen);
    assert_eq!(state.hash_key(), key);
    assert_eq!(state.steps_from_null(), 3);
}

// =============================================================================
// King of the Hill
// =============================================================================

#[test]
fn test_king_of_the_hill() {
    let fen = "4k3/p7/8/8/8/4K3/P7/8 w - - 0 1";
    let chess = ChessState::from_description(fen, false, 0).unwrap();
    let mut koth = ChessState::from_description(fen, false, 1).unwrap();

    let to_hill = koth.uci_to_action("e3e4").unwrap();
    assert!(!chess.leads_to_terminal(to_hill));
    assert!(koth.leads_to_terminal(to_hill));
    assert_ne!(chess.hash_key(), koth.hash_key());

    koth.do_action(to_hill);
    assert!(koth.legal_actions().is_empty());
    assert_eq!(koth.check_result(false), GameResult::FirstPlayerWin);
    assert_eq!(koth.is_terminal(0, false), TerminalType::Loss);
    assert!(matches!(
        koth.uci_to_action("e8d8"),
        Err(StateError::IllegalMove { .. })
    ));

    koth.undo_action(to_hill);
    assert_eq!(koth.legal_actions().len(), chess.legal_actions().len());
}

// =============================================================================
// Setup, Flip, Planes
// =============================================================================

#[test]
fn test_set_resets_episode() {
    let mut state = ChessState::default();
    play(&mut state, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(state.number_repetitions(), 1);

    state.set("startpos", false, 0).unwrap();
    assert_eq!(state.steps_from_null(), 0);
    assert_eq!(state.number_repetitions(), 0);
    assert_eq!(state.hash_key(), ChessState::default().hash_key());
}

#[test]
fn test_failed_set_leaves_state_unchanged() {
    let mut state = ChessState::default();
    play(&mut state, &["e2e4", "e7e5"]);
    let fen = state.fen();
    let key = state.hash_key();

    assert!(matches!(
        state.set("not a position", false, 0),
        Err(StateError::InvalidDescription { .. })
    ));
    assert_eq!(state.set("startpos", false, 7), Err(StateError::UnknownVariant(7)));

    assert_eq!(state.fen(), fen);
    assert_eq!(state.hash_key(), key);
    assert_eq!(state.steps_from_null(), 2);

    // The episode is still live and can be unwound.
    let e5 = state.action_history().last().unwrap();
    state.undo_action(e5);
    assert_eq!(state.steps_from_null(), 1);
}

#[test_log::test]
fn test_flip() {
    let mut state = ChessState::default();
    play(&mut state, &["e2e4"]);
    let fen = state.fen();
    let key = state.hash_key();

    state.flip();
    assert_eq!(state.fen(), "rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(state.side_to_move(), Side::First);
    assert_eq!(state.legal_actions().len(), 20);
    assert_eq!(state.steps_from_null(), 1);
    assert_eq!(state.number_repetitions(), 0);
    assert_eq!(state.hash_key(), from_fen(&state.fen()).hash_key());

    state.flip();
    assert_eq!(state.fen(), fen);
    assert_eq!(state.hash_key(), key);
}

#[test]
fn test_state_planes_write_exactly() {
    let state = ChessState::default();
    let total = ChessState::NB_VALUES_TOTAL;
    assert_eq!(ChessState::PLANE_SHAPE, [25, 8, 8]);
    assert_eq!(total, 1600);

    let mut buffer = vec![-7.0f32; total + 3];
    state.get_state_planes(true, &mut buffer);

    assert!(buffer[..total].iter().all(|v| v.is_finite() && *v >= 0.0));
    assert_eq!(&buffer[total..], &[-7.0, -7.0, -7.0]);

    let mut again = vec![0.0f32; total];
    state.get_state_planes(true, &mut again);
    assert_eq!(&buffer[..total], &again[..]);
}

#[test]
fn test_states_move_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChessState>();

    let mut state = ChessState::default();
    play(&mut state, &["e2e4"]);
    let handle = std::thread::spawn(move || state.legal_actions().len());
    assert_eq!(handle.join().unwrap(), 20);
}
