//! `ChessState`: the chess family behind the `State` contract.

use im::Vector;
use log::{debug, trace};

use super::fen;
use super::moves::Move;
use super::notation::{self, SanFlags};
use super::planes::{self, PlaneContext};
use super::position::Position;
use super::types::{color_name, Color, Square, BLACK, WHITE};
use super::zobrist::position_key;
use crate::core::{Action, GameResult, Key, Result, RuleConfig, Side, TerminalType, Variant};
use crate::state::State;

/// Snapshot taken before each action, enough to undo it exactly.
#[derive(Clone, Debug, PartialEq)]
struct StateInfo {
    position: Position,
    key: Key,
    repetitions: u32,
    action: Action,
}

/// Chess, Chess960 and King of the Hill.
///
/// The history is an `im::Vector`, so cloning a state deep into a game
/// shares the snapshot storage structurally instead of copying it.
#[derive(Clone, Debug)]
pub struct ChessState {
    position: Position,
    variant: Variant,
    chess960: bool,
    key: Key,
    repetitions: u32,
    steps: u32,
    history: Vector<StateInfo>,
    rules: RuleConfig,
}

impl Default for ChessState {
    /// Standard chess from the start position.
    fn default() -> Self {
        let variant = Variant::default();
        let position = match fen::parse(variant.start_fen()) {
            Ok(position) => position,
            Err(err) => unreachable!("start position must parse: {err}"),
        };
        Self::rooted(position, variant, false, RuleConfig::default())
    }
}

impl ChessState {
    fn rooted(position: Position, variant: Variant, chess960: bool, rules: RuleConfig) -> Self {
        Self {
            key: position_key(&position, variant),
            position,
            variant,
            chess960,
            repetitions: 0,
            steps: 0,
            history: Vector::new(),
            rules,
        }
    }

    /// Create a state from a FEN (or `startpos`) and a variant id.
    ///
    /// # Errors
    ///
    /// Fails on an unknown variant id or an invalid description.
    pub fn from_description(description: &str, is_chess960: bool, variant: i32) -> Result<Self> {
        let mut state = Self::default();
        state.set(description, is_chess960, variant)?;
        Ok(state)
    }

    /// Replace the draw rules, keeping the position.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Check if the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.position.in_check()
    }

    /// Actions played since the episode root, oldest first.
    pub fn action_history(&self) -> impl Iterator<Item = Action> + '_ {
        self.history.iter().map(|info| info.action)
    }

    /// Colour whose king stands on the hill, in King of the Hill only.
    fn king_on_hill(&self) -> Option<Color> {
        if self.variant != Variant::KingOfTheHill {
            return None;
        }
        [WHITE, BLACK].into_iter().find(|&color| {
            self.position
                .board
                .king_square(color)
                .is_some_and(Square::is_center)
        })
    }

    fn legal_moves(&self) -> super::moves::MoveList {
        if self.king_on_hill().is_some() {
            return super::moves::MoveList::new();
        }
        self.position.legal_moves()
    }

    fn is_rule_draw(&self) -> bool {
        self.rules.is_fifty_move_draw(self.position.rule50)
            || self.rules.is_repetition_draw(self.repetitions)
            || (self.variant == Variant::Chess
                && self.rules.insufficient_material
                && self.position.has_insufficient_material())
    }

    fn draw_terminal(&self) -> TerminalType {
        if self.rules.draw_value == 0.0 {
            TerminalType::Draw
        } else {
            TerminalType::custom(self.rules.draw_value)
        }
    }

    /// Prior occurrences of the current key, looking back two plies at a
    /// time and no further than the last irreversible move.
    fn count_repetitions(&self) -> u32 {
        let len = self.history.len();
        let reach = (self.position.rule50 as usize).min(len);
        (2..=reach)
            .step_by(2)
            .filter_map(|back| self.history.get(len - back))
            .find(|info| info.key == self.key)
            .map_or(0, |info| info.repetitions + 1)
    }

    fn decode(&self, action: Action) -> Move {
        let mv = Move::from_action(action)
            .unwrap_or_else(|| panic!("{action} is not a chess move encoding"));
        let mover = self.position.board.get(mv.from);
        assert!(
            mover.is_some_and(|p| p.color == self.position.side_to_move),
            "{action} ({}) does not move a {} piece in '{}'",
            mv.to_uci(true),
            color_name(self.position.side_to_move),
            self.fen()
        );
        mv
    }
}

impl State for ChessState {
    const PLANE_SHAPE: [usize; 3] = [planes::NB_CHANNELS, planes::BOARD_HEIGHT, planes::BOARD_WIDTH];

    fn set(&mut self, description: &str, is_chess960: bool, variant: i32) -> Result<()> {
        let variant = Variant::try_from(variant)?;
        let position = fen::parse(description)?;
        *self = Self::rooted(position, variant, is_chess960, self.rules);
        debug!(
            "set {variant} position '{}' (chess960: {is_chess960}, key {:016x})",
            self.fen(),
            self.key
        );
        Ok(())
    }

    /// Legal actions in generation order: by origin square from a1, then
    /// by piece-specific direction order.
    fn legal_actions(&self) -> Vec<Action> {
        self.legal_moves().into_iter().map(Move::to_action).collect()
    }

    /// # Panics
    ///
    /// Panics if `action` does not decode to a move of a piece belonging to
    /// the side to move.
    fn do_action(&mut self, action: Action) {
        let mv = self.decode(action);
        trace!("do {} at step {}", mv.to_uci(self.chess960), self.steps);

        self.history.push_back(StateInfo {
            position: self.position,
            key: self.key,
            repetitions: self.repetitions,
            action,
        });
        self.position.make_move(mv);
        self.key = position_key(&self.position, self.variant);
        self.repetitions = self.count_repetitions();
        self.steps += 1;
    }

    /// # Panics
    ///
    /// Panics if `action` is not the most recent action of this episode.
    fn undo_action(&mut self, action: Action) {
        let last = self.history.last().map(|info| info.action);
        assert_eq!(
            last,
            Some(action),
            "undo of {action} does not match the most recent action"
        );
        if let Some(info) = self.history.pop_back() {
            self.position = info.position;
            self.key = info.key;
            self.repetitions = info.repetitions;
            self.steps -= 1;
        }
        trace!("undo {} back to step {}", self.action_to_uci(action), self.steps);
    }

    fn gives_check(&self, action: Action) -> bool {
        Move::from_action(action).is_some_and(|mv| self.position.gives_check(mv))
    }

    fn check_result(&self, in_check: bool) -> GameResult {
        if let Some(color) = self.king_on_hill() {
            return GameResult::win_for(color);
        }
        if self.position.legal_moves().is_empty() {
            return if in_check {
                GameResult::win_for(!self.position.side_to_move)
            } else {
                GameResult::Drawn
            };
        }
        if self.is_rule_draw() {
            GameResult::Drawn
        } else {
            GameResult::NoResult
        }
    }

    fn is_terminal(&self, number_legal_actions: usize, in_check: bool) -> TerminalType {
        if let Some(color) = self.king_on_hill() {
            return if color == self.position.side_to_move {
                TerminalType::Win
            } else {
                TerminalType::Loss
            };
        }
        if number_legal_actions == 0 {
            return if in_check {
                TerminalType::Loss
            } else {
                self.draw_terminal()
            };
        }
        if self.is_rule_draw() {
            self.draw_terminal()
        } else {
            TerminalType::None
        }
    }

    fn hash_key(&self) -> Key {
        self.key
    }

    fn number_repetitions(&self) -> u32 {
        self.repetitions
    }

    fn steps_from_null(&self) -> u32 {
        self.steps
    }

    fn side_to_move(&self) -> Side {
        self.position.side_to_move
    }

    fn is_chess960(&self) -> bool {
        self.chess960
    }

    fn fen(&self) -> String {
        fen::format(&self.position, self.chess960)
    }

    /// Mirror ranks and swap colours.
    ///
    /// The key is recomputed for the mirrored position. Repetition history
    /// does not survive the flip; the step counter does.
    fn flip(&mut self) {
        self.position = self.position.flipped();
        self.key = position_key(&self.position, self.variant);
        self.history.clear();
        self.repetitions = 0;
        debug!("flipped to '{}'", self.fen());
    }

    fn uci_to_action(&self, uci: &str) -> Result<Action> {
        let legal = self.legal_moves();
        notation::parse_uci(&self.position, &legal, uci, self.chess960).map(Move::to_action)
    }

    fn action_to_uci(&self, action: Action) -> String {
        Move::from_action(action).map_or_else(|| "0000".to_string(), |mv| mv.to_uci(self.chess960))
    }

    fn action_to_san(
        &self,
        action: Action,
        legal_actions: &[Action],
        leads_to_win: bool,
        is_book_move: bool,
    ) -> String {
        let Some(mv) = Move::from_action(action) else {
            return "--".to_string();
        };
        let legal: Vec<Move> = legal_actions.iter().copied().filter_map(Move::from_action).collect();
        let flags = SanFlags {
            leads_to_win,
            is_book_move,
        };
        notation::to_san(&self.position, mv, &legal, flags)
    }

    fn get_state_planes(&self, normalize: bool, planes: &mut [f32]) {
        let ctx = PlaneContext {
            repetitions: self.repetitions,
            variant: self.variant,
            chess960: self.chess960,
            normalize,
        };
        planes::write_planes(&self.position, ctx, planes);
    }
}

impl std::fmt::Display for ChessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, " +-----------------+")?;
        for rank in (0..8).rev() {
            write!(f, "{}| ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .position
                    .board
                    .get(Square::new(file, rank))
                    .map_or('.', |p| p.fen_char());
                write!(f, "{c} ")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, " +-----------------+")?;
        writeln!(f, "   a b c d e f g h")?;
        writeln!(f)?;
        writeln!(f, "Fen: {}", self.fen())?;
        writeln!(f, "Key: {:016X}", self.key)?;
        write!(f, "Variant: {}", self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::START_FEN;

    fn play(state: &mut ChessState, moves: &[&str]) {
        for uci in moves {
            let action = state.uci_to_action(uci).unwrap();
            state.do_action(action);
        }
    }

    #[test]
    fn test_default_is_start_position() {
        let state = ChessState::default();
        assert_eq!(state.fen(), START_FEN);
        assert_eq!(state.side_to_move(), WHITE);
        assert_eq!(state.steps_from_null(), 0);
        assert_eq!(state.variant(), Variant::Chess);
        assert!(!state.is_chess960());
    }

    #[test]
    fn test_repetitions_counted() {
        let mut state = ChessState::default();
        play(&mut state, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(state.number_repetitions(), 1);
        play(&mut state, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(state.number_repetitions(), 2);
        assert_eq!(state.check_result(false), GameResult::Drawn);
    }

    #[test]
    fn test_irreversible_move_cuts_repetitions() {
        let mut state = ChessState::default();
        play(&mut state, &["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"]);
        assert_eq!(state.number_repetitions(), 0);
    }

    #[test]
    fn test_undo_restores_snapshot() {
        let mut state = ChessState::default();
        play(&mut state, &["e2e4", "d7d5"]);
        let fen = state.fen();
        let key = state.hash_key();

        let action = state.uci_to_action("e4d5").unwrap();
        state.do_action(action);
        state.undo_action(action);

        assert_eq!(state.fen(), fen);
        assert_eq!(state.hash_key(), key);
        assert_eq!(state.steps_from_null(), 2);
    }

    #[test]
    #[should_panic(expected = "most recent action")]
    fn test_undo_mismatch_panics() {
        let mut state = ChessState::default();
        let e4 = state.uci_to_action("e2e4").unwrap();
        let d4 = state.uci_to_action("d2d4").unwrap();
        state.do_action(e4);
        state.undo_action(d4);
    }

    #[test]
    #[should_panic(expected = "does not move a white piece")]
    fn test_do_action_wrong_side_panics() {
        let mut state = ChessState::default();
        let e5 = Move::normal(Square::parse("e7").unwrap(), Square::parse("e5").unwrap());
        state.do_action(e5.to_action());
    }

    #[test]
    fn test_action_history() {
        let mut state = ChessState::default();
        play(&mut state, &["e2e4", "e7e5"]);
        let uci: Vec<_> = state
            .action_history()
            .map(|a| state.action_to_uci(a))
            .collect();
        assert_eq!(uci, vec!["e2e4", "e7e5"]);
    }

    #[test]
    fn test_display_contains_fen() {
        let state = ChessState::default();
        let text = state.to_string();
        assert!(text.contains("8| r n b q k b n r |"));
        assert!(text.contains(&format!("Fen: {START_FEN}")));
    }
}
