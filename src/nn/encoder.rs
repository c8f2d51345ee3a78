//! State encoding for neural network input.
//!
//! Encoders wrap `State::get_state_planes` so callers get owned tensors
//! with their shape attached, one state or a whole batch at a time.

use crate::nn::traits::EncodedState;
use crate::state::State;

/// Encodes states of a variant into tensors.
pub trait StateEncoder<S: State> {
    /// Encode one state.
    fn encode(&self, state: &S) -> EncodedState;

    /// Shape of a single encoded state.
    fn output_shape(&self) -> Vec<usize>;

    /// Encode several states into one `[batch, ...]` tensor.
    fn encode_batch(&self, states: &[S]) -> EncodedState {
        let mut shape = vec![states.len()];
        shape.extend(self.output_shape());
        let tensor = states
            .iter()
            .flat_map(|state| self.encode(state).tensor)
            .collect();
        EncodedState::new(tensor, shape)
    }
}

/// Encoder that uses the variant's own plane layout.
#[derive(Clone, Copy, Debug)]
pub struct PlaneEncoder {
    normalize: bool,
}

impl Default for PlaneEncoder {
    fn default() -> Self {
        Self { normalize: true }
    }
}

impl PlaneEncoder {
    /// Create an encoder. With `normalize`, unbounded counters are scaled
    /// to roughly [0, 1].
    pub fn new(normalize: bool) -> Self {
        Self { normalize }
    }

    #[must_use]
    pub fn normalize(&self) -> bool {
        self.normalize
    }
}

impl<S: State> StateEncoder<S> for PlaneEncoder {
    fn encode(&self, state: &S) -> EncodedState {
        let mut tensor = vec![0.0; S::NB_VALUES_TOTAL];
        state.get_state_planes(self.normalize, &mut tensor);
        EncodedState::new(tensor, S::PLANE_SHAPE.to_vec())
    }

    fn output_shape(&self) -> Vec<usize> {
        S::PLANE_SHAPE.to_vec()
    }

    /// Writes every state straight into one preallocated buffer.
    fn encode_batch(&self, states: &[S]) -> EncodedState {
        let mut tensor = vec![0.0; states.len() * S::NB_VALUES_TOTAL];
        for (state, chunk) in states.iter().zip(tensor.chunks_exact_mut(S::NB_VALUES_TOTAL)) {
            state.get_state_planes(self.normalize, chunk);
        }
        let mut shape = vec![states.len()];
        shape.extend(S::PLANE_SHAPE);
        EncodedState::new(tensor, shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::ChessState;

    #[test]
    fn test_plane_encoder_shape() {
        let encoder = PlaneEncoder::default();
        let encoded = encoder.encode(&ChessState::default());

        assert_eq!(encoded.shape, vec![25, 8, 8]);
        assert_eq!(encoded.len(), ChessState::NB_VALUES_TOTAL);
        // Own pawns on the second rank.
        assert_eq!(encoded.outer(0).unwrap().iter().sum::<f32>(), 8.0);
    }

    #[test]
    fn test_batch_matches_single() {
        let encoder = PlaneEncoder::new(false);
        let mut moved = ChessState::default();
        let e4 = moved.uci_to_action("e2e4").unwrap();
        moved.do_action(e4);
        let states = vec![ChessState::default(), moved];

        let batch = encoder.encode_batch(&states);
        assert_eq!(batch.shape, vec![2, 25, 8, 8]);
        assert_eq!(batch.outer(0).unwrap(), &encoder.encode(&states[0]).tensor[..]);
        assert_eq!(batch.outer(1).unwrap(), &encoder.encode(&states[1]).tensor[..]);
    }

    #[test]
    fn test_empty_batch() {
        let batch = StateEncoder::<ChessState>::encode_batch(&PlaneEncoder::default(), &[]);
        assert_eq!(batch.shape, vec![0, 25, 8, 8]);
        assert!(batch.is_empty());
    }
}
