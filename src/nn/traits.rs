//! Tensor container handed to neural network collaborators.

use serde::{Deserialize, Serialize};

/// Row-major `f32` tensor with its shape.
///
/// A single state is `[channels, height, width]`; a batch prepends the
/// batch size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    pub tensor: Vec<f32>,
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Wrap an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if `tensor.len()` differs from the product of `shape`.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "tensor length must match shape product {shape:?}"
        );
        Self { tensor, shape }
    }

    /// All-zero tensor of the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self::new(vec![0.0; len], shape)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Value at a flat row-major index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    /// Slice of one entry along the leading axis (a plane of a single
    /// state, or a whole state of a batch).
    #[must_use]
    pub fn outer(&self, index: usize) -> Option<&[f32]> {
        let leading = *self.shape.first()?;
        if index >= leading {
            return None;
        }
        let stride = self.tensor.len() / leading;
        Some(&self.tensor[index * stride..(index + 1) * stride])
    }
}
