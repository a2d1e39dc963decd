//! Node representation for the self-organizing map.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A node in the self-organizing map.
///
/// Each node has a fixed position on the 2D grid and a weight vector of
/// the dataset's feature dimensionality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Row position on the grid.
    pub row: usize,
    /// Column position on the grid.
    pub col: usize,
    /// Weight vector pulled toward the feature distribution during training.
    pub weights: Vec<f64>,
}

impl Node {
    /// Creates a new node with weights drawn independently and uniformly
    /// from `[0, 1)`.
    ///
    /// Components are consumed from `rng` in feature-index order, so the
    /// caller controls the overall draw sequence across the grid.
    pub fn new_random<R: Rng>(row: usize, col: usize, feature_dim: usize, rng: &mut R) -> Self {
        let weights: Vec<f64> = (0..feature_dim).map(|_| rng.gen::<f64>()).collect();
        Self { row, col, weights }
    }

    /// Creates a new node with the given weights.
    pub fn new_with_weights(row: usize, col: usize, weights: Vec<f64>) -> Self {
        Self { row, col, weights }
    }

    /// Computes the squared Euclidean distance between this node's weights
    /// and an input vector.
    #[inline]
    pub fn distance_squared(&self, input: &[f64]) -> f64 {
        debug_assert_eq!(
            self.weights.len(),
            input.len(),
            "weight and input dimensions must match"
        );

        self.weights
            .iter()
            .zip(input.iter())
            .map(|(w, x)| (w - x) * (w - x))
            .sum()
    }

    /// Computes the Manhattan grid distance to the cell at `(row, col)`.
    #[inline]
    pub fn grid_distance(&self, row: usize, col: usize) -> usize {
        self.row.abs_diff(row) + self.col.abs_diff(col)
    }

    /// Pulls the node's weights toward an input vector by `learning_rate`.
    pub fn update_weights(&mut self, input: &[f64], learning_rate: f64) {
        for (w, x) in self.weights.iter_mut().zip(input.iter()) {
            *w += learning_rate * (x - *w);
        }
    }
}
