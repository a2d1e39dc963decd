//! The map grid: a rows x cols lattice of weight-vector nodes.

use crate::error::{Result, SomGridError};
use crate::som::Node;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A self-organizing map grid.
///
/// Nodes are stored in row-major order. Weights are randomized once at
/// construction from the caller's seeded generator; afterwards only the
/// training loop mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomMap {
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns.
    pub cols: usize,
    /// Weight vector dimensionality.
    pub feature_dim: usize,
    /// The nodes in the grid (row-major order).
    pub nodes: Vec<Node>,
}

impl SomMap {
    /// Creates a new map with randomly initialized weights.
    ///
    /// Weight components are drawn uniformly from `[0, 1)` in row-major,
    /// then column-major, then feature-index order, so two maps built
    /// from generators in the same state start identically.
    pub fn random<R: Rng>(rows: usize, cols: usize, feature_dim: usize, rng: &mut R) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(SomGridError::InvalidArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        if feature_dim == 0 {
            return Err(SomGridError::DimensionMismatch {
                expected: 1,
                found: 0,
            });
        }

        let nodes: Vec<Node> = (0..rows * cols)
            .map(|i| Node::new_random(i / cols, i % cols, feature_dim, rng))
            .collect();

        Ok(Self {
            rows,
            cols,
            feature_dim,
            nodes,
        })
    }

    /// Returns the total number of nodes.
    #[inline]
    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Gets a node by its 1D row-major index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Gets a node by its 2D position.
    #[inline]
    pub fn get_at(&self, row: usize, col: usize) -> Option<&Node> {
        if row < self.rows && col < self.cols {
            Some(&self.nodes[row * self.cols + col])
        } else {
            None
        }
    }

    /// Finds the best matching unit for an input vector.
    ///
    /// The BMU is the node whose weight vector has minimum squared
    /// Euclidean distance to the input. All nodes are scanned in
    /// row-major order and the first strict minimum wins, so ties always
    /// resolve to the earliest-encountered node.
    pub fn find_bmu(&self, input: &[f64]) -> Result<(usize, usize)> {
        if input.len() != self.feature_dim {
            return Err(SomGridError::DimensionMismatch {
                expected: self.feature_dim,
                found: input.len(),
            });
        }

        let mut best_index = 0;
        let mut best_dist = f64::INFINITY;
        for (index, node) in self.nodes.iter().enumerate() {
            let dist = node.distance_squared(input);
            if dist < best_dist {
                best_dist = dist;
                best_index = index;
            }
        }

        Ok(self.index_to_coords(best_index))
    }

    /// Updates every node within `range` Manhattan grid distance of the
    /// BMU, pulling its weights toward the input by `learning_rate`.
    ///
    /// The scan deliberately visits the full grid; the neighborhood test
    /// does the limiting.
    pub fn update_neighborhood(
        &mut self,
        input: &[f64],
        bmu: (usize, usize),
        learning_rate: f64,
        range: usize,
    ) {
        let (bmu_row, bmu_col) = bmu;
        for node in &mut self.nodes {
            if node.grid_distance(bmu_row, bmu_col) <= range {
                node.update_weights(input, learning_rate);
            }
        }
    }

    /// Converts a 1D row-major index to 2D coordinates.
    #[inline]
    pub fn index_to_coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Converts 2D coordinates to a 1D row-major index.
    #[inline]
    pub fn coords_to_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Exports the weight grid as a row-major matrix, one row per node.
    ///
    /// Intended for caller-side visualization of the trained map.
    pub fn weight_matrix(&self) -> Vec<Vec<f64>> {
        self.nodes.iter().map(|node| node.weights.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_map(rows: usize, cols: usize, feature_dim: usize) -> SomMap {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        SomMap::random(rows, cols, feature_dim, &mut rng).unwrap()
    }

    #[test]
    fn test_map_creation() {
        let map = test_map(4, 6, 3);
        assert_eq!(map.rows, 4);
        assert_eq!(map.cols, 6);
        assert_eq!(map.total_nodes(), 24);
        assert_eq!(map.feature_dim, 3);
    }

    #[test]
    fn test_node_positions() {
        let map = test_map(3, 5, 2);
        for i in 0..map.total_nodes() {
            let node = map.get(i).unwrap();
            assert_eq!(node.row, i / 5);
            assert_eq!(node.col, i % 5);
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            SomMap::random(0, 4, 3, &mut rng),
            Err(SomGridError::InvalidArgument(_))
        ));
        assert!(matches!(
            SomMap::random(4, 0, 3, &mut rng),
            Err(SomGridError::InvalidArgument(_))
        ));
        assert!(matches!(
            SomMap::random(4, 4, 0, &mut rng),
            Err(SomGridError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_deterministic_initialization() {
        let a = test_map(5, 5, 7);
        let b = test_map(5, 5, 7);
        for (na, nb) in a.nodes.iter().zip(b.nodes.iter()) {
            assert_eq!(na.weights, nb.weights);
        }
    }

    #[test]
    fn test_find_bmu() {
        let mut map = test_map(4, 4, 3);
        map.nodes[5].weights = vec![10.0, 10.0, 10.0];

        let bmu = map.find_bmu(&[10.0, 10.0, 10.0]).unwrap();
        assert_eq!(bmu, (1, 1));
    }

    #[test]
    fn test_find_bmu_tie_breaks_to_scan_order() {
        let mut map = test_map(2, 2, 2);
        for node in &mut map.nodes {
            node.weights = vec![0.5, 0.5];
        }

        // All four nodes are equidistant; the first in row-major order wins.
        let bmu = map.find_bmu(&[0.0, 0.0]).unwrap();
        assert_eq!(bmu, (0, 0));
    }

    #[test]
    fn test_find_bmu_dimension_mismatch() {
        let map = test_map(2, 2, 3);
        let err = map.find_bmu(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            SomGridError::DimensionMismatch { expected: 3, found: 2 }
        ));
    }

    #[test]
    fn test_update_neighborhood_range_zero() {
        let mut map = test_map(3, 3, 2);
        for node in &mut map.nodes {
            node.weights = vec![0.0, 0.0];
        }

        map.update_neighborhood(&[1.0, 1.0], (1, 1), 0.5, 0);

        let center = map.coords_to_index(1, 1);
        for (i, node) in map.nodes.iter().enumerate() {
            if i == center {
                assert!((node.weights[0] - 0.5).abs() < 1e-12);
            } else {
                assert_eq!(node.weights, &[0.0, 0.0]);
            }
        }
    }

    #[test]
    fn test_update_neighborhood_range_one() {
        let mut map = test_map(3, 3, 1);
        for node in &mut map.nodes {
            node.weights = vec![0.0];
        }

        map.update_neighborhood(&[1.0], (1, 1), 1.0, 1);

        // Center plus the four orthogonal neighbors move; corners do not.
        for node in &map.nodes {
            let touched = node.grid_distance(1, 1) <= 1;
            assert_eq!(node.weights[0] != 0.0, touched, "node ({},{})", node.row, node.col);
        }
    }

    #[test]
    fn test_coordinate_conversion() {
        let map = test_map(4, 6, 2);
        assert_eq!(map.index_to_coords(10), (1, 4));
        assert_eq!(map.coords_to_index(1, 4), 10);
    }

    #[test]
    fn test_weight_matrix_shape() {
        let map = test_map(2, 3, 4);
        let matrix = map.weight_matrix();
        assert_eq!(matrix.len(), 6);
        assert!(matrix.iter().all(|row| row.len() == 4));
        assert_eq!(matrix[5], map.get_at(1, 2).unwrap().weights);
    }
}
