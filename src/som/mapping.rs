//! Post-training data-to-cell mapping and majority-label aggregation.

use crate::dataset::DataSet;
use crate::error::{Result, SomGridError};
use crate::som::SomMap;
use serde::{Deserialize, Serialize};

/// Label reported for grid cells with no assigned records.
pub const EMPTY_CELL_LABEL: i64 = -1;

/// Assignment of every dataset index to its best-matching grid cell.
///
/// A completed mapping is a partition of `[0, n_data)`: each index
/// appears in exactly one cell's list, in ascending order. Rebuilding
/// against an unchanged map yields an identical mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMapping {
    rows: usize,
    cols: usize,
    /// Per-cell dataset indices, row-major.
    cells: Vec<Vec<usize>>,
}

impl CellMapping {
    /// Maps every dataset item to the cell whose weight vector is closest
    /// to it, in ascending index order.
    pub fn build(map: &SomMap, dataset: &DataSet) -> Result<Self> {
        let mut cells = vec![Vec::new(); map.total_nodes()];

        for t in 0..dataset.len() {
            let (row, col) = map.find_bmu(dataset.feature(t))?;
            cells[map.coords_to_index(row, col)].push(t);
        }

        Ok(Self {
            rows: map.rows,
            cols: map.cols,
            cells,
        })
    }

    /// Number of grid rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dataset indices assigned to the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> &[usize] {
        &self.cells[row * self.cols + col]
    }

    /// Per-cell index lists in row-major order.
    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Total number of assigned indices across all cells.
    pub fn assigned_total(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

/// Computes the majority label of every grid cell.
///
/// Frequencies are tallied into a table sized to the dataset's observed
/// distinct label set; a label outside that set is an explicit error,
/// never an out-of-range index. The highest count wins, ties breaking
/// toward the smallest label value. Empty cells yield
/// [`EMPTY_CELL_LABEL`]. The result is row-major, one entry per cell.
pub fn majority_labels(mapping: &CellMapping, dataset: &DataSet) -> Result<Vec<i64>> {
    let labels = dataset.labels().ok_or(SomGridError::MissingLabels)?;
    let distinct = dataset.distinct_labels();

    let mut majorities = Vec::with_capacity(mapping.cells().len());
    let mut counts = vec![0usize; distinct.len()];

    for cell in mapping.cells() {
        if cell.is_empty() {
            majorities.push(EMPTY_CELL_LABEL);
            continue;
        }

        counts.iter_mut().for_each(|c| *c = 0);
        for &index in cell {
            let label = labels[index];
            let slot = distinct
                .binary_search(&label)
                .map_err(|_| SomGridError::UnknownLabel(label))?;
            counts[slot] += 1;
        }

        // Scanning in ascending label order with a strict comparison makes
        // ties resolve to the smallest label reaching the maximum.
        let mut best_slot = 0;
        for (slot, &count) in counts.iter().enumerate() {
            if count > counts[best_slot] {
                best_slot = slot;
            }
        }
        majorities.push(distinct[best_slot]);
    }

    Ok(majorities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::som::Node;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// 2x2 map whose nodes sit at the corners of the unit square.
    fn corner_map() -> SomMap {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut map = SomMap::random(2, 2, 2, &mut rng).unwrap();
        map.nodes[0] = Node::new_with_weights(0, 0, vec![0.0, 0.0]);
        map.nodes[1] = Node::new_with_weights(0, 1, vec![0.0, 1.0]);
        map.nodes[2] = Node::new_with_weights(1, 0, vec![1.0, 0.0]);
        map.nodes[3] = Node::new_with_weights(1, 1, vec![1.0, 1.0]);
        map
    }

    #[test]
    fn test_build_partitions_all_indices() {
        let map = corner_map();
        let rows = vec![
            vec![0.1, 0.1],
            vec![0.9, 0.9],
            vec![0.0, 0.2],
            vec![0.1, 0.9],
        ];
        let data = DataSet::from_rows(&rows, false).unwrap();

        let mapping = CellMapping::build(&map, &data).unwrap();

        assert_eq!(mapping.assigned_total(), data.len());
        let mut seen = vec![false; data.len()];
        for cell in mapping.cells() {
            for &index in cell {
                assert!(!seen[index], "index {index} mapped twice");
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_build_assigns_to_nearest_cell() {
        let map = corner_map();
        let rows = vec![vec![0.05, 0.05], vec![0.95, 0.05], vec![0.9, 1.0]];
        let data = DataSet::from_rows(&rows, false).unwrap();

        let mapping = CellMapping::build(&map, &data).unwrap();

        assert_eq!(mapping.cell(0, 0), &[0]);
        assert_eq!(mapping.cell(1, 0), &[1]);
        assert_eq!(mapping.cell(1, 1), &[2]);
        assert!(mapping.cell(0, 1).is_empty());
    }

    #[test]
    fn test_build_is_idempotent() {
        let map = corner_map();
        let rows = vec![vec![0.3, 0.7], vec![0.8, 0.2], vec![0.5, 0.5]];
        let data = DataSet::from_rows(&rows, false).unwrap();

        let first = CellMapping::build(&map, &data).unwrap();
        let second = CellMapping::build(&map, &data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_majority_labels_per_cell() {
        let map = corner_map();
        // Labels: cell (0,0) gets {7, 7, 9}, cell (1,1) gets {9}.
        let rows = vec![
            vec![0.0, 0.0, 7.0],
            vec![0.1, 0.0, 7.0],
            vec![0.0, 0.1, 9.0],
            vec![1.0, 1.0, 9.0],
        ];
        let data = DataSet::from_rows(&rows, true).unwrap();
        let mapping = CellMapping::build(&map, &data).unwrap();

        let majorities = majority_labels(&mapping, &data).unwrap();
        assert_eq!(majorities.len(), 4);
        assert_eq!(majorities[0], 7);
        assert_eq!(majorities[1], EMPTY_CELL_LABEL);
        assert_eq!(majorities[2], EMPTY_CELL_LABEL);
        assert_eq!(majorities[3], 9);
    }

    #[test]
    fn test_majority_labels_tie_breaks_to_smallest() {
        let map = corner_map();
        let rows = vec![vec![0.0, 0.0, 5.0], vec![0.1, 0.0, 2.0]];
        let data = DataSet::from_rows(&rows, true).unwrap();
        let mapping = CellMapping::build(&map, &data).unwrap();

        let majorities = majority_labels(&mapping, &data).unwrap();
        assert_eq!(majorities[0], 2);
    }

    #[test]
    fn test_majority_labels_requires_labels() {
        let map = corner_map();
        let data = DataSet::from_rows(&[vec![0.0, 0.0]], false).unwrap();
        let mapping = CellMapping::build(&map, &data).unwrap();

        let err = majority_labels(&mapping, &data).unwrap_err();
        assert!(matches!(err, SomGridError::MissingLabels));
    }
}
