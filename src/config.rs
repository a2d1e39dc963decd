//! Configuration for the somgrid engine.

use serde::{Deserialize, Serialize};

/// Construction-time parameters for a [`crate::SomEngine`].
///
/// Training parameters (step budget, initial learning rate) are passed to
/// [`crate::SomEngine::train`] directly rather than carried here, so one
/// engine can be trained repeatedly with different budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomConfig {
    /// Number of grid rows.
    /// Default: 10.
    pub rows: usize,

    /// Number of grid columns.
    /// Default: 10. Callers conventionally use square grids (see
    /// [`SomConfig::square`]); the engine itself only requires both
    /// dimensions to be at least 1.
    pub cols: usize,

    /// Random seed for reproducibility.
    /// Default: None (seed from entropy).
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            seed: None,
        }
    }
}

impl SomConfig {
    /// Creates a configuration for a square `dimension` x `dimension` grid.
    pub fn square(dimension: usize) -> Self {
        Self {
            rows: dimension,
            cols: dimension,
            ..Default::default()
        }
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the total number of grid cells.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.rows * self.cols
    }
}
