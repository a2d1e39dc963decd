//! The engine: a dataset, a map grid, and one seeded generator.
//!
//! [`SomEngine`] is the single owner of all mutable state. The generator
//! seeds the grid at construction and then feeds the training loop, so a
//! whole run is one deterministic sequence per seed.

use crate::config::SomConfig;
use crate::dataset::DataSet;
use crate::error::{Result, SomGridError};
use crate::som::{majority_labels, training, CellMapping, SomMap};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

/// A self-organizing map engine over one immutable dataset.
#[derive(Debug)]
pub struct SomEngine {
    dataset: DataSet,
    map: SomMap,
    rng: ChaCha8Rng,
    mapping: Option<CellMapping>,
}

impl SomEngine {
    /// Creates an engine over `dataset`, randomizing the grid weights
    /// immediately from the configured seed.
    pub fn new(dataset: DataSet, config: &SomConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let map = SomMap::random(config.rows, config.cols, dataset.feature_dim(), &mut rng)?;

        info!(
            "engine ready: {}x{} grid, {} records, {} dims",
            map.rows,
            map.cols,
            dataset.len(),
            dataset.feature_dim()
        );

        Ok(Self {
            dataset,
            map,
            rng,
            mapping: None,
        })
    }

    /// Creates an engine from an in-memory matrix (see
    /// [`DataSet::from_rows`]).
    pub fn from_rows(rows: &[Vec<f64>], has_labels: bool, config: &SomConfig) -> Result<Self> {
        Self::new(DataSet::from_rows(rows, has_labels)?, config)
    }

    /// Creates an engine from a delimited text file (see
    /// [`DataSet::from_delimited_file`]).
    pub fn from_delimited_file<P: AsRef<Path>>(
        path: P,
        has_labels: bool,
        config: &SomConfig,
    ) -> Result<Self> {
        Self::new(DataSet::from_delimited_file(path, has_labels)?, config)
    }

    /// Trains the grid for `steps_max` steps with an initial learning
    /// rate of `learning_rate_max`, both decaying linearly to zero.
    ///
    /// A zero step budget leaves the grid untouched. Any previously built
    /// mapping is discarded, since the grid it described has moved.
    pub fn train(&mut self, steps_max: usize, learning_rate_max: f64) -> Result<()> {
        training::run(
            &mut self.map,
            &self.dataset,
            &mut self.rng,
            steps_max,
            learning_rate_max,
        )?;
        self.mapping = None;
        Ok(())
    }

    /// Assigns every dataset index to its best-matching cell and stores
    /// the result for label aggregation.
    ///
    /// Rebuilding without an intervening [`train`](Self::train) call
    /// yields an identical mapping.
    pub fn build_mapping(&mut self) -> Result<&CellMapping> {
        let mapping = CellMapping::build(&self.map, &self.dataset)?;
        Ok(self.mapping.insert(mapping))
    }

    /// Computes the majority label of every grid cell, row-major.
    ///
    /// Requires a labeled dataset and a mapping built since the last
    /// training call; empty cells report
    /// [`EMPTY_CELL_LABEL`](crate::som::EMPTY_CELL_LABEL).
    pub fn majority_labels(&self) -> Result<Vec<i64>> {
        let mapping = self.mapping.as_ref().ok_or(SomGridError::MappingNotBuilt)?;
        majority_labels(mapping, &self.dataset)
    }

    /// The trained (or freshly initialized) map grid.
    pub fn map(&self) -> &SomMap {
        &self.map
    }

    /// The engine's dataset.
    pub fn dataset(&self) -> &DataSet {
        &self.dataset
    }

    /// The last-built mapping, if any.
    pub fn mapping(&self) -> Option<&CellMapping> {
        self.mapping.as_ref()
    }
}
