//! The training loop and its decay schedule.
//!
//! Each step draws one random dataset item, locates its best matching
//! unit, and pulls every node within the current Manhattan neighborhood
//! toward the item. Both the neighborhood range and the learning rate
//! decay linearly with the step index.

use crate::dataset::DataSet;
use crate::error::{Result, SomGridError};
use crate::som::SomMap;
use log::{debug, info};
use rand::Rng;

/// Steps between progress log lines.
const PROGRESS_INTERVAL: usize = 1000;

/// Linear decay schedule for a training run.
///
/// Holds the run's fixed parameters so the per-step learning rate and
/// neighborhood range can be inspected independently of the loop.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSchedule {
    steps_max: usize,
    learning_rate_max: f64,
    grid_span: usize,
}

impl TrainingSchedule {
    /// Creates a schedule for `steps_max` steps over a grid whose row and
    /// column counts sum to `grid_span`.
    pub fn new(steps_max: usize, learning_rate_max: f64, grid_span: usize) -> Self {
        Self {
            steps_max,
            learning_rate_max,
            grid_span,
        }
    }

    /// Fraction of the run remaining at `step`, falling linearly from 1
    /// toward 0.
    #[inline]
    fn percent_remaining(&self, step: usize) -> f64 {
        1.0 - step as f64 / self.steps_max as f64
    }

    /// Learning rate at `step`.
    #[inline]
    pub fn learning_rate(&self, step: usize) -> f64 {
        self.percent_remaining(step) * self.learning_rate_max
    }

    /// Neighborhood range at `step`, in Manhattan grid distance.
    ///
    /// Monotonically non-increasing across a run; starts wide enough to
    /// cover the whole grid.
    #[inline]
    pub fn range(&self, step: usize) -> usize {
        (self.percent_remaining(step) * self.grid_span as f64).floor() as usize
    }
}

/// Runs a full training pass, mutating `map` in place.
///
/// Draws dataset indices from `rng`, which must be the same generator
/// that initialized the map so the whole run is one seeded sequence.
/// Completes all steps or, for a zero step budget, does nothing.
pub(crate) fn run<R: Rng>(
    map: &mut SomMap,
    dataset: &DataSet,
    rng: &mut R,
    steps_max: usize,
    learning_rate_max: f64,
) -> Result<()> {
    if learning_rate_max < 0.0 || learning_rate_max.is_nan() {
        return Err(SomGridError::InvalidArgument(format!(
            "learning rate must be non-negative, got {}",
            learning_rate_max
        )));
    }
    if steps_max == 0 {
        debug!("zero step budget, leaving map untouched");
        return Ok(());
    }

    let schedule = TrainingSchedule::new(steps_max, learning_rate_max, map.rows + map.cols);

    info!(
        "training: {} steps, {}x{} grid, {} records, {} dims",
        steps_max,
        map.rows,
        map.cols,
        dataset.len(),
        dataset.feature_dim()
    );

    for step in 0..steps_max {
        let learning_rate = schedule.learning_rate(step);
        let range = schedule.range(step);

        let t = rng.gen_range(0..dataset.len());
        let input = dataset.feature(t);

        let bmu = map.find_bmu(input)?;
        map.update_neighborhood(input, bmu, learning_rate, range);

        if step % PROGRESS_INTERVAL == 0 {
            debug!(
                "step {}/{}: rate={:.4}, range={}",
                step, steps_max, learning_rate, range
            );
        }
    }

    info!("training completed");
    Ok(())
}
