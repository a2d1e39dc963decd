//! # somgrid - Self-Organizing Map Engine
//!
//! somgrid maps a set of fixed-length numeric feature vectors onto a
//! rectangular grid of nodes, preserving topological neighborhood
//! relationships, then derives per-cell cluster assignments and majority
//! labels.
//!
//! ## Overview
//!
//! A [`SomEngine`] owns an immutable [`DataSet`], a grid of weight-vector
//! nodes ([`SomMap`]), and a single seeded random generator. Training
//! repeatedly draws a dataset item, finds the node whose weights are
//! closest to it (the best matching unit), and pulls the BMU's grid
//! neighborhood toward the item, with both the neighborhood radius and
//! the learning rate decaying linearly over the run. Afterwards a
//! [`CellMapping`] partitions the dataset indices across cells, and
//! labeled datasets additionally yield a per-cell majority label.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use somgrid::{SomConfig, SomEngine};
//!
//! // Two tight clusters in 2D, labeled 1 and 2.
//! let rows = vec![
//!     vec![0.0, 0.0, 1.0],
//!     vec![0.0, 0.1, 1.0],
//!     vec![10.0, 10.0, 2.0],
//!     vec![10.0, 10.1, 2.0],
//! ];
//!
//! let config = SomConfig::square(2).with_seed(0);
//! let mut engine = SomEngine::from_rows(&rows, true, &config)?;
//!
//! engine.train(1000, 0.5)?;
//! let mapping = engine.build_mapping()?;
//! let majorities = engine.majority_labels()?;
//! ```
//!
//! ## Architecture
//!
//! - [`dataset`] - feature vectors and optional labels
//! - [`som`] - the node grid, training loop, and derived mappings
//! - [`engine`] - engine state and lifecycle
//! - [`config`] - construction parameters
//!
//! Training is single-threaded and fully synchronous; every public
//! operation runs to completion before returning. Two engines built with
//! the same dataset, seed, and dimensions, then trained with the same
//! budget and rate, produce bit-identical weight grids.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod som;

// Re-export commonly used types
pub use config::SomConfig;
pub use dataset::DataSet;
pub use engine::SomEngine;
pub use error::{Result, SomGridError};
pub use som::{majority_labels, CellMapping, Node, SomMap, TrainingSchedule, EMPTY_CELL_LABEL};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default grid dimension used by the CLI.
pub const DEFAULT_DIMENSION: usize = 10;
