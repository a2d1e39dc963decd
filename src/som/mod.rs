//! Self-organizing map internals.
//!
//! The grid lives in [`map`] and [`node`], the decaying training loop in
//! [`training`], and the post-training derivations (cell assignment and
//! majority labels) in [`mapping`].

mod map;
mod node;
pub mod mapping;
pub mod training;

pub use map::SomMap;
pub use mapping::{majority_labels, CellMapping, EMPTY_CELL_LABEL};
pub use node::Node;
pub use training::TrainingSchedule;
