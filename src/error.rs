//! Error types for the somgrid engine.

use thiserror::Error;

/// The main error type for somgrid operations.
#[derive(Error, Debug)]
pub enum SomGridError {
    /// Feature dimensionality disagreement between the grid and an input.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// Invalid construction or training parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Empty dataset or input file.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Unparsable record in a delimited input file.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending record.
        line: usize,
        /// What failed to parse.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Label aggregation requested on a dataset without labels.
    #[error("dataset has no labels")]
    MissingLabels,

    /// Label aggregation requested before a mapping was built.
    #[error("mapping has not been built")]
    MappingNotBuilt,

    /// A label outside the dataset's observed label set reached aggregation.
    #[error("label {0} is not in the dataset's label set")]
    UnknownLabel(i64),
}

/// Result type alias for somgrid operations.
pub type Result<T> = std::result::Result<T, SomGridError>;
