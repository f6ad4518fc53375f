//! Errors
//!
//! Custom error types used throughout the `cart-tree` crate.
use thiserror::Error;

/// Errors that can occur while building, applying or persisting a decision tree.
#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    /// A tree was requested from a dataset without rows.
    #[error("Cannot build a tree from an empty dataset.")]
    EmptyDataset,
    /// Impurity evaluation met a value partition without rows.
    #[error("Feature number {feature} produced an empty partition for value {value}.")]
    DegenerateSplit { feature: usize, value: String },
    /// Serialized tree bytes could not be decoded (or the tree could not be encoded).
    #[error("Serialized tree does not match the expected format: {0}")]
    CodecMismatch(String),
    /// Reading or writing a persisted tree failed.
    #[error("Unable to access tree file: {0}")]
    Io(String),
    /// Number of feature names differs from the number of feature columns.
    #[error("Expected {expected} feature names, but {found} were provided.")]
    ArityMismatch { expected: usize, found: usize },
    /// A row has a different number of values than the first row.
    #[error("Row {row} has {found} values, but {expected} were expected.")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The tree splits on a feature missing from the supplied feature names.
    #[error("Feature {0} is not among the supplied feature names.")]
    UnknownFeature(String),
    /// The feature slot to read lies beyond the end of the row.
    #[error("Row has {len} values, so feature slot {index} cannot be read.")]
    ShortRow { index: usize, len: usize },
    /// Prediction was requested before the tree was built.
    #[error("Tree wasn't built yet.")]
    NotFitted,
    /// Predictions and labels are of different sizes.
    #[error("Predictions and labels are of different sizes ({0} vs {1}).")]
    LengthMismatch(usize, usize),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::CodecMismatch(err.to_string())
    }
}

impl From<std::io::Error> for TreeError {
    fn from(err: std::io::Error) -> Self {
        TreeError::Io(err.to_string())
    }
}
