//! Error types for ndrebin

use crate::types::Operation;
use ndarray::ShapeError;
use thiserror::Error;

/// Errors returned while validating or applying a rebin
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RebinError {
    /// Operation name is not one of the supported aggregations
    #[error("Operation {0} not supported")]
    UnsupportedOperation(String),
    /// Target shape has a different number of axes than the input
    #[error("Shape mismatch: {input:?} -> {target:?}")]
    ShapeMismatch {
        input: Vec<usize>,
        target: Vec<usize>,
    },
    /// Target shape asks for an empty axis
    #[error("Target length of axis {axis} must be at least 1")]
    ZeroLengthTarget { axis: usize },
    /// Input length on an axis is not a multiple of the target length
    #[error("Axis {axis} of length {input} cannot be split into {target} equal blocks")]
    IndivisibleShape {
        axis: usize,
        input: usize,
        target: usize,
    },
    /// Aggregated value does not fit in the element type
    #[error("Result of {operation} does not fit in the element type")]
    Overflow { operation: Operation },
    /// Reshape rejected by ndarray
    #[error("Block layout error: {0}")]
    Layout(#[from] ShapeError),
}
