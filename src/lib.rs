//! ndrebin - Block-wise rebinning of n-dimensional arrays
//!
//! Shrinks an array to a target shape with the same number of axes by cutting
//! every axis into equal contiguous blocks and reducing each block to a single
//! value.
//!
//! # Features
//!
//! - Works on any `ndarray` array: owned, views, any rank, any memory layout
//! - Aggregations: `sum`, `mean` (`average`, `avg`), `min`, `max`, `median`
//! - NaN propagates through `min`, `max` and `median`
//! - Explicit policy for axes that do not divide evenly
//! - Block layout is reported through `tracing` at debug level
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array;
//! use ndrebin::{Operation, Rebin, Remainder, rebin};
//!
//! // 10x10 grid of 0..100 summed in 2x2 blocks
//! let grid = Array::from_iter(0..100).into_shape_with_order((10, 10)).unwrap();
//! let binned = rebin(&grid, &[5, 5], "sum").unwrap();
//! assert_eq!(binned[[1, 2]], 118);
//!
//! // Lengths that do not divide evenly must opt into truncation
//! let row = Array::from_iter(0..10);
//! assert!(rebin(&row, &[3], "max").is_err());
//! let maxima = Rebin::new(Operation::Max)
//!     .remainder(Remainder::Truncate)
//!     .apply(&row, &[3])
//!     .unwrap();
//! assert_eq!(maxima.iter().copied().collect::<Vec<_>>(), vec![2, 5, 8]);
//! ```

pub mod error;
pub mod ndarray_ext;
pub mod rebin;
pub mod reduce;
pub mod types;

// Re-export common types at crate root
pub use error::RebinError;
pub use ndarray_ext::RebinExt;
pub use rebin::{Rebin, rebin};
pub use reduce::Element;
pub use types::{BlockPlan, Operation, Remainder};
