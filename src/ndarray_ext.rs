//! Rebinning as methods on ndarray arrays
//!
//! ```rust
//! use ndarray::{Array2, array};
//! use ndrebin::{Operation, Rebin, RebinExt};
//!
//! let ones = Array2::<u32>::ones((4, 4));
//! assert_eq!(ones.rebin(&[2, 2], "max").unwrap(), Array2::ones((2, 2)).into_dyn());
//!
//! // Integer input, floating point mean
//! let counts = array![1u16, 2, 3, 4];
//! let mean = counts.rebin_as::<f64>(&[2], "mean").unwrap();
//! assert_eq!(mean, array![1.5, 3.5].into_dyn());
//!
//! let total = counts.rebin_with(&[1], Rebin::new(Operation::Sum)).unwrap();
//! assert_eq!(total[[0]], 10);
//! ```

use crate::error::RebinError;
use crate::rebin::Rebin;
use crate::reduce::Element;
use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use num_traits::AsPrimitive;

/// Extension methods for rebinning any ndarray array
pub trait RebinExt<A> {
    /// Rebin with the aggregation named by `operation`
    fn rebin(&self, target: &[usize], operation: &str) -> Result<ArrayD<A>, RebinError>;

    /// Rebin with an explicit configuration
    fn rebin_with(&self, target: &[usize], config: Rebin) -> Result<ArrayD<A>, RebinError>;

    /// Convert every element to `B` with an `as` cast, then rebin
    ///
    /// Useful for taking floating point means or medians of integer data.
    fn rebin_as<B>(&self, target: &[usize], operation: &str) -> Result<ArrayD<B>, RebinError>
    where
        A: AsPrimitive<B>,
        B: Element + Copy + 'static;
}

impl<A, S, D> RebinExt<A> for ArrayBase<S, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn rebin(&self, target: &[usize], operation: &str) -> Result<ArrayD<A>, RebinError> {
        Rebin::parse(operation)?.apply(self, target)
    }

    fn rebin_with(&self, target: &[usize], config: Rebin) -> Result<ArrayD<A>, RebinError> {
        config.apply(self, target)
    }

    fn rebin_as<B>(&self, target: &[usize], operation: &str) -> Result<ArrayD<B>, RebinError>
    where
        A: AsPrimitive<B>,
        B: Element + Copy + 'static,
    {
        // Reject bad names before paying for the conversion
        let config = Rebin::parse(operation)?;
        let converted = self.mapv(|x| x.as_());
        config.apply(&converted, target)
    }
}
