//! Block-wise rebinning of n-dimensional arrays
//!
//! Every input axis of length `s` is cut into `t` contiguous blocks of `s / t`
//! elements, where `t` is the matching target length. The array is reshaped
//! to `(t_0, f_0, t_1, f_1, ...)` so that each block offset becomes its own
//! axis, and those offset axes are then folded away one at a time.

use crate::error::RebinError;
use crate::reduce::{self, Element};
use crate::types::{BlockPlan, Operation, Remainder};
use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, CowArray, Data, Dimension, IxDyn, Slice};
use tracing::{debug, trace};

/// Rebin configuration: which aggregation to run and how to treat remainders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rebin {
    operation: Operation,
    remainder: Remainder,
}

impl Rebin {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            remainder: Remainder::default(),
        }
    }

    /// Configuration for an operation given by name (case-insensitive)
    pub fn parse(operation: &str) -> Result<Self, RebinError> {
        Ok(Self::new(operation.parse()?))
    }

    /// Set the policy for axes that are not an exact multiple of the target
    pub fn remainder(mut self, policy: Remainder) -> Self {
        self.remainder = policy;
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn remainder_policy(&self) -> Remainder {
        self.remainder
    }

    /// Validate `input -> target` under this configuration
    pub fn plan(&self, input: &[usize], target: &[usize]) -> Result<BlockPlan, RebinError> {
        let plan = BlockPlan::new(input, target)?;
        if let Some(axis) = plan.indivisible_axis() {
            match self.remainder {
                Remainder::Reject => return Err(plan.indivisible_error(axis)),
                Remainder::Truncate => {
                    // Truncation can only drop elements, never invent them
                    if let Some(axis) = plan.overrun_axis() {
                        return Err(plan.indivisible_error(axis));
                    }
                }
            }
        }
        Ok(plan)
    }

    /// Rebin `array` to `target`
    ///
    /// The result always has shape `target`. The input may have any memory
    /// layout; it is only read.
    pub fn apply<A, S, D>(
        &self,
        array: &ArrayBase<S, D>,
        target: &[usize],
    ) -> Result<ArrayD<A>, RebinError>
    where
        A: Element,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let plan = self.plan(array.shape(), target)?;

        let covered = plan.covered_shape();
        let input = array.view().into_dyn();
        let input = input.slice_each_axis(|ax| Slice::from(..covered[ax.axis.index()]));
        if !plan.is_exact() {
            debug!(input = ?plan.input(), kept = ?covered, "truncating remainder");
        }

        let intermediate = plan.intermediate_shape();
        debug!(
            operation = %self.operation,
            intermediate = ?intermediate,
            "reshaping into block layout"
        );
        let blocks = input.to_shape(intermediate)?;

        let out = match self.operation {
            Operation::Sum => narrow(sum_blocks(&blocks, &plan), Operation::Sum)?,
            Operation::Min => fold_blocks(blocks, &plan, reduce::min_axis),
            Operation::Max => fold_blocks(blocks, &plan, reduce::max_axis),
            Operation::Mean => {
                let count = A::count(plan.block_size());
                let sums = sum_blocks(&blocks, &plan);
                narrow(sums.mapv_into(|x| x / count.clone()), Operation::Mean)?
            }
            Operation::Median => median_blocks(blocks, &plan)?,
        };

        debug_assert_eq!(out.shape(), target);
        Ok(out)
    }
}

/// Rebin `array` to `target` with the aggregation named by `operation`
///
/// `operation` is one of `sum`, `mean` (or `average`, `avg`), `min`, `max`
/// and `median`, in any case.
///
/// ```rust
/// use ndarray::{Array, array};
///
/// let m = Array::from_iter(0..100).into_shape_with_order((10, 10)).unwrap();
/// let n = ndrebin::rebin(&m, &[5, 5], "sum").unwrap();
/// assert_eq!(n.shape(), &[5, 5]);
/// assert_eq!(n[[0, 0]], 22);
/// assert_eq!(n[[4, 4]], 374);
///
/// let v = ndrebin::rebin(&array![1.0, 2.0, 3.0, 4.0], &[2], "mean").unwrap();
/// assert_eq!(v, array![1.5, 3.5].into_dyn());
/// ```
pub fn rebin<A, S, D>(
    array: &ArrayBase<S, D>,
    target: &[usize],
    operation: &str,
) -> Result<ArrayD<A>, RebinError>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    Rebin::parse(operation)?.apply(array, target)
}

/// Collapse the block offset axes of `blocks` one at a time with `fold`
///
/// On pass `i` the axis at `ndim - (i + 1)` of the shrinking array is removed,
/// which walks the offset axes from last to first and leaves `(t_0, ..., t_n)`.
fn fold_blocks<A, F>(blocks: CowArray<'_, A, IxDyn>, plan: &BlockPlan, fold: F) -> ArrayD<A>
where
    A: Clone,
    F: Fn(ArrayViewD<'_, A>, Axis) -> ArrayD<A>,
{
    let mut current = blocks;
    for i in 0..plan.ndim() {
        let axis = Axis(current.ndim() - (i + 1));
        trace!(axis = axis.index(), len = current.len_of(axis), "folding block axis");
        current = CowArray::from(fold(current.view(), axis));
    }
    current.into_owned()
}

/// Block sums, accumulated in the element's wide type
fn sum_blocks<A: Element>(
    blocks: &CowArray<'_, A, IxDyn>,
    plan: &BlockPlan,
) -> ArrayD<A::Wide> {
    let wide = CowArray::from(blocks.map(A::widen));
    fold_blocks(wide, plan, |a, axis| a.sum_axis(axis))
}

/// Convert accumulated results back to the element type
fn narrow<A: Element>(
    wide: ArrayD<A::Wide>,
    operation: Operation,
) -> Result<ArrayD<A>, RebinError> {
    let values = wide
        .iter()
        .map(|x| A::narrow(x.clone()).ok_or(RebinError::Overflow { operation }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ArrayD::from_shape_vec(wide.raw_dim(), values)?)
}

/// Median over every element of each block
///
/// Unlike the other operations this cannot be done axis by axis, so the
/// offset axes are moved to the back and flattened into one lane per block.
fn median_blocks<A: Element>(
    blocks: CowArray<'_, A, IxDyn>,
    plan: &BlockPlan,
) -> Result<ArrayD<A>, RebinError> {
    let ndim = plan.ndim();
    let order: Vec<usize> = (0..ndim)
        .map(|i| 2 * i)
        .chain((0..ndim).map(|i| 2 * i + 1))
        .collect();
    let grouped = blocks.view().permuted_axes(order);

    let mut lanes_shape = plan.target().to_vec();
    lanes_shape.push(plan.block_size());
    let lanes = grouped.to_shape(lanes_shape)?;

    Ok(lanes.map_axis(Axis(ndim), reduce::median))
}
