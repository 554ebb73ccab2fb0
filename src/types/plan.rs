//! Per-axis block layout

use crate::error::RebinError;

/// Block factors for rebinning one shape into another
///
/// Each input axis `i` is viewed as `target[i]` blocks of `factors[i]` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPlan {
    input: Vec<usize>,
    target: Vec<usize>,
    factors: Vec<usize>,
}

impl BlockPlan {
    /// Compute the block factors for `input -> target`
    ///
    /// Fails if the two shapes have a different number of axes or if the
    /// target has an empty axis. Divisibility is not checked here; see
    /// [`BlockPlan::indivisible_axis`].
    pub fn new(input: &[usize], target: &[usize]) -> Result<Self, RebinError> {
        if input.len() != target.len() {
            return Err(RebinError::ShapeMismatch {
                input: input.to_vec(),
                target: target.to_vec(),
            });
        }
        if let Some(axis) = target.iter().position(|&t| t == 0) {
            return Err(RebinError::ZeroLengthTarget { axis });
        }

        let factors = input
            .iter()
            .zip(target)
            .map(|(&len, &t)| match len / t {
                // Target longer than input: no reduction on this axis
                0 => 1,
                factor => factor,
            })
            .collect();

        Ok(Self {
            input: input.to_vec(),
            target: target.to_vec(),
            factors,
        })
    }

    pub fn input(&self) -> &[usize] {
        &self.input
    }

    pub fn target(&self) -> &[usize] {
        &self.target
    }

    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    pub fn ndim(&self) -> usize {
        self.target.len()
    }

    /// Number of input elements folded into each output element
    pub fn block_size(&self) -> usize {
        self.factors.iter().product()
    }

    /// `(t_0, f_0, t_1, f_1, ...)`: each axis split into block index and offset
    pub fn intermediate_shape(&self) -> Vec<usize> {
        self.target
            .iter()
            .zip(&self.factors)
            .flat_map(|(&t, &f)| [t, f])
            .collect()
    }

    /// Input extent actually consumed by the blocks on each axis
    pub fn covered_shape(&self) -> Vec<usize> {
        self.target
            .iter()
            .zip(&self.factors)
            .map(|(&t, &f)| t * f)
            .collect()
    }

    /// First axis whose blocks do not tile the input exactly
    pub fn indivisible_axis(&self) -> Option<usize> {
        self.covered_shape()
            .iter()
            .zip(&self.input)
            .position(|(covered, len)| covered != len)
    }

    pub fn is_exact(&self) -> bool {
        self.indivisible_axis().is_none()
    }

    /// First axis whose blocks need more input than there is
    pub(crate) fn overrun_axis(&self) -> Option<usize> {
        self.covered_shape()
            .iter()
            .zip(&self.input)
            .position(|(covered, len)| covered > len)
    }

    pub(crate) fn indivisible_error(&self, axis: usize) -> RebinError {
        RebinError::IndivisibleShape {
            axis,
            input: self.input[axis],
            target: self.target[axis],
        }
    }
}
