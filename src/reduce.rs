//! Aggregation kernels over block axes

use ndarray::{ArrayD, ArrayView1, ArrayViewD, Axis, Zip};
use num_traits::Zero;
use std::cmp::Ordering;
use std::ops::{Add, Div};

/// Element types that can be rebinned
///
/// Sums and means are accumulated in [`Element::Wide`] so that integer blocks
/// never overflow before the final value is known.
pub trait Element: Clone + PartialOrd {
    /// Accumulator for sums: `i128`/`u128` for integers, the type itself for floats
    type Wide: Clone + Zero + Add<Output = Self::Wide> + Div<Output = Self::Wide>;

    fn widen(&self) -> Self::Wide;

    /// Convert an accumulated value back, `None` if it is out of range
    fn narrow(wide: Self::Wide) -> Option<Self>;

    /// Element count as an accumulator value
    fn count(n: usize) -> Self::Wide;

    /// Value halfway between `lo` and `hi`, rounded toward zero for integers
    fn midpoint(lo: &Self, hi: &Self) -> Self;
}

macro_rules! impl_int_element {
    ($wide:ty => $($t:ty),*) => {$(
        impl Element for $t {
            type Wide = $wide;

            fn widen(&self) -> $wide {
                *self as $wide
            }

            fn narrow(wide: $wide) -> Option<Self> {
                <$t>::try_from(wide).ok()
            }

            fn count(n: usize) -> $wide {
                n as $wide
            }

            fn midpoint(lo: &Self, hi: &Self) -> Self {
                // Always within [lo, hi], so the cast back is lossless
                ((*lo as $wide + *hi as $wide) / 2) as $t
            }
        }
    )*};
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            type Wide = $t;

            fn widen(&self) -> $t {
                *self
            }

            fn narrow(wide: $t) -> Option<Self> {
                Some(wide)
            }

            fn count(n: usize) -> $t {
                n as $t
            }

            fn midpoint(lo: &Self, hi: &Self) -> Self {
                lo / 2.0 + hi / 2.0
            }
        }
    )*};
}

impl_int_element!(i128 => i8, i16, i32, i64, isize);
impl_int_element!(u128 => u8, u16, u32, u64, usize);
impl_float_element!(f32, f64);

/// NaN for floats, never true for integers
fn is_unordered<A: PartialOrd>(x: &A) -> bool {
    x.partial_cmp(x).is_none()
}

/// Whether `candidate` should replace `current` when looking for `wanted`
///
/// Unordered values win so that NaN propagates through min and max.
fn replaces<A: PartialOrd>(candidate: &A, current: &A, wanted: Ordering) -> bool {
    if is_unordered(current) {
        return false;
    }
    match candidate.partial_cmp(current) {
        Some(order) => order == wanted,
        None => true,
    }
}

fn fold_extreme<A: Clone + PartialOrd>(
    array: ArrayViewD<'_, A>,
    axis: Axis,
    wanted: Ordering,
) -> ArrayD<A> {
    let mut acc = array.index_axis(axis, 0).to_owned();
    for sub in array.axis_iter(axis).skip(1) {
        Zip::from(&mut acc).and(&sub).for_each(|current, candidate| {
            if replaces(candidate, current, wanted) {
                *current = candidate.clone();
            }
        });
    }
    acc
}

/// Element-wise minimum along `axis`, which must not be empty
pub(crate) fn min_axis<A: Clone + PartialOrd>(array: ArrayViewD<'_, A>, axis: Axis) -> ArrayD<A> {
    fold_extreme(array, axis, Ordering::Less)
}

/// Element-wise maximum along `axis`, which must not be empty
pub(crate) fn max_axis<A: Clone + PartialOrd>(array: ArrayViewD<'_, A>, axis: Axis) -> ArrayD<A> {
    fold_extreme(array, axis, Ordering::Greater)
}

/// Median of a non-empty lane
///
/// Even-length lanes average the two middle values. Any NaN makes the
/// result NaN.
pub(crate) fn median<A: Element>(lane: ArrayView1<'_, A>) -> A {
    if let Some(nan) = lane.iter().find(|x| is_unordered(*x)) {
        return nan.clone();
    }

    let order = |a: &A, b: &A| a.partial_cmp(b).unwrap_or(Ordering::Equal);
    let mut values = lane.to_vec();
    let len = values.len();
    let (lower, upper, _) = values.select_nth_unstable_by(len / 2, order);
    if len % 2 == 1 {
        return upper.clone();
    }
    match lower.iter().max_by(|a, b| order(*a, *b)) {
        Some(below) => A::midpoint(below, upper),
        None => upper.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    #[test]
    fn min_and_max_along_axis() {
        let a = array![[3.0, 1.0, 2.0], [-1.0, 5.0, 0.5]].into_dyn();
        assert_eq!(
            min_axis(a.view(), Axis(1)),
            array![1.0, -1.0].into_dyn()
        );
        assert_eq!(
            max_axis(a.view(), Axis(0)),
            array![3.0, 5.0, 2.0].into_dyn()
        );
    }

    #[test]
    fn nan_propagates_through_extremes() {
        let a = array![[1.0, f64::NAN, 0.0], [2.0, 3.0, 4.0]].into_dyn();
        let min = min_axis(a.view(), Axis(1));
        let max = max_axis(a.view(), Axis(1));
        assert!(min[[0]].is_nan());
        assert!(max[[0]].is_nan());
        assert_eq!(min[[1]], 2.0);
        assert_eq!(max[[1]], 4.0);

        // NaN in the first position must survive as well
        let b = array![[f64::NAN, -7.0]].into_dyn();
        assert!(min_axis(b.view(), Axis(1))[[0]].is_nan());
    }

    #[test]
    fn integer_extremes() {
        let a = array![[4i32, -2], [7, 7]].into_dyn();
        assert_eq!(min_axis(a.view(), Axis(1)), array![-2, 7].into_dyn());
        assert_eq!(max_axis(a.view(), Axis(1)), array![4, 7].into_dyn());
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(array![5.0, 1.0, 3.0].view()), 3.0);
        assert_eq!(median(array![4.0, 1.0, 3.0, 2.0].view()), 2.5);
        assert_eq!(median(array![9i64, 1, 4, 6].view()), 5);
        assert_eq!(median(Array1::from_elem(1, 7u8).view()), 7);
        assert_eq!(median(array![-3i8, -4].view()), -3);
    }

    #[test]
    fn median_midpoint_near_type_limits() {
        assert_eq!(median(array![200u8, 250].view()), 225);
        assert_eq!(median(array![i32::MAX, i32::MAX].view()), i32::MAX);
        assert_eq!(median(array![i64::MIN, i64::MIN + 2].view()), i64::MIN + 1);
        assert_eq!(median(array![f64::MAX, f64::MAX].view()), f64::MAX);
    }

    #[test]
    fn narrow_rejects_out_of_range() {
        assert_eq!(u8::narrow(255), Some(255));
        assert_eq!(u8::narrow(256), None);
        assert_eq!(i16::narrow(-32_769), None);
        assert_eq!(f32::narrow(f32::INFINITY), Some(f32::INFINITY));
    }

    #[test]
    fn median_with_nan() {
        assert!(median(array![1.0f32, f32::NAN, 2.0].view()).is_nan());
    }
}
