//! Integration tests for the ndarray extension trait
//!
//! These tests exercise rebinning in image and signal style workflows.

use ndarray::{Array1, Array3, ArrayD, Axis, IxDyn, array, s};
use ndrebin::{Operation, Rebin, RebinExt, Remainder};

// =============================================================================
// Images
// =============================================================================

#[test]
fn downsample_image_channels() {
    // 8x8 RGB image, each channel a constant plane
    let image = Array3::<f32>::from_shape_fn((8, 8, 3), |(_, _, c)| (c + 1) as f32);
    let small = image.rebin(&[2, 2, 3], "mean").unwrap();
    assert_eq!(small.shape(), &[2, 2, 3]);
    for c in 0..3 {
        let plane = small.index_axis(Axis(2), c);
        assert!(plane.iter().all(|&v| v == (c + 1) as f32));
    }
}

#[test]
fn pixel_counts_stay_integer() {
    let counts = Array3::<u32>::ones((4, 6, 1));
    let binned = counts.rebin(&[2, 3, 1], "sum").unwrap();
    assert!(binned.iter().all(|&v| v == 4));
}

#[test]
fn brightest_pixel_in_sliced_region() {
    let mut image = Array3::<u8>::zeros((6, 6, 1));
    image[[1, 4, 0]] = 200;
    image[[5, 5, 0]] = 255;

    // Only the top 4 rows
    let top = image.slice(s![..4, .., ..]);
    let peaks = top.rebin(&[2, 3, 1], "max").unwrap();
    assert_eq!(peaks[[0, 2, 0]], 200);
    assert_eq!(peaks.iter().filter(|&&v| v > 0).count(), 1);
}

// =============================================================================
// Signals
// =============================================================================

#[test]
fn decimate_signal_with_remainder() {
    let signal = Array1::from_iter((0..101).map(|i| i as f64));
    assert!(signal.rebin(&[10], "mean").is_err());

    let config = Rebin::parse("avg").unwrap().remainder(Remainder::Truncate);
    let decimated = signal.rebin_with(&[10], config).unwrap();
    assert_eq!(decimated.len(), 10);
    assert_eq!(decimated[[0]], 4.5);
    assert_eq!(decimated[[9]], 94.5);
}

#[test]
fn median_filter_rejects_spikes() {
    let signal = array![1.0, 1.0, 50.0, 1.0, 2.0, 2.0, 2.0, -40.0, 2.0];
    let robust = signal.rebin(&[3], "median").unwrap();
    assert_eq!(robust, array![1.0, 2.0, 2.0].into_dyn());

    let mean = signal.rebin(&[3], "mean").unwrap();
    assert!(mean[[0]] > 10.0);
}

#[test]
fn integer_samples_as_float_mean() {
    let samples = array![[1i16, 2], [2, 2]];
    let mean = samples.rebin_as::<f32>(&[1, 1], "mean").unwrap();
    assert_eq!(mean[[0, 0]], 1.75);
}

// =============================================================================
// Dynamic dimensionality
// =============================================================================

#[test]
fn every_operation_keeps_the_target_shape() {
    let a = ArrayD::<f64>::from_shape_fn(IxDyn(&[4, 2, 6, 3]), |idx| {
        (idx[0] * 36 + idx[1] * 18 + idx[2] * 3 + idx[3]) as f64
    });
    for op in Operation::ALL {
        let out = a.rebin_with(&[2, 1, 3, 3], Rebin::new(op)).unwrap();
        assert_eq!(out.shape(), &[2, 1, 3, 3], "operation {op}");
    }
}
