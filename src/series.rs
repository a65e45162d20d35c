//! Moving averages over numeric sequences.

use ndarray::ArrayView1;

use crate::error::{Error, Result};
use crate::image::Sample;

/// Unweighted moving average over `window` consecutive values.
///
/// Only full windows are averaged ("valid" convolution), so the output has
/// `values.len() - window + 1` elements and `out[i]` is the mean of
/// `values[i..i + window]`.
///
/// # Errors
///
/// Returns [`Error::InvalidWindow`] unless `1 <= window <= values.len()`.
#[allow(clippy::cast_precision_loss)]
pub fn rolling_average<T: Sample>(values: &[T], window: usize) -> Result<Vec<f64>> {
    if window == 0 || window > values.len() {
        return Err(Error::InvalidWindow {
            window,
            len: values.len(),
        });
    }

    let values: Vec<f64> = values.iter().map(|v| v.to_f64()).collect();
    let scale = window as f64;

    Ok(ArrayView1::from(&values)
        .windows(window)
        .into_iter()
        .map(|w| w.sum() / scale)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_window_two() {
        let out = rolling_average(&[1, 2, 3, 4, 5], 2).unwrap();
        assert_close(&out, &[1.5, 2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_output_length() {
        let values: Vec<f32> = (0..10u8).map(f32::from).collect();
        for window in 1..=values.len() {
            let out = rolling_average(&values, window).unwrap();
            assert_eq!(out.len(), values.len() - window + 1);
        }
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let out = rolling_average(&[3.0, -1.5, 8.25], 1).unwrap();
        assert_close(&out, &[3.0, -1.5, 8.25]);
    }

    #[test]
    fn test_full_window_is_mean() {
        let out = rolling_average(&[2u16, 4, 6, 8], 4).unwrap();
        assert_close(&out, &[5.0]);
    }

    #[test]
    fn test_window_too_large() {
        let err = rolling_average(&[1, 2, 3, 4, 5], 6).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { window: 6, len: 5 }));
    }

    #[test]
    fn test_window_zero() {
        let err = rolling_average(&[1.0, 2.0], 0).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { window: 0, len: 2 }));
    }

    #[test]
    fn test_empty_input() {
        let empty: [f64; 0] = [];
        assert!(matches!(
            rolling_average(&empty, 1),
            Err(Error::InvalidWindow { .. })
        ));
    }
}
