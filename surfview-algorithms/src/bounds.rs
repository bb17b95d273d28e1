//! Color range computation.

use surfview_core::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether the colorbar range is forced to be symmetric around zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SymmetricCbar {
    /// Symmetric when the data has both signs, or when the explicit bounds
    /// are already opposite.
    Auto,
    /// Always symmetric.
    Always,
    /// Plain data bounds.
    #[default]
    Never,
}

/// Minimum and maximum of `data`, ignoring NaN.
#[must_use]
pub fn nan_min_max(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Returns `(vmin, vmax)`, each defaulting to the data extremum.
///
/// Overrides are taken as given; they are neither clamped nor reordered.
///
/// # Errors
/// `EmptyData` when a bound has to be derived and `data` holds no non-NaN
/// value.
pub fn compute_bounds(data: &[f64], vmin: Option<f64>, vmax: Option<f64>) -> Result<(f64, f64)> {
    if let (Some(lo), Some(hi)) = (vmin, vmax) {
        return Ok((lo, hi));
    }
    let (data_min, data_max) = nan_min_max(data).ok_or(Error::EmptyData)?;
    Ok((vmin.unwrap_or(data_min), vmax.unwrap_or(data_max)))
}

/// Colorbar range honoring the symmetric-colorbar policy.
///
/// # Errors
/// `AsymmetricRange` if symmetry is required but both explicit bounds are
/// given and not opposite; `EmptyData` as for [`compute_bounds`].
pub fn colorbar_range(
    data: &[f64],
    vmin: Option<f64>,
    vmax: Option<f64>,
    symmetric: SymmetricCbar,
) -> Result<(f64, f64)> {
    let symmetric = match symmetric {
        SymmetricCbar::Always => true,
        SymmetricCbar::Never => false,
        SymmetricCbar::Auto => match (vmin, vmax) {
            (Some(lo), Some(hi)) => is_close(lo, -hi),
            _ => nan_min_max(data).is_some_and(|(lo, hi)| lo < 0.0 && hi > 0.0),
        },
    };
    if !symmetric {
        return compute_bounds(data, vmin, vmax);
    }

    match (vmin, vmax) {
        (None, None) => {
            let (lo, hi) = nan_min_max(data).ok_or(Error::EmptyData)?;
            let bound = lo.abs().max(hi.abs());
            Ok((-bound, bound))
        }
        (None, Some(hi)) => Ok((-hi, hi)),
        (Some(lo), None) => Ok((lo, -lo)),
        (Some(lo), Some(hi)) if is_close(lo, -hi) => Ok((lo, hi)),
        (Some(lo), Some(hi)) => Err(Error::AsymmetricRange { vmin: lo, vmax: hi }),
    }
}

/// `numpy.isclose` with its default tolerances.
fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 + 1e-5 * b.abs()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
        #[allow(clippy::cast_precision_loss)]
        let step = (stop - start) / (n - 1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
        out[n - 1] = stop;
        out
    }

    #[test]
    fn test_bounds_from_data() {
        let data = linspace(0.0, 1.0, 100);
        assert_eq!(compute_bounds(&data, None, None).unwrap(), (0.0, 1.0));
        assert_eq!(compute_bounds(&data, Some(0.2), None).unwrap(), (0.2, 1.0));
        assert_eq!(compute_bounds(&data, None, Some(0.8)).unwrap(), (0.0, 0.8));
        assert_eq!(compute_bounds(&data, Some(0.1), Some(0.8)).unwrap(), (0.1, 0.8));
    }

    #[test]
    fn test_bounds_negative_data() {
        let data = linspace(-0.7, -0.01, 40);
        assert_eq!(compute_bounds(&data, None, None).unwrap(), (-0.7, -0.01));
        assert_eq!(compute_bounds(&data, Some(0.2), None).unwrap(), (0.2, -0.01));
    }

    #[test]
    fn test_bounds_ignore_nan() {
        let data = [f64::NAN, 2.0, -3.0, f64::NAN];
        assert_eq!(compute_bounds(&data, None, None).unwrap(), (-3.0, 2.0));
        assert_eq!(
            compute_bounds(&[f64::NAN], None, None).unwrap_err(),
            Error::EmptyData
        );
        assert_eq!(compute_bounds(&[], Some(1.0), Some(2.0)).unwrap(), (1.0, 2.0));
    }

    #[test]
    fn test_symmetric_range() {
        let data = [-2.0, 0.5, 5.0];
        assert_eq!(
            colorbar_range(&data, None, None, SymmetricCbar::Always).unwrap(),
            (-5.0, 5.0)
        );
        assert_eq!(
            colorbar_range(&data, None, Some(3.0), SymmetricCbar::Always).unwrap(),
            (-3.0, 3.0)
        );
        assert_eq!(
            colorbar_range(&data, None, None, SymmetricCbar::Auto).unwrap(),
            (-5.0, 5.0)
        );
        assert_eq!(
            colorbar_range(&data, None, None, SymmetricCbar::Never).unwrap(),
            (-2.0, 5.0)
        );
    }

    #[test]
    fn test_auto_positive_data_is_not_symmetric() {
        let data = [0.5, 5.0];
        assert_eq!(
            colorbar_range(&data, None, None, SymmetricCbar::Auto).unwrap(),
            (0.5, 5.0)
        );
        assert_eq!(
            colorbar_range(&data, Some(-1.0), Some(5.0), SymmetricCbar::Auto).unwrap(),
            (-1.0, 5.0)
        );
    }

    #[test]
    fn test_asymmetric_explicit_range_rejected() {
        let err = colorbar_range(&[1.0], Some(-1.0), Some(5.0), SymmetricCbar::Always)
            .unwrap_err();
        assert!(matches!(err, Error::AsymmetricRange { .. }));
    }
}
