//! Colorbar ticks, tick labels and gradient.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use crate::colormap::Colormap;
use surfview_core::Rgba;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Default number of ticks on a colorbar.
pub const N_TICKS: usize = 5;

/// Number of color steps in a colorbar gradient.
pub const COLORBAR_STEPS: usize = 64;

/// Computes colorbar tick positions over `[vmin, vmax]`.
///
/// Returns between 1 and [`N_TICKS`] ascending, distinct values; the first is
/// `vmin` and the last is `vmax`. Integer formats over a short range use unit
/// steps instead of even spacing. When `threshold` is large enough relative
/// to `vmax`, interior ticks are moved onto `-threshold` and `threshold`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn compute_ticks(vmin: f64, vmax: f64, tick_format: &str, threshold: Option<f64>) -> Vec<f64> {
    if vmin == vmax {
        return vec![vmin];
    }

    let mut ticks = if tick_format == "%i" && vmax - vmin < (N_TICKS - 1) as f64 {
        unit_steps(vmin, vmax)
    } else {
        let mut ticks = linspace(vmin, vmax, N_TICKS);
        if let Some(threshold) = threshold {
            snap_to_threshold(&mut ticks, vmin, vmax, threshold);
        }
        ticks
    };

    ticks.sort_by(f64::total_cmp);
    ticks.dedup();
    ticks
}

fn unit_steps(vmin: f64, vmax: f64) -> Vec<f64> {
    let mut ticks = Vec::with_capacity(N_TICKS);
    let mut value = vmin;
    while value < vmax && ticks.len() < N_TICKS - 1 {
        ticks.push(value);
        value += 1.0;
    }
    ticks.push(vmax);
    ticks
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    out[n - 1] = stop;
    out
}

/// Replaces the interior ticks nearest to `±threshold` with the thresholds.
fn snap_to_threshold(ticks: &mut [f64], vmin: f64, vmax: f64, threshold: f64) {
    if vmax <= 0.0 || threshold / vmax <= 0.12 {
        return;
    }
    let last = ticks.len() - 1;
    let mut taken = vec![false; ticks.len()];
    for target in [-threshold, threshold] {
        if target <= vmin || target >= vmax {
            continue;
        }
        let closest = (1..last)
            .filter(|&i| !taken[i])
            .min_by(|&a, &b| (ticks[a] - target).abs().total_cmp(&(ticks[b] - target).abs()));
        if let Some(i) = closest {
            ticks[i] = target;
            taken[i] = true;
        }
    }
}

/// Formats `value` with a printf-style format (`%i`, `%d`, `%f`, `%e`, `%g`,
/// with optional `.N` precision and surrounding text).
///
/// Unsupported formats fall back to Rust's default float formatting.
#[must_use]
pub fn format_tick(value: f64, tick_format: &str) -> String {
    let Some((prefix, precision, conversion, suffix)) = parse_format(tick_format) else {
        return value.to_string();
    };
    let body = if value.is_finite() {
        match conversion {
            'i' | 'd' => (value.trunc() as i64).to_string(),
            'f' => format!("{:.*}", precision.unwrap_or(6), value),
            'e' => format_exponent(value, precision.unwrap_or(6)),
            _ => format_general(value, precision.unwrap_or(6).max(1)),
        }
    } else if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    };
    format!("{prefix}{body}{suffix}")
}

fn parse_format(tick_format: &str) -> Option<(&str, Option<usize>, char, &str)> {
    let start = tick_format.find('%')?;
    let (prefix, rest) = tick_format.split_at(start);
    let rest = &rest[1..];
    let (precision, rest) = match rest.strip_prefix('.') {
        Some(after_dot) => {
            let digits = after_dot.chars().take_while(char::is_ascii_digit).count();
            let precision = after_dot[..digits].parse().unwrap_or(0);
            (Some(precision), &after_dot[digits..])
        }
        None => (None, rest),
    };
    let conversion = rest.chars().next()?;
    if !matches!(conversion, 'i' | 'd' | 'f' | 'e' | 'g') {
        return None;
    }
    Some((prefix, precision, conversion, &rest[1..]))
}

/// C-style scientific notation: two-digit signed exponent.
fn format_exponent(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

/// C-style `%g`: shortest of fixed and scientific, trailing zeros removed.
#[allow(clippy::float_cmp)]
fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let scientific = format!("{value:.prec$e}", prec = precision - 1);
    let exponent: i32 = scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0);
    if exponent < -4 || exponent >= precision as i32 {
        let formatted = format_exponent(value, precision - 1);
        let (mantissa, exp) = formatted.split_once('e').unwrap_or((&formatted, ""));
        format!("{}e{exp}", trim_fraction(mantissa))
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Everything a renderer needs to draw the color legend.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Colorbar {
    /// Lower bound of the color range.
    pub vmin: f64,
    /// Upper bound of the color range.
    pub vmax: f64,
    /// Tick positions.
    pub ticks: Vec<f64>,
    /// Tick labels, formatted with the requested tick format.
    pub labels: Vec<String>,
    /// Gradient from `vmin` to `vmax`; values inside `±threshold` are gray.
    pub colors: Vec<Rgba>,
}

impl Colorbar {
    /// Builds ticks, labels and gradient for a color range.
    #[must_use]
    pub fn new(
        colormap: Colormap,
        vmin: f64,
        vmax: f64,
        tick_format: &str,
        threshold: Option<f64>,
    ) -> Self {
        let ticks = compute_ticks(vmin, vmax, tick_format, threshold);
        let labels = ticks.iter().map(|&t| format_tick(t, tick_format)).collect();
        let colors = (0..COLORBAR_STEPS)
            .map(|i| {
                let frac = i as f64 / (COLORBAR_STEPS - 1) as f64;
                let value = vmin + (vmax - vmin) * frac;
                match threshold {
                    Some(t) if value.abs() < t => Rgba::GRAY,
                    _ => colormap.apply(frac),
                }
            })
            .collect();
        Self {
            vmin,
            vmax,
            ticks,
            labels,
            colors,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use approx::assert_relative_eq;

    fn check_invariants(ticks: &[f64], vmin: f64, vmax: f64) {
        assert!((1..=N_TICKS).contains(&ticks.len()), "{ticks:?}");
        assert_eq!(ticks[0], vmin);
        assert_eq!(*ticks.last().unwrap(), vmax);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]), "{ticks:?}");
    }

    #[test]
    fn test_ticks_expected_values() {
        let cases: [(f64, f64, &str, &[f64]); 10] = [
            (0.0, 0.0, "%i", &[0.0]),
            (0.0, 3.0, "%i", &[0.0, 1.0, 2.0, 3.0]),
            (0.0, 4.0, "%i", &[0.0, 1.0, 2.0, 3.0, 4.0]),
            (1.0, 5.0, "%i", &[1.0, 2.0, 3.0, 4.0, 5.0]),
            (0.0, 5.0, "%i", &[0.0, 1.25, 2.5, 3.75, 5.0]),
            (0.0, 10.0, "%i", &[0.0, 2.5, 5.0, 7.5, 10.0]),
            (0.0, 0.0, "%.1f", &[0.0]),
            (0.0, 1.0, "%.1f", &[0.0, 0.25, 0.5, 0.75, 1.0]),
            (1.0, 2.0, "%.1f", &[1.0, 1.25, 1.5, 1.75, 2.0]),
            (1.1, 1.2, "%.1f", &[1.1, 1.125, 1.15, 1.175, 1.2]),
        ];
        for (vmin, vmax, fmt, expected) in cases {
            let ticks = compute_ticks(vmin, vmax, fmt, None);
            check_invariants(&ticks, vmin, vmax);
            assert_eq!(ticks.len(), expected.len(), "{vmin}..{vmax} {fmt}");
            for (tick, want) in ticks.iter().zip(expected) {
                assert_relative_eq!(*tick, *want, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_ticks_collapse_for_tiny_range() {
        let tiny = f64::from_bits(1);
        let ticks = compute_ticks(0.0, tiny, "%.1f", None);
        check_invariants(&ticks, 0.0, tiny);
        assert_eq!(ticks, vec![0.0, 5e-324]);
    }

    #[test]
    fn test_ticks_snap_to_threshold() {
        let ticks = compute_ticks(-10.0, 10.0, "%.2g", Some(3.0));
        check_invariants(&ticks, -10.0, 10.0);
        assert!(ticks.contains(&-3.0));
        assert!(ticks.contains(&3.0));
    }

    #[test]
    fn test_small_threshold_ignored() {
        let ticks = compute_ticks(-10.0, 10.0, "%.2g", Some(0.5));
        assert_eq!(ticks, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2.7, "%i"), "2");
        assert_eq!(format_tick(1.26, "%.1f"), "1.3");
        assert_eq!(format_tick(8.9, "%.2g"), "8.9");
        assert_eq!(format_tick(1234.0, "%.2g"), "1.2e+03");
        assert_eq!(format_tick(0.00012, "%.2g"), "0.00012");
        assert_eq!(format_tick(0.5, "%f"), "0.500000");
        assert_eq!(format_tick(1500.0, "%.1e"), "1.5e+03");
        assert_eq!(format_tick(3.0, "%.1f ms"), "3.0 ms");
        assert_eq!(format_tick(3.5, "auto"), "3.5");
    }

    #[test]
    fn test_colorbar_gradient_grays_threshold_band() {
        let colorbar = Colorbar::new(Colormap::ColdHot, -4.0, 4.0, "%.1f", Some(1.0));
        assert_eq!(colorbar.colors.len(), COLORBAR_STEPS);
        assert_eq!(colorbar.colors[COLORBAR_STEPS / 2], Rgba::GRAY);
        assert_eq!(colorbar.colors[0], Colormap::ColdHot.apply(0.0));
        assert_eq!(colorbar.labels.first().map(String::as_str), Some("-4.0"));
    }
}
