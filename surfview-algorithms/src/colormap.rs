//! Colormap definitions and lookup.
//!
//! Each colormap is a short list of color stops interpolated linearly in RGB.
//! The gradients approximate the matplotlib maps of the same name.

use std::fmt;
use std::str::FromStr;
use surfview_core::error::{Error, Result};
use surfview_core::Rgba;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

type Stops = &'static [(f64, [f64; 3])];

const GRAY: Stops = &[(0.0, [0.0, 0.0, 0.0]), (1.0, [1.0, 1.0, 1.0])];
const GRAY_R: Stops = &[(0.0, [1.0, 1.0, 1.0]), (1.0, [0.0, 0.0, 0.0])];
const HOT: Stops = &[
    (0.0, [0.0416, 0.0, 0.0]),
    (0.365, [1.0, 0.0, 0.0]),
    (0.746, [1.0, 1.0, 0.0]),
    (1.0, [1.0, 1.0, 1.0]),
];
const VIRIDIS: Stops = &[
    (0.0, [0.267, 0.005, 0.329]),
    (0.25, [0.229, 0.322, 0.546]),
    (0.5, [0.128, 0.567, 0.551]),
    (0.75, [0.369, 0.789, 0.383]),
    (1.0, [0.993, 0.906, 0.144]),
];
const COLD_HOT: Stops = &[
    (0.0, [0.0, 1.0, 1.0]),
    (0.25, [0.0, 0.0, 1.0]),
    (0.5, [0.0, 0.0, 0.0]),
    (0.75, [1.0, 0.0, 0.0]),
    (1.0, [1.0, 1.0, 0.0]),
];
const RDBU_R: Stops = &[
    (0.0, [0.020, 0.188, 0.380]),
    (0.25, [0.263, 0.576, 0.765]),
    (0.5, [0.969, 0.969, 0.969]),
    (0.75, [0.839, 0.376, 0.302]),
    (1.0, [0.404, 0.0, 0.122]),
];
const RDYLBU_R: Stops = &[
    (0.0, [0.192, 0.212, 0.584]),
    (0.25, [0.455, 0.678, 0.820]),
    (0.5, [1.0, 1.0, 0.749]),
    (0.75, [0.957, 0.427, 0.263]),
    (1.0, [0.647, 0.0, 0.149]),
];

/// Available colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Colormap {
    /// Black to white.
    #[cfg_attr(feature = "serde", serde(rename = "gray"))]
    Gray,
    /// White to black; used for background shading.
    #[cfg_attr(feature = "serde", serde(rename = "gray_r"))]
    GrayR,
    /// Black to red to yellow to white.
    #[cfg_attr(feature = "serde", serde(rename = "hot"))]
    Hot,
    /// Blue to teal to green to yellow.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "viridis"))]
    Viridis,
    /// Diverging cyan/blue to black to red/yellow; default for stat maps.
    #[cfg_attr(feature = "serde", serde(rename = "cold_hot"))]
    ColdHot,
    /// Diverging blue to white to red.
    #[cfg_attr(feature = "serde", serde(rename = "RdBu_r"))]
    RdBuR,
    /// Diverging blue to yellow to red.
    #[cfg_attr(feature = "serde", serde(rename = "RdYlBu_r"))]
    RdYlBuR,
}

impl Colormap {
    /// All registered colormaps.
    pub const ALL: [Colormap; 7] = [
        Colormap::Gray,
        Colormap::GrayR,
        Colormap::Hot,
        Colormap::Viridis,
        Colormap::ColdHot,
        Colormap::RdBuR,
        Colormap::RdYlBuR,
    ];

    /// Registry name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Colormap::Gray => "gray",
            Colormap::GrayR => "gray_r",
            Colormap::Hot => "hot",
            Colormap::Viridis => "viridis",
            Colormap::ColdHot => "cold_hot",
            Colormap::RdBuR => "RdBu_r",
            Colormap::RdYlBuR => "RdYlBu_r",
        }
    }

    fn stops(self) -> Stops {
        match self {
            Colormap::Gray => GRAY,
            Colormap::GrayR => GRAY_R,
            Colormap::Hot => HOT,
            Colormap::Viridis => VIRIDIS,
            Colormap::ColdHot => COLD_HOT,
            Colormap::RdBuR => RDBU_R,
            Colormap::RdYlBuR => RDYLBU_R,
        }
    }

    /// Apply the colormap to a normalized value in `[0, 1]`.
    ///
    /// Out-of-range values are clamped; NaN maps to the low end.
    #[must_use]
    pub fn apply(self, val: f64) -> Rgba {
        let t = if val.is_nan() { 0.0 } else { val.clamp(0.0, 1.0) };
        let stops = self.stops();
        let upper = stops
            .iter()
            .position(|&(pos, _)| pos >= t)
            .unwrap_or(stops.len() - 1)
            .max(1);
        let (p0, c0) = stops[upper - 1];
        let (p1, c1) = stops[upper];
        let frac = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
        let low = Rgba::new(c0[0], c0[1], c0[2], 1.0);
        let high = Rgba::new(c1[0], c1[1], c1[2], 1.0);
        low.lerp(high, frac)
    }

    /// `n` colors evenly spaced over the whole gradient.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(self, n: usize) -> Vec<Rgba> {
        match n {
            0 => Vec::new(),
            1 => vec![self.apply(0.0)],
            _ => (0..n)
                .map(|i| self.apply(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Colormap::ALL
            .into_iter()
            .find(|cmap| cmap.name() == s)
            .ok_or_else(|| Error::UnknownColormap(s.to_string()))
    }
}
