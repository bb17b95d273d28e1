//! Per-face color computation.
//!
//! Colors are built in two layers:
//! 1. **Background**: a gray shading from an optional background map
//!    (typically curvature or sulcal depth).
//! 2. **Data**: the aggregated surface map, normalized to the color range and
//!    passed through the colormap. Faces below threshold and faces whose value
//!    is NaN keep the background.

use crate::aggregate::{aggregate_faces, Reducer};
use crate::bounds::{colorbar_range, nan_min_max, SymmetricCbar};
use crate::colormap::Colormap;
use ndarray::{ArrayView1, ArrayViewD};
use rayon::prelude::*;
use surfview_core::error::{Error, Result};
use surfview_core::{Deprecation, Mesh, Rgba};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Background intensity of every vertex when no background map is given.
const DEFAULT_BACKGROUND: f64 = 0.5;

/// Opacity applied to the background layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Alpha {
    /// Fully opaque.
    #[default]
    Auto,
    /// Explicit opacity in `[0, 1]`.
    Value(f64),
}

impl Alpha {
    /// Numeric opacity.
    #[must_use]
    pub fn resolve(self) -> f64 {
        match self {
            Alpha::Auto => 1.0,
            Alpha::Value(alpha) => alpha,
        }
    }
}

/// Display options for a surface map.
#[derive(Clone, Debug)]
pub struct SurfaceStyle {
    /// Colormap for the data layer.
    pub colormap: Colormap,
    /// Vertex-to-face reducer.
    pub reducer: Reducer,
    /// Lower color bound (derived from data when unset).
    pub vmin: Option<f64>,
    /// Upper color bound (derived from data when unset).
    pub vmax: Option<f64>,
    /// Faces with `|value| < threshold` show the background.
    pub threshold: Option<f64>,
    /// Background opacity.
    pub alpha: Alpha,
    /// Deprecated background dimming factor.
    pub darkness: Option<f64>,
    /// Multiply data colors by the background shading.
    pub bg_on_data: bool,
    /// Symmetric colorbar policy.
    pub symmetric_cbar: SymmetricCbar,
    /// Whether a colorbar is produced.
    pub colorbar: bool,
    /// printf-style tick label format.
    pub cbar_tick_format: String,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            colormap: Colormap::Viridis,
            reducer: Reducer::Mean,
            vmin: None,
            vmax: None,
            threshold: None,
            alpha: Alpha::Auto,
            darkness: None,
            bg_on_data: false,
            symmetric_cbar: SymmetricCbar::Never,
            colorbar: false,
            cbar_tick_format: "%.2g".to_string(),
        }
    }
}

impl SurfaceStyle {
    /// Creates a style with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for statistical maps: diverging colormap, symmetric range,
    /// colorbar on.
    #[must_use]
    pub fn stat_map() -> Self {
        Self {
            colormap: Colormap::ColdHot,
            symmetric_cbar: SymmetricCbar::Auto,
            colorbar: true,
            ..Self::default()
        }
    }

    /// Defaults for region maps: median labels, zero regions hidden.
    #[must_use]
    pub fn roi() -> Self {
        Self {
            colormap: Colormap::RdYlBuR,
            reducer: Reducer::Median,
            threshold: Some(1e-14),
            ..Self::default()
        }
    }

    /// Set the colormap.
    #[must_use]
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Set the reducer.
    #[must_use]
    pub fn with_reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// Set the lower color bound.
    #[must_use]
    pub fn with_vmin(mut self, vmin: f64) -> Self {
        self.vmin = Some(vmin);
        self
    }

    /// Set the upper color bound.
    #[must_use]
    pub fn with_vmax(mut self, vmax: f64) -> Self {
        self.vmax = Some(vmax);
        self
    }

    /// Set the display threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the background opacity.
    #[must_use]
    pub fn with_alpha(mut self, alpha: Alpha) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the deprecated darkness factor.
    #[must_use]
    pub fn with_darkness(mut self, darkness: f64) -> Self {
        self.darkness = Some(darkness);
        self
    }

    /// Multiply data colors by the background.
    #[must_use]
    pub fn with_bg_on_data(mut self, bg_on_data: bool) -> Self {
        self.bg_on_data = bg_on_data;
        self
    }

    /// Set the symmetric colorbar policy.
    #[must_use]
    pub fn with_symmetric_cbar(mut self, symmetric: SymmetricCbar) -> Self {
        self.symmetric_cbar = symmetric;
        self
    }

    /// Enable or disable the colorbar.
    #[must_use]
    pub fn with_colorbar(mut self, colorbar: bool) -> Self {
        self.colorbar = colorbar;
        self
    }

    /// Set the tick label format.
    #[must_use]
    pub fn with_tick_format(mut self, format: impl Into<String>) -> Self {
        self.cbar_tick_format = format.into();
        self
    }
}

/// Result of a face coloring pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FaceColors {
    /// One color per mesh face.
    pub colors: Vec<Rgba>,
    /// Color range used for the data layer, if any.
    pub range: Option<(f64, f64)>,
    /// Deprecated inputs that were accepted.
    pub notices: Vec<Deprecation>,
}

impl FaceColors {
    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if there are no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of faces with non-zero alpha.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.colors.iter().filter(|c| c.a() > 0.0).count()
    }
}

/// Linear rescale of `value` into `[0, 1]`; a degenerate range maps to 0.5.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    if vmax == vmin {
        0.5
    } else {
        (value - vmin) / (vmax - vmin)
    }
}

/// Computes background shading per face.
///
/// Without a map every vertex has intensity 0.5. Face intensities leaving
/// `[0, 1]` are min-max rescaled into it. Intensity 0 renders white and 1
/// renders black.
pub fn compute_background_colors(
    mesh: &Mesh,
    bg_map: Option<ArrayViewD<'_, f64>>,
    darkness: Option<f64>,
    alpha: Alpha,
) -> Result<FaceColors> {
    let bg = bg_map
        .map(|map| mesh.check_vertex_data(map, "bg_map"))
        .transpose()?;
    shade_background(mesh, bg, darkness, alpha)
}

fn shade_background(
    mesh: &Mesh,
    bg: Option<ArrayView1<'_, f64>>,
    darkness: Option<f64>,
    alpha: Alpha,
) -> Result<FaceColors> {
    let mut intensities = match bg {
        Some(values) => aggregate_faces(values, mesh.faces(), &Reducer::Mean)?,
        None => vec![DEFAULT_BACKGROUND; mesh.n_faces()],
    };

    if let Some((lo, hi)) = nan_min_max(&intensities) {
        if lo < 0.0 || hi > 1.0 {
            let span = hi - lo;
            for v in &mut intensities {
                *v = if span > 0.0 { (*v - lo) / span } else { 0.0 };
            }
        }
    }

    let mut notices = Vec::new();
    if let Some(darkness) = darkness {
        for v in &mut intensities {
            *v *= darkness;
        }
        notices.push(Deprecation::Darkness.emit());
    }

    let alpha = alpha.resolve();
    let colors = intensities
        .par_iter()
        .map(|&v| {
            let shade = Colormap::GrayR.apply(v);
            shade.with_alpha(shade.a() * alpha)
        })
        .collect();

    Ok(FaceColors {
        colors,
        range: None,
        notices,
    })
}

/// Computes per-face colors for a surface map over an optional background.
///
/// All inputs are validated before any color is computed.
///
/// When every face value is NaN and no range can be derived, the data layer
/// is skipped: every face shows the opaque background and `range` is `None`.
///
/// # Errors
/// `Dimensionality` / `VertexCountMismatch` for malformed maps, reducer
/// errors from a custom reducer, `AsymmetricRange` from the color range.
pub fn compute_face_colors(
    mesh: &Mesh,
    surf_map: ArrayViewD<'_, f64>,
    bg_map: Option<ArrayViewD<'_, f64>>,
    style: &SurfaceStyle,
) -> Result<FaceColors> {
    let surf = mesh.check_vertex_data(surf_map, "surf_map")?;
    let bg = bg_map
        .map(|map| mesh.check_vertex_data(map, "bg_map"))
        .transpose()?;

    let face_values = aggregate_faces(surf, mesh.faces(), &style.reducer)?;
    let range = match colorbar_range(&face_values, style.vmin, style.vmax, style.symmetric_cbar) {
        Ok(range) => Some(range),
        Err(Error::EmptyData) => None,
        Err(err) => return Err(err),
    };

    let background = shade_background(mesh, bg, style.darkness, style.alpha)?;
    let Some((vmin, vmax)) = range else {
        log::debug!(
            "no finite value on {} faces, showing background only",
            mesh.n_faces()
        );
        let colors = background
            .colors
            .par_iter()
            .map(|bg| bg.with_alpha(1.0))
            .collect();
        return Ok(FaceColors {
            colors,
            range: None,
            notices: background.notices,
        });
    };
    log::debug!(
        "coloring {} faces with {} ({} reducer), range [{vmin}, {vmax}]",
        mesh.n_faces(),
        style.colormap,
        style.reducer.name()
    );

    let colors = face_values
        .par_iter()
        .zip(background.colors.par_iter())
        .map(|(&value, &bg)| data_color(value, bg, vmin, vmax, style))
        .collect();

    Ok(FaceColors {
        colors,
        range,
        notices: background.notices,
    })
}

fn data_color(value: f64, bg: Rgba, vmin: f64, vmax: f64, style: &SurfaceStyle) -> Rgba {
    if value.is_nan() {
        return bg.with_alpha(1.0);
    }
    if style.threshold.is_some_and(|t| value.abs() < t) {
        return bg;
    }
    let color = style.colormap.apply(normalize(value, vmin, vmax));
    if style.bg_on_data {
        color.multiply(bg)
    } else {
        color
    }
}
