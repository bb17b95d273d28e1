//! Rendering engine selection and multi-panel figure layout.

use crate::camera::{resolve_angles, resolve_pose};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use surfview_core::error::{Error, Result};
use surfview_core::{CameraAngles, CameraPose, Hemisphere, ViewSpec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Target renderer; decides which camera convention is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Engine {
    /// Rotating camera (elevation and azimuth).
    #[default]
    Matplotlib,
    /// Ray camera (eye, up and center).
    Plotly,
}

impl Engine {
    /// Engine name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Matplotlib => "matplotlib",
            Engine::Plotly => "plotly",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "matplotlib" => Ok(Engine::Matplotlib),
            "plotly" => Ok(Engine::Plotly),
            _ => Err(Error::UnknownEngine(s.to_string())),
        }
    }
}

/// One cell of a [`SurfaceLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Panel {
    /// Row index (one row per view).
    pub row: usize,
    /// Column index (one column per hemisphere).
    pub col: usize,
    /// Hemisphere shown.
    pub hemisphere: Hemisphere,
    /// Requested view.
    pub view: ViewSpec,
    /// Rotating-camera angles.
    pub angles: CameraAngles,
    /// Ray-camera pose.
    pub pose: CameraPose,
}

/// Grid of hemisphere/view panels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SurfaceLayout {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Panels in row-major order.
    pub panels: Vec<Panel>,
}

impl SurfaceLayout {
    /// Validates a grid of hemispheres (columns) and views (rows).
    ///
    /// Every hemisphere is checked before any view.
    ///
    /// # Errors
    /// `InvalidHemisphere` or `InvalidView` for the first offending entry.
    pub fn new(hemispheres: &[&str], views: &[Value]) -> Result<Self> {
        let hemispheres = hemispheres
            .iter()
            .map(|h| h.parse::<Hemisphere>())
            .collect::<Result<Vec<_>>>()?;
        let views = views
            .iter()
            .map(ViewSpec::from_value)
            .collect::<Result<Vec<_>>>()?;

        let panels = views
            .iter()
            .enumerate()
            .flat_map(|(row, &view)| {
                hemispheres
                    .iter()
                    .enumerate()
                    .map(move |(col, &hemisphere)| Panel {
                        row,
                        col,
                        hemisphere,
                        view,
                        angles: resolve_angles(hemisphere, view),
                        pose: resolve_pose(hemisphere, view),
                    })
            })
            .collect();

        Ok(Self {
            rows: views.len(),
            cols: hemispheres.len(),
            panels,
        })
    }

    /// Panel at `(row, col)`.
    #[must_use]
    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        if col >= self.cols {
            return None;
        }
        self.panels.get(row * self.cols + col)
    }
}

/// Title font settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TitleFont {
    /// Point size.
    pub size: f64,
    /// CSS color string.
    pub color: String,
}

/// Title placement for a ray-camera figure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TitleLayout {
    /// Title text.
    pub text: String,
    /// Horizontal position in figure coordinates.
    pub x: f64,
    /// Vertical position in figure coordinates.
    pub y: f64,
    /// Horizontal anchor.
    pub xanchor: &'static str,
    /// Vertical anchor.
    pub yanchor: &'static str,
    /// Font settings.
    pub font: TitleFont,
}

impl TitleLayout {
    /// Centered title near the top edge; `None` without a title.
    #[must_use]
    pub fn new(title: Option<&str>, font_size: f64, color: &str) -> Option<Self> {
        title.map(|text| Self {
            text: text.to_string(),
            x: 0.5,
            y: 0.96,
            xanchor: "center",
            yanchor: "top",
            font: TitleFont {
                size: font_size,
                color: color.to_string(),
            },
        })
    }
}
