//! Hemisphere and view selectors, and the camera types they resolve to.

use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cortical hemisphere being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Hemisphere {
    Left,
    Right,
}

impl Hemisphere {
    /// All hemispheres, in display order.
    pub const ALL: [Hemisphere; 2] = [Hemisphere::Left, Hemisphere::Right];

    /// Lowercase name as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Hemisphere::Left => "left",
            Hemisphere::Right => "right",
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hemisphere {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Hemisphere::ALL
            .into_iter()
            .find(|hemi| hemi.as_str() == s)
            .ok_or_else(|| Error::InvalidHemisphere {
                got: s.to_string(),
                valid: join_names(Hemisphere::ALL.iter().map(|h| h.as_str())),
            })
    }
}

/// Named anatomical view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum View {
    Anterior,
    Posterior,
    Medial,
    Lateral,
    Dorsal,
    Ventral,
}

impl View {
    /// All named views.
    pub const ALL: [View; 6] = [
        View::Anterior,
        View::Posterior,
        View::Medial,
        View::Lateral,
        View::Dorsal,
        View::Ventral,
    ];

    /// Lowercase name as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            View::Anterior => "anterior",
            View::Posterior => "posterior",
            View::Medial => "medial",
            View::Lateral => "lateral",
            View::Dorsal => "dorsal",
            View::Ventral => "ventral",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| invalid_view(s))
    }
}

/// Camera orientation for a rotating-camera renderer, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraAngles {
    /// Elevation above the horizontal plane.
    pub elevation: f64,
    /// Azimuth around the vertical axis.
    pub azimuth: f64,
}

impl CameraAngles {
    /// Creates a new angle pair.
    #[inline]
    #[must_use]
    pub const fn new(elevation: f64, azimuth: f64) -> Self {
        Self {
            elevation,
            azimuth,
        }
    }
}

impl From<(f64, f64)> for CameraAngles {
    fn from((elevation, azimuth): (f64, f64)) -> Self {
        Self::new(elevation, azimuth)
    }
}

/// A requested view: a named anatomical view or explicit angles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ViewSpec {
    Named(View),
    Angles(CameraAngles),
}

impl ViewSpec {
    /// Parses a dynamically typed view.
    ///
    /// Accepts a string naming a view, or an array of exactly two numbers
    /// interpreted as `[elevation, azimuth]`.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => name.parse().map(ViewSpec::Named),
            Value::Array(items) if items.len() == 2 => {
                match (items[0].as_f64(), items[1].as_f64()) {
                    (Some(elevation), Some(azimuth))
                        if elevation.is_finite() && azimuth.is_finite() =>
                    {
                        Ok(ViewSpec::Angles(CameraAngles::new(elevation, azimuth)))
                    }
                    _ => Err(invalid_view(&value.to_string())),
                }
            }
            _ => Err(invalid_view(&value.to_string())),
        }
    }
}

impl From<View> for ViewSpec {
    fn from(view: View) -> Self {
        ViewSpec::Named(view)
    }
}

impl From<CameraAngles> for ViewSpec {
    fn from(angles: CameraAngles) -> Self {
        ViewSpec::Angles(angles)
    }
}

impl From<(f64, f64)> for ViewSpec {
    fn from(angles: (f64, f64)) -> Self {
        ViewSpec::Angles(angles.into())
    }
}

impl FromStr for ViewSpec {
    type Err = Error;

    /// Parses `lateral`-style names or `ELEV,AZIM` pairs of finite numbers.
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(view) = s.parse::<View>() {
            return Ok(ViewSpec::Named(view));
        }
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [elev, azim] => match (elev.parse::<f64>(), azim.parse::<f64>()) {
                (Ok(elevation), Ok(azimuth)) if elevation.is_finite() && azimuth.is_finite() => {
                    Ok(ViewSpec::Angles(CameraAngles::new(elevation, azimuth)))
                }
                _ => Err(invalid_view(s)),
            },
            _ => Err(invalid_view(s)),
        }
    }
}

/// A 3D vector in the ray-camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Largest absolute component difference to `other`.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

/// Camera placement for a ray-based renderer looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraPose {
    /// Camera position.
    pub eye: Vec3,
    /// Direction that points up in the rendered image.
    pub up: Vec3,
    /// Point the camera looks at.
    pub center: Vec3,
}

impl CameraPose {
    /// True when every vector of both poses agrees within `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.eye.max_abs_diff(&other.eye) <= tolerance
            && self.up.max_abs_diff(&other.up) <= tolerance
            && self.center.max_abs_diff(&other.center) <= tolerance
    }
}

/// Returns true if `hemi` names a hemisphere.
#[must_use]
pub fn is_valid_hemisphere(hemi: &str) -> bool {
    hemi.parse::<Hemisphere>().is_ok()
}

/// Returns true if `view` is a view name or a pair of numbers.
#[must_use]
pub fn is_valid_view(view: &Value) -> bool {
    ViewSpec::from_value(view).is_ok()
}

fn invalid_view(got: &str) -> Error {
    Error::InvalidView {
        got: got.to_string(),
        valid: join_names(View::ALL.iter().map(|v| v.as_str())),
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
