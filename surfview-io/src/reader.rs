//! JSON request reader.
//!
//! A request bundles everything needed to compute one scene:
//!
//! ```json
//! {
//!   "mesh": { "vertices": [[0, 0, 0], ...], "faces": [[0, 1, 2], ...] },
//!   "surf_map": [0.5, null, 1.2, ...],
//!   "bg_map": [...],
//!   "kind": "stat",
//!   "hemi": "left",
//!   "view": "lateral",
//!   "engine": "plotly",
//!   "title": "My map",
//!   "style": { "cmap": "cold_hot", "threshold": 1.0, "alpha": "auto" },
//!   "contours": { "parcellation": [...], "levels": [1, 2] }
//! }
//! ```
//!
//! `null` entries in per-vertex arrays are read as NaN. Names (colormap,
//! reducer, engine) are validated by the same parsers the library uses.

use crate::{Error, Result};
use ndarray::Array1;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use surfview_algorithms::{
    compute_contours, compute_surface_scene, Alpha, Colormap, ContourOptions, Engine, MapKind,
    Reducer, SceneParams, SurfaceScene, SurfaceStyle, SymmetricCbar,
};
use surfview_core::{Mesh, Rgba};

/// Mesh geometry as stored in a request.
#[derive(Debug, Clone, Deserialize)]
pub struct MeshRequest {
    /// Vertex coordinates.
    pub vertices: Vec<[f64; 3]>,
    /// Triangles as vertex index triples.
    pub faces: Vec<[usize; 3]>,
}

impl MeshRequest {
    /// Builds a validated mesh.
    ///
    /// # Errors
    /// `Core(InvalidFaceIndex)` for out-of-range faces.
    pub fn build(&self) -> Result<Mesh> {
        Ok(Mesh::new(self.vertices.clone(), self.faces.clone())?)
    }
}

/// Display options as stored in a request. Unset fields keep the defaults of
/// the map kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleRequest {
    /// Colormap name.
    pub cmap: Option<String>,
    /// Reducer name (`mean`, `median`, `min`, `max`).
    pub avg_method: Option<String>,
    /// Lower color bound.
    pub vmin: Option<f64>,
    /// Upper color bound.
    pub vmax: Option<f64>,
    /// Display threshold.
    pub threshold: Option<f64>,
    /// `"auto"` or a number.
    pub alpha: Option<Value>,
    /// Deprecated background dimming.
    pub darkness: Option<f64>,
    /// Multiply data colors by the background.
    pub bg_on_data: Option<bool>,
    /// `"auto"`, `true` or `false`.
    pub symmetric_cbar: Option<Value>,
    /// Produce a colorbar.
    pub colorbar: Option<bool>,
    /// printf-style tick format.
    pub cbar_tick_format: Option<String>,
}

impl StyleRequest {
    /// Resolves the options on top of the defaults for `kind`.
    ///
    /// # Errors
    /// `Core` for unknown colormap or reducer names, `InvalidFormat` for
    /// malformed `alpha` or `symmetric_cbar`.
    pub fn build(&self, kind: MapKind) -> Result<SurfaceStyle> {
        let mut style = match kind {
            MapKind::Stat => SurfaceStyle::stat_map(),
            MapKind::Roi => SurfaceStyle::roi(),
        };
        if let Some(cmap) = &self.cmap {
            style = style.with_colormap(cmap.parse::<Colormap>()?);
        }
        if let Some(method) = &self.avg_method {
            style = style.with_reducer(method.parse::<Reducer>()?);
        }
        style.vmin = self.vmin.or(style.vmin);
        style.vmax = self.vmax.or(style.vmax);
        style.threshold = self.threshold.or(style.threshold);
        style.darkness = self.darkness;
        if let Some(alpha) = &self.alpha {
            style = style.with_alpha(parse_alpha(alpha)?);
        }
        if let Some(bg_on_data) = self.bg_on_data {
            style = style.with_bg_on_data(bg_on_data);
        }
        if let Some(symmetric) = &self.symmetric_cbar {
            style = style.with_symmetric_cbar(parse_symmetric_cbar(symmetric)?);
        }
        if let Some(colorbar) = self.colorbar {
            style = style.with_colorbar(colorbar);
        }
        if let Some(format) = &self.cbar_tick_format {
            style = style.with_tick_format(format.as_str());
        }
        Ok(style)
    }
}

fn parse_alpha(value: &Value) -> Result<Alpha> {
    match value {
        Value::String(s) if s == "auto" => Ok(Alpha::Auto),
        Value::Number(n) => n
            .as_f64()
            .map(Alpha::Value)
            .ok_or_else(|| Error::InvalidFormat(format!("alpha out of range: {n}"))),
        other => Err(Error::InvalidFormat(format!(
            "alpha must be 'auto' or a number, got {other}"
        ))),
    }
}

fn parse_symmetric_cbar(value: &Value) -> Result<SymmetricCbar> {
    match value {
        Value::String(s) if s == "auto" => Ok(SymmetricCbar::Auto),
        Value::Bool(true) => Ok(SymmetricCbar::Always),
        Value::Bool(false) => Ok(SymmetricCbar::Never),
        other => Err(Error::InvalidFormat(format!(
            "symmetric_cbar must be 'auto', true or false, got {other}"
        ))),
    }
}

/// Contour outlines as stored in a request.
#[derive(Debug, Clone, Deserialize)]
pub struct ContourRequest {
    /// Per-vertex region labels.
    pub parcellation: Vec<Option<f64>>,
    /// Levels to outline.
    #[serde(default)]
    pub levels: Option<Vec<f64>>,
    /// Legend label per level.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// RGBA color per level.
    #[serde(default)]
    pub colors: Option<Vec<[f64; 4]>>,
    /// Colormap for default colors.
    #[serde(default)]
    pub cmap: Option<String>,
}

impl ContourRequest {
    /// Parcellation array and contour options.
    ///
    /// # Errors
    /// `Core(UnknownColormap)` for an unknown colormap name.
    pub fn build(&self) -> Result<(Array1<f64>, ContourOptions)> {
        let mut options = ContourOptions::new();
        options.levels.clone_from(&self.levels);
        options.labels.clone_from(&self.labels);
        options.colors = self
            .colors
            .as_ref()
            .map(|colors| colors.iter().copied().map(Rgba).collect());
        if let Some(cmap) = &self.cmap {
            options = options.with_colormap(cmap.parse()?);
        }
        Ok((to_array(&self.parcellation), options))
    }
}

fn default_hemisphere() -> String {
    "left".to_string()
}

fn default_view() -> Value {
    Value::from("lateral")
}

/// A complete scene request.
#[derive(Debug, Clone, Deserialize)]
pub struct SurfaceRequest {
    /// Surface geometry.
    pub mesh: MeshRequest,
    /// Per-vertex data.
    pub surf_map: Vec<Option<f64>>,
    /// Per-vertex background shading.
    #[serde(default)]
    pub bg_map: Option<Vec<Option<f64>>>,
    /// `stat` (default) or `roi`.
    #[serde(default)]
    pub kind: Option<String>,
    /// Hemisphere name.
    #[serde(default = "default_hemisphere")]
    pub hemi: String,
    /// View name or `[elevation, azimuth]`.
    #[serde(default = "default_view")]
    pub view: Value,
    /// `matplotlib` (default) or `plotly`.
    #[serde(default)]
    pub engine: Option<String>,
    /// Figure title.
    #[serde(default)]
    pub title: Option<String>,
    /// Display options.
    #[serde(default)]
    pub style: StyleRequest,
    /// Optional contour outlines.
    #[serde(default)]
    pub contours: Option<ContourRequest>,
}

impl SurfaceRequest {
    /// Reads a request from a JSON file.
    ///
    /// # Errors
    /// `Io` if the file cannot be opened, `Json` if it is not a valid request.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let request = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("read request from {}", path.as_ref().display());
        Ok(request)
    }

    /// Parses a request from a JSON string.
    ///
    /// # Errors
    /// `Json` if the text is not a valid request.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Map interpretation.
    ///
    /// # Errors
    /// `InvalidFormat` for anything but `stat` or `roi`.
    pub fn map_kind(&self) -> Result<MapKind> {
        match self.kind.as_deref() {
            None | Some("stat") => Ok(MapKind::Stat),
            Some("roi") => Ok(MapKind::Roi),
            Some(other) => Err(Error::InvalidFormat(format!(
                "kind must be 'stat' or 'roi', got '{other}'"
            ))),
        }
    }

    /// Scene parameters.
    ///
    /// # Errors
    /// `Core(UnknownEngine)` or an invalid `kind`.
    pub fn params(&self) -> Result<SceneParams> {
        let engine = match &self.engine {
            Some(name) => name.parse::<Engine>()?,
            None => Engine::default(),
        };
        let mut params = SceneParams::new()
            .with_hemisphere(self.hemi.as_str())
            .with_view(self.view.clone())
            .with_engine(engine)
            .with_map_kind(self.map_kind()?);
        params.title.clone_from(&self.title);
        Ok(params)
    }

    /// Resolved display style.
    ///
    /// # Errors
    /// See [`StyleRequest::build`].
    pub fn style(&self) -> Result<SurfaceStyle> {
        self.style.build(self.map_kind()?)
    }

    /// Validates the request and computes the scene.
    ///
    /// # Errors
    /// Any request, camera or coloring error.
    pub fn render(&self) -> Result<SurfaceScene> {
        let params = self.params()?;
        let style = self.style()?;
        let mesh = self.mesh.build()?;

        let surf_map = to_array(&self.surf_map);
        let bg_map = self.bg_map.as_deref().map(to_array);
        let scene = compute_surface_scene(
            &mesh,
            surf_map.view().into_dyn(),
            bg_map.as_ref().map(|map| map.view().into_dyn()),
            &params,
            &style,
        )?;

        match &self.contours {
            Some(request) => {
                let (parcellation, options) = request.build()?;
                let contours = compute_contours(&mesh, parcellation.view().into_dyn(), &options)?;
                Ok(scene.with_contours(contours))
            }
            None => Ok(scene),
        }
    }
}

fn to_array(values: &[Option<f64>]) -> Array1<f64> {
    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}
