//! High-level helpers that combine camera resolution and face coloring into a
//! renderable scene.

use crate::camera::{parse_view_request, resolve_angles, resolve_pose};
use crate::colorbar::Colorbar;
use crate::contours::Contours;
use crate::facecolors::{compute_face_colors, SurfaceStyle};
use crate::layout::{Engine, TitleLayout};
use crate::roi::compute_roi_colors;
use ndarray::ArrayViewD;
use serde_json::Value;
use surfview_core::error::Result;
use surfview_core::{CameraAngles, CameraPose, Deprecation, Hemisphere, Mesh, Rgba, ViewSpec};

#[cfg(feature = "serde")]
use serde::Serialize;

/// How the per-vertex map is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapKind {
    /// Continuous statistical values.
    #[default]
    Stat,
    /// Integer region labels.
    Roi,
}

/// Scene-level parameters that are not part of the color style.
#[derive(Clone, Debug)]
pub struct SceneParams {
    /// Hemisphere name (`left` or `right`).
    pub hemisphere: String,
    /// View name or `[elevation, azimuth]`.
    pub view: Value,
    /// Target renderer.
    pub engine: Engine,
    /// Map interpretation.
    pub map_kind: MapKind,
    /// Figure title.
    pub title: Option<String>,
    /// Title point size.
    pub title_font_size: f64,
    /// Title color.
    pub title_color: String,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            hemisphere: "left".to_string(),
            view: Value::from("lateral"),
            engine: Engine::Matplotlib,
            map_kind: MapKind::Stat,
            title: None,
            title_font_size: 18.0,
            title_color: "black".to_string(),
        }
    }
}

impl SceneParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hemisphere name.
    #[must_use]
    pub fn with_hemisphere(mut self, hemisphere: impl Into<String>) -> Self {
        self.hemisphere = hemisphere.into();
        self
    }

    /// Set the view (name or `[elevation, azimuth]`).
    #[must_use]
    pub fn with_view(mut self, view: impl Into<Value>) -> Self {
        self.view = view.into();
        self
    }

    /// Set the rendering engine.
    #[must_use]
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Set the map interpretation.
    #[must_use]
    pub fn with_map_kind(mut self, map_kind: MapKind) -> Self {
        self.map_kind = map_kind;
        self
    }

    /// Set the figure title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Everything a renderer needs to draw one surface panel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SurfaceScene {
    /// Target renderer.
    pub engine: Engine,
    /// Hemisphere shown.
    pub hemisphere: Hemisphere,
    /// Resolved view.
    pub view: ViewSpec,
    /// Set for the rotating-camera engine.
    pub camera_angles: Option<CameraAngles>,
    /// Set for the ray-camera engine.
    pub camera_pose: Option<CameraPose>,
    /// One color per mesh face.
    pub face_colors: Vec<Rgba>,
    /// Color range of the data layer.
    pub range: Option<(f64, f64)>,
    /// Colorbar, when requested.
    pub colorbar: Option<Colorbar>,
    /// Contour outlines painted over the faces.
    pub contours: Option<Contours>,
    /// Title placement.
    pub title: Option<TitleLayout>,
    /// Deprecated inputs that were accepted.
    pub notices: Vec<Deprecation>,
}

impl SurfaceScene {
    /// Paints contour outlines over the face colors and keeps their legend.
    #[must_use]
    pub fn with_contours(mut self, contours: Contours) -> Self {
        contours.paint(&mut self.face_colors);
        self.contours = Some(contours);
        self
    }
}

/// Destination for computed scenes.
pub trait SceneSink {
    /// Error raised while writing.
    type Error;

    /// Writes one scene.
    ///
    /// # Errors
    /// Implementation specific.
    fn write_scene(&mut self, scene: &SurfaceScene) -> std::result::Result<(), Self::Error>;
}

/// Resolves the camera and colors a surface map in one pass.
///
/// The hemisphere and view are validated before the map is touched.
///
/// # Errors
/// Any validation error from camera resolution or face coloring.
pub fn compute_surface_scene(
    mesh: &Mesh,
    surf_map: ArrayViewD<'_, f64>,
    bg_map: Option<ArrayViewD<'_, f64>>,
    params: &SceneParams,
    style: &SurfaceStyle,
) -> Result<SurfaceScene> {
    let (hemisphere, view) = parse_view_request(&params.hemisphere, &params.view)?;

    let face_colors = match params.map_kind {
        MapKind::Stat => compute_face_colors(mesh, surf_map, bg_map, style)?,
        MapKind::Roi => compute_roi_colors(mesh, surf_map, bg_map, style)?,
    };

    let (camera_angles, camera_pose) = match params.engine {
        Engine::Matplotlib => (Some(resolve_angles(hemisphere, view)), None),
        Engine::Plotly => (None, Some(resolve_pose(hemisphere, view))),
    };

    let colorbar = match face_colors.range {
        Some((vmin, vmax)) if style.colorbar => Some(Colorbar::new(
            style.colormap,
            vmin,
            vmax,
            &style.cbar_tick_format,
            style.threshold,
        )),
        _ => None,
    };

    let title = TitleLayout::new(
        params.title.as_deref(),
        params.title_font_size,
        &params.title_color,
    );

    log::debug!(
        "scene for {hemisphere} {view:?} ({} engine): {} faces, {} notices",
        params.engine,
        face_colors.len(),
        face_colors.notices.len()
    );

    Ok(SurfaceScene {
        engine: params.engine,
        hemisphere,
        view,
        camera_angles,
        camera_pose,
        range: face_colors.range,
        face_colors: face_colors.colors,
        colorbar,
        contours: None,
        title,
        notices: face_colors.notices,
    })
}
