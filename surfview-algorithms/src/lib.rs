//! surfview-algorithms: Camera resolution and face coloring for brain surfaces.
//!
//! This crate provides:
//! - **camera** - named anatomical views resolved to rotating-camera angles or
//!   ray-camera poses
//! - **aggregate** / **bounds** / **colormap** - vertex-to-face reduction,
//!   color range and gradient lookup
//! - **facecolors** / **roi** - per-face RGBA for statistical and region maps
//! - **colorbar** - tick positions, labels and gradient
//! - **contours** - region outlines from a parcellation
//! - **layout** - engine selection, multi-panel grids and titles
//!
#![warn(missing_docs)]

mod aggregate;
mod bounds;
pub mod camera;
mod colorbar;
mod colormap;
mod contours;
mod facecolors;
mod layout;
mod processing;
mod roi;

pub use aggregate::{aggregate_faces, CustomReducerFn, Reducer};
pub use bounds::{colorbar_range, compute_bounds, nan_min_max, SymmetricCbar};
pub use camera::{resolve_matplotlib_view, resolve_plotly_view, CAMERA_RADIUS};
pub use colorbar::{compute_ticks, format_tick, Colorbar, COLORBAR_STEPS, N_TICKS};
pub use colormap::Colormap;
pub use contours::{compute_contours, faces_on_edge, ContourEdge, ContourOptions, Contours};
pub use facecolors::{
    compute_background_colors, compute_face_colors, normalize, Alpha, FaceColors, SurfaceStyle,
};
pub use layout::{Engine, Panel, SurfaceLayout, TitleFont, TitleLayout};
pub use processing::{compute_surface_scene, MapKind, SceneParams, SceneSink, SurfaceScene};
pub use roi::{check_roi_map, compute_roi_colors};

// Re-export core validation helpers
pub use surfview_core::{is_valid_hemisphere, is_valid_view};
