//! surfview-core: Core types for brain-surface rendering.
//!
//! This crate provides the mesh, hemisphere/view selectors, camera types,
//! colors and the error taxonomy shared by the camera and color computations.
//!

pub mod color;
pub mod deprecation;
pub mod error;
pub mod mesh;
pub mod view;

pub use color::Rgba;
pub use deprecation::Deprecation;
pub use error::{Error, Result};
pub use mesh::{check_vertex_data, Mesh};
pub use view::{
    is_valid_hemisphere, is_valid_view, CameraAngles, CameraPose, Hemisphere, Vec3, View,
    ViewSpec,
};
