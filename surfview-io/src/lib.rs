//! surfview-io: Request reading and scene writing for surfview.
//!
//! Requests are JSON documents bundling a mesh, per-vertex maps and display
//! options. Scenes are written as JSON or as per-face CSV.
//!

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::{ContourRequest, MeshRequest, StyleRequest, SurfaceRequest};
pub use writer::{SceneFormat, SceneWriter};
