//! Error types for surfview-core.

use thiserror::Error;

/// Result type alias for surfview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for surfview operations.
///
/// Every variant is a validation failure raised before any color or camera
/// output is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Hemisphere selector outside `{left, right}`.
    #[error("Invalid hemispheres definition.\nGot: {got}\nValid values are: {valid}")]
    InvalidHemisphere { got: String, valid: String },

    /// View is neither a known name nor a pair of numeric angles.
    #[error("Invalid view definition.\nGot: {got}\nValid values are: {valid}, or a pair (elevation, azimuth) of numbers")]
    InvalidView { got: String, valid: String },

    /// Per-vertex data whose length differs from the mesh vertex count.
    #[error("{name} does not have the same number of vertices as the mesh: expected {expected}, got {got}")]
    VertexCountMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    /// Per-vertex data with more than one dimension.
    #[error("'{name}' can only have one dimension but has {ndim} dimensions")]
    Dimensionality { name: &'static str, ndim: usize },

    /// Reducer name outside the built-in set.
    #[error("avg_method should be either ['mean', 'median', 'max', 'min'] or a custom function, got '{0}'")]
    UnknownReducer(String),

    /// Custom reducer produced a sequence instead of a single number.
    #[error("Array computed with the custom function from avg_method does not have the correct shape: face {face} reduced to {got}")]
    CustomReducerShape { face: usize, got: String },

    /// Custom reducer produced something that is not a number.
    #[error("Array computed with the custom function from avg_method should be an array of numbers (int or float): face {face} reduced to {got}")]
    CustomReducerType { face: usize, got: String },

    /// Face referencing a vertex outside the mesh.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidFaceIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A color range had to be derived from data holding no finite value.
    #[error("cannot derive a color range from data without non-NaN values")]
    EmptyData,

    /// Colormap name not in the registry.
    #[error("unknown colormap: '{0}'")]
    UnknownColormap(String),

    /// Rendering engine name not recognized.
    #[error("Unknown plotting engine '{0}'. Valid engines are: matplotlib, plotly")]
    UnknownEngine(String),

    /// Symmetric colorbar requested with a non-symmetric explicit range.
    #[error("vmin ({vmin}) must be equal to -vmax ({vmax}) unless symmetric_cbar is disabled")]
    AsymmetricRange { vmin: f64, vmax: f64 },

    /// Parcellation label whose vertices do not span a single face.
    #[error("Vertices in parcellation do not form region.")]
    NotARegion,

    /// Contour levels, labels and colors given with inconsistent lengths.
    #[error("Levels, labels, and colors argument need to be either the same length or None (got levels={levels:?}, labels={labels:?}, colors={colors:?})")]
    ContourArgumentLength {
        levels: Option<usize>,
        labels: Option<usize>,
        colors: Option<usize>,
    },
}
