//! Triangulated surface mesh and per-vertex data validation.

use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayViewD, Ix1};

/// Triangulated surface geometry.
///
/// Faces index into the vertex list; indices are checked on construction so
/// that downstream lookups cannot go out of bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<[f64; 3]>,
    faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Creates a mesh, rejecting faces that reference missing vertices.
    pub fn new(vertices: Vec<[f64; 3]>, faces: Vec<[usize; 3]>) -> Result<Self> {
        let vertex_count = vertices.len();
        for (face, corners) in faces.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&idx| idx >= vertex_count) {
                return Err(Error::InvalidFaceIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Vertex coordinates.
    #[must_use]
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    /// Triangles as vertex index triples.
    #[must_use]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Number of vertices.
    #[must_use]
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[must_use]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Validates per-vertex data against this mesh.
    ///
    /// `name` identifies the map in error messages (`surf_map`, `bg_map`, ...).
    pub fn check_vertex_data<'a>(
        &self,
        data: ArrayViewD<'a, f64>,
        name: &'static str,
    ) -> Result<ArrayView1<'a, f64>> {
        check_vertex_data(data, self.n_vertices(), name)
    }
}

/// Checks that `data` is one-dimensional with one value per vertex.
pub fn check_vertex_data<'a>(
    data: ArrayViewD<'a, f64>,
    n_vertices: usize,
    name: &'static str,
) -> Result<ArrayView1<'a, f64>> {
    let ndim = data.ndim();
    let data = data
        .into_dimensionality::<Ix1>()
        .map_err(|_| Error::Dimensionality { name, ndim })?;
    if data.len() != n_vertices {
        return Err(Error::VertexCountMismatch {
            name,
            expected: n_vertices,
            got: data.len(),
        });
    }
    Ok(data)
}
