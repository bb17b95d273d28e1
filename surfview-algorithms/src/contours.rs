//! Region outlines from a parcellation.
//!
//! A contour is the ring of faces along the border of a labeled region. Each
//! requested level becomes one [`ContourEdge`] that can be painted over an
//! existing face coloring.

use crate::colormap::Colormap;
use ndarray::ArrayViewD;
use surfview_core::error::{Error, Result};
use surfview_core::{check_vertex_data, Mesh, Rgba};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Marks the faces on the border of a region.
///
/// `region` lists the vertex indices belonging to the region. A region vertex
/// lies on the edge when it belongs to a face with exactly two region
/// vertices; a face is on the edge when it touches an edge vertex and is not
/// fully inside the region.
///
/// # Errors
/// `NotARegion` when no face has at least two region vertices.
pub fn faces_on_edge(mesh: &Mesh, region: &[usize]) -> Result<Vec<bool>> {
    let mut in_region = vec![false; mesh.n_vertices()];
    for &v in region {
        if let Some(slot) = in_region.get_mut(v) {
            *slot = true;
        }
    }

    let per_face: Vec<usize> = mesh
        .faces()
        .iter()
        .map(|face| face.iter().filter(|&&v| in_region[v]).count())
        .collect();
    if per_face.iter().all(|&n| n < 2) {
        return Err(Error::NotARegion);
    }

    let mut on_edge = vec![false; mesh.n_vertices()];
    for (face, _) in mesh
        .faces()
        .iter()
        .zip(&per_face)
        .filter(|&(_, &n)| n == 2)
    {
        for &v in face {
            if in_region[v] {
                on_edge[v] = true;
            }
        }
    }

    Ok(mesh
        .faces()
        .iter()
        .zip(&per_face)
        .map(|(face, &n)| n < 3 && face.iter().any(|&v| on_edge[v]))
        .collect())
}

/// Options for [`compute_contours`].
#[derive(Debug, Clone, Default)]
pub struct ContourOptions {
    /// Parcellation values to outline (default: every distinct non-NaN value).
    pub levels: Option<Vec<f64>>,
    /// Legend label per level.
    pub labels: Option<Vec<String>>,
    /// Color per level (default: evenly spaced samples of `colormap`).
    pub colors: Option<Vec<Rgba>>,
    /// Colormap used when `colors` is unset.
    pub colormap: Colormap,
}

impl ContourOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline only these levels.
    #[must_use]
    pub fn with_levels(mut self, levels: Vec<f64>) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Attach a legend label to each level.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Use explicit colors per level.
    #[must_use]
    pub fn with_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Colormap for default colors.
    #[must_use]
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }
}

/// Outline of one parcellation level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ContourEdge {
    /// Parcellation value.
    pub level: f64,
    /// Legend label.
    pub label: Option<String>,
    /// Outline color.
    pub color: Rgba,
    /// Indices of the outlined faces.
    pub faces: Vec<usize>,
}

/// All outlines of a parcellation.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Contours {
    /// One entry per level, in level order.
    pub edges: Vec<ContourEdge>,
}

impl Contours {
    /// Overwrites outlined faces in `face_colors`; later levels win.
    pub fn paint(&self, face_colors: &mut [Rgba]) {
        for edge in &self.edges {
            for &face in &edge.faces {
                if let Some(color) = face_colors.get_mut(face) {
                    *color = edge.color;
                }
            }
        }
    }

    /// Legend entries for labeled levels.
    pub fn legend(&self) -> impl Iterator<Item = (&str, Rgba)> {
        self.edges
            .iter()
            .filter_map(|e| e.label.as_deref().map(|label| (label, e.color)))
    }
}

/// Computes region outlines for each level of `parcellation`.
///
/// # Errors
/// Shape errors (reported as `roi_map`), `ContourArgumentLength` when
/// levels, labels and colors disagree in length, `NotARegion` when a level's
/// vertices do not span a face.
#[allow(clippy::float_cmp)]
pub fn compute_contours(
    mesh: &Mesh,
    parcellation: ArrayViewD<'_, f64>,
    options: &ContourOptions,
) -> Result<Contours> {
    let parcellation = check_vertex_data(parcellation, mesh.n_vertices(), "roi_map")?;

    let levels = match &options.levels {
        Some(levels) => levels.clone(),
        None => {
            let mut levels: Vec<f64> = parcellation.iter().copied().filter(|v| !v.is_nan()).collect();
            levels.sort_by(f64::total_cmp);
            levels.dedup();
            levels
        }
    };

    let labels_len = options.labels.as_ref().map(Vec::len);
    let colors_len = options.colors.as_ref().map(Vec::len);
    if labels_len.is_some_and(|n| n != levels.len()) || colors_len.is_some_and(|n| n != levels.len())
    {
        return Err(Error::ContourArgumentLength {
            levels: options.levels.as_ref().map(Vec::len),
            labels: labels_len,
            colors: colors_len,
        });
    }

    let colors = options
        .colors
        .clone()
        .unwrap_or_else(|| options.colormap.sample(levels.len()));

    let mut edges = Vec::with_capacity(levels.len());
    for (i, &level) in levels.iter().enumerate() {
        let region: Vec<usize> = parcellation
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == level)
            .map(|(idx, _)| idx)
            .collect();
        let faces = faces_on_edge(mesh, &region)?
            .into_iter()
            .enumerate()
            .filter_map(|(face, edge)| edge.then_some(face))
            .collect();
        edges.push(ContourEdge {
            level,
            label: options.labels.as_ref().map(|labels| labels[i].clone()),
            color: colors[i],
            faces,
        });
    }

    log::debug!("computed {} contour levels", edges.len());
    Ok(Contours { edges })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use ndarray::Array1;

    /// A fan of six triangles around vertex 0.
    fn fan() -> Mesh {
        let mut vertices = vec![[0.0, 0.0, 0.0]];
        for i in 0..6 {
            let angle = f64::from(i) * std::f64::consts::FRAC_PI_3;
            vertices.push([angle.cos(), angle.sin(), 0.0]);
        }
        let faces = (0..6).map(|i| [0, i + 1, (i + 1) % 6 + 1]).collect();
        Mesh::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_single_face_region_edge() {
        let mesh = fan();
        let edge = faces_on_edge(&mesh, &[0, 1, 2]).unwrap();
        // face 0 is fully inside; its neighbors share two region vertices
        assert!(!edge[0]);
        assert!(edge[1]);
        assert!(edge[5]);
    }

    #[test]
    fn test_scattered_vertices_are_not_a_region() {
        let mesh = fan();
        assert_eq!(faces_on_edge(&mesh, &[1, 3]).unwrap_err(), Error::NotARegion);
        assert_eq!(faces_on_edge(&mesh, &[]).unwrap_err(), Error::NotARegion);
    }

    #[test]
    fn test_contours_default_levels_and_colors() {
        let mesh = fan();
        let parcellation = Array1::from(vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 1.0]);
        let contours = compute_contours(&mesh, parcellation.view().into_dyn(), &ContourOptions::new())
            .unwrap();
        assert_eq!(contours.edges.len(), 2);
        assert_eq!(contours.edges[0].level, 1.0);
        assert_eq!(contours.edges[0].color, Colormap::Viridis.apply(0.0));
        assert_eq!(contours.edges[1].color, Colormap::Viridis.apply(1.0));
        assert_eq!(contours.legend().count(), 0);
    }

    #[test]
    fn test_contours_argument_lengths() {
        let mesh = fan();
        let parcellation = Array1::from(vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 1.0]);
        let options = ContourOptions::new()
            .with_levels(vec![1.0, 2.0])
            .with_labels(vec!["a".into(), "b".into()])
            .with_colors(vec![Rgba::BLACK]);
        let err = compute_contours(&mesh, parcellation.view().into_dyn(), &options).unwrap_err();
        assert_eq!(
            err,
            Error::ContourArgumentLength {
                levels: Some(2),
                labels: Some(2),
                colors: Some(1),
            }
        );
    }

    #[test]
    fn test_paint_overwrites_edge_faces() {
        let mesh = fan();
        let parcellation = Array1::from(vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let options = ContourOptions::new()
            .with_levels(vec![1.0])
            .with_labels(vec!["region".into()])
            .with_colors(vec![Rgba::WHITE]);
        let contours = compute_contours(&mesh, parcellation.view().into_dyn(), &options).unwrap();
        let mut colors = vec![Rgba::BLACK; mesh.n_faces()];
        contours.paint(&mut colors);
        assert_eq!(colors[0], Rgba::BLACK);
        assert_eq!(colors[1], Rgba::WHITE);
        assert_eq!(contours.legend().next(), Some(("region", Rgba::WHITE)));
    }
}
