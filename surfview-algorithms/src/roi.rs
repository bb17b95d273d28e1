//! Region-of-interest maps.
//!
//! A region map assigns an integer label to every vertex; zero is background.
//! Negative and non-integer labels are deprecated but still rendered.

use crate::bounds::nan_min_max;
use crate::facecolors::{compute_face_colors, FaceColors, SurfaceStyle};
use ndarray::ArrayViewD;
use surfview_core::error::Result;
use surfview_core::{check_vertex_data, Deprecation, Mesh};

/// Validates a region map and reports deprecated label values.
///
/// # Errors
/// `Dimensionality` or `VertexCountMismatch` (reported as `roi_map`).
pub fn check_roi_map(roi_map: ArrayViewD<'_, f64>, n_vertices: usize) -> Result<Vec<Deprecation>> {
    let labels = check_vertex_data(roi_map, n_vertices, "roi_map")?;
    let mut notices = Vec::new();
    if labels.iter().any(|&v| v < 0.0) {
        notices.push(Deprecation::NegativeRoiValues.emit());
    }
    if labels.iter().any(|&v| v.is_finite() && v.fract() != 0.0) {
        notices.push(Deprecation::NonIntegerRoiValues.emit());
    }
    Ok(notices)
}

/// Computes face colors for a region map.
///
/// Unset color bounds default to the label extremes over vertices, so the
/// colorbar matches regardless of how faces are reduced.
pub fn compute_roi_colors(
    mesh: &Mesh,
    roi_map: ArrayViewD<'_, f64>,
    bg_map: Option<ArrayViewD<'_, f64>>,
    style: &SurfaceStyle,
) -> Result<FaceColors> {
    let mut notices = check_roi_map(roi_map.clone(), mesh.n_vertices())?;

    let mut style = style.clone();
    let labels: Vec<f64> = roi_map.iter().copied().collect();
    if let Some((lo, hi)) = nan_min_max(&labels) {
        style.vmin = style.vmin.or(Some(lo));
        style.vmax = style.vmax.or(Some(hi));
    }

    let mut colors = compute_face_colors(mesh, roi_map, bg_map, &style)?;
    notices.append(&mut colors.notices);
    colors.notices = notices;
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};
    use surfview_core::Error;

    fn mesh() -> Mesh {
        let vertices = (0..5).map(|i| [f64::from(i), 0.0, 0.0]).collect();
        Mesh::new(vertices, vec![[0, 1, 2], [1, 2, 3], [2, 3, 4]]).unwrap()
    }

    #[test]
    fn test_clean_map_has_no_notices() {
        let roi = Array1::from(vec![0.0, 1.0, 1.0, 2.0, 0.0]);
        assert!(check_roi_map(roi.view().into_dyn(), 5).unwrap().is_empty());
    }

    #[test]
    fn test_negative_and_fractional_labels_warn() {
        let roi = Array1::from(vec![-1.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(
            check_roi_map(roi.view().into_dyn(), 5).unwrap(),
            vec![Deprecation::NegativeRoiValues]
        );
        let roi = Array1::from(vec![1.2, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(
            check_roi_map(roi.view().into_dyn(), 5).unwrap(),
            vec![Deprecation::NonIntegerRoiValues]
        );
    }

    #[test]
    fn test_shape_errors() {
        let roi = Array2::<f64>::zeros((2, 5));
        let err = check_roi_map(roi.view().into_dyn(), 5).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("'roi_map' can only have one dimension"));
        let roi = Array1::<f64>::zeros(3);
        let err = check_roi_map(roi.view().into_dyn(), 5).unwrap_err();
        assert!(matches!(err, Error::VertexCountMismatch { name: "roi_map", .. }));
    }

    #[test]
    fn test_roi_colors_keep_nan_faces_opaque() {
        let mesh = mesh();
        let roi = Array1::from(vec![f64::NAN, 3.0, f64::NAN, 7.0, 7.0]);
        let colors =
            compute_roi_colors(&mesh, roi.view().into_dyn(), None, &SurfaceStyle::roi()).unwrap();
        assert_eq!(colors.visible_count(), mesh.n_faces());
        assert_eq!(colors.range, Some((3.0, 7.0)));
    }

    #[test]
    fn test_roi_explicit_vmin_kept() {
        let mesh = mesh();
        let roi = Array1::from(vec![0.0, 3.0, 3.0, 7.0, 7.0]);
        let style = SurfaceStyle::roi().with_vmin(2.0);
        let colors = compute_roi_colors(&mesh, roi.view().into_dyn(), None, &style).unwrap();
        assert_eq!(colors.range, Some((2.0, 7.0)));
    }
}
