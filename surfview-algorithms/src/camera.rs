//! Camera resolution for named anatomical views.
//!
//! Two renderer conventions are supported:
//! - **Rotating camera**: an `(elevation, azimuth)` pair in degrees.
//! - **Ray camera**: `eye`/`up`/`center` vectors, eye at radius 1.5 from the
//!   origin, always looking at the origin.
//!
//! Lateral and medial are mirrored between hemispheres, so both tables are
//! keyed by `(hemisphere, view)`.

use serde_json::Value;
use surfview_core::error::Result;
use surfview_core::view::{CameraAngles, CameraPose, Hemisphere, Vec3, View, ViewSpec};

/// Distance from the origin at which the ray camera is placed.
pub const CAMERA_RADIUS: f64 = 1.5;

const ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const Z_UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Rotating-camera angles per hemisphere and view.
const VIEW_ANGLES: [(Hemisphere, View, CameraAngles); 12] = [
    (Hemisphere::Left, View::Anterior, CameraAngles::new(0.0, 90.0)),
    (Hemisphere::Left, View::Posterior, CameraAngles::new(0.0, 270.0)),
    (Hemisphere::Left, View::Medial, CameraAngles::new(0.0, 0.0)),
    (Hemisphere::Left, View::Lateral, CameraAngles::new(0.0, 180.0)),
    (Hemisphere::Left, View::Dorsal, CameraAngles::new(90.0, 0.0)),
    (Hemisphere::Left, View::Ventral, CameraAngles::new(270.0, 0.0)),
    (Hemisphere::Right, View::Anterior, CameraAngles::new(0.0, 90.0)),
    (Hemisphere::Right, View::Posterior, CameraAngles::new(0.0, 270.0)),
    (Hemisphere::Right, View::Medial, CameraAngles::new(0.0, 180.0)),
    (Hemisphere::Right, View::Lateral, CameraAngles::new(0.0, 0.0)),
    (Hemisphere::Right, View::Dorsal, CameraAngles::new(90.0, 0.0)),
    (Hemisphere::Right, View::Ventral, CameraAngles::new(270.0, 0.0)),
];

/// Ray-camera `(eye, up)` per hemisphere and view.
const VIEW_CAMERAS: [(Hemisphere, View, Vec3, Vec3); 12] = [
    (Hemisphere::Left, View::Anterior, Vec3::new(0.0, 1.5, 0.0), Z_UP),
    (Hemisphere::Left, View::Posterior, Vec3::new(0.0, -1.5, 0.0), Z_UP),
    (Hemisphere::Left, View::Medial, Vec3::new(1.5, 0.0, 0.0), Z_UP),
    (Hemisphere::Left, View::Lateral, Vec3::new(-1.5, 0.0, 0.0), Z_UP),
    (Hemisphere::Left, View::Dorsal, Vec3::new(0.0, 0.0, 1.5), Vec3::new(-1.0, 0.0, 0.0)),
    (Hemisphere::Left, View::Ventral, Vec3::new(0.0, 0.0, -1.5), Vec3::new(1.0, 0.0, 0.0)),
    (Hemisphere::Right, View::Anterior, Vec3::new(0.0, 1.5, 0.0), Z_UP),
    (Hemisphere::Right, View::Posterior, Vec3::new(0.0, -1.5, 0.0), Z_UP),
    (Hemisphere::Right, View::Medial, Vec3::new(-1.5, 0.0, 0.0), Z_UP),
    (Hemisphere::Right, View::Lateral, Vec3::new(1.5, 0.0, 0.0), Z_UP),
    (Hemisphere::Right, View::Dorsal, Vec3::new(0.0, 0.0, 1.5), Vec3::new(-1.0, 0.0, 0.0)),
    (Hemisphere::Right, View::Ventral, Vec3::new(0.0, 0.0, -1.5), Vec3::new(1.0, 0.0, 0.0)),
];

/// Row of `(hemi, view)` in both tables; rows follow enum declaration order.
fn table_row(hemi: Hemisphere, view: View) -> usize {
    hemi as usize * View::ALL.len() + view as usize
}

/// Rotating-camera angles of a named view.
#[must_use]
pub fn view_angles(hemi: Hemisphere, view: View) -> CameraAngles {
    VIEW_ANGLES[table_row(hemi, view)].2
}

/// Ray-camera pose of a named view, read from the camera table.
#[must_use]
pub fn camera_from_named_view(hemi: Hemisphere, view: View) -> CameraPose {
    let (_, _, eye, up) = VIEW_CAMERAS[table_row(hemi, view)];
    CameraPose {
        eye,
        up,
        center: ORIGIN,
    }
}

/// Ray-camera pose placed on a sphere of radius [`CAMERA_RADIUS`].
///
/// The up vector is tilted with elevation, so looking straight down (or up)
/// gets a horizontal up vector instead of a degenerate one.
#[must_use]
pub fn camera_from_angles(angles: CameraAngles) -> CameraPose {
    let elev = angles.elevation.to_radians();
    let azim = angles.azimuth.to_radians();
    let r = CAMERA_RADIUS;
    CameraPose {
        eye: Vec3::new(
            r * azim.cos() * elev.cos(),
            r * azim.sin() * elev.cos(),
            r * elev.sin(),
        ),
        up: Vec3::new(
            elev.sin() * (azim + std::f64::consts::PI).cos(),
            elev.sin() * (azim + std::f64::consts::PI).sin(),
            elev.cos(),
        ),
        center: ORIGIN,
    }
}

/// Resolves a typed view to rotating-camera angles.
#[must_use]
pub fn resolve_angles(hemi: Hemisphere, view: ViewSpec) -> CameraAngles {
    match view {
        ViewSpec::Named(view) => view_angles(hemi, view),
        ViewSpec::Angles(angles) => angles,
    }
}

/// Resolves a typed view to a ray-camera pose.
#[must_use]
pub fn resolve_pose(hemi: Hemisphere, view: ViewSpec) -> CameraPose {
    match view {
        ViewSpec::Named(view) => camera_from_named_view(hemi, view),
        ViewSpec::Angles(angles) => camera_from_angles(angles),
    }
}

/// Validates `hemi` and then `view`, returning the typed pair.
///
/// # Errors
/// `InvalidHemisphere` or `InvalidView`.
pub fn parse_view_request(hemi: &str, view: &Value) -> Result<(Hemisphere, ViewSpec)> {
    let hemi = hemi.parse::<Hemisphere>()?;
    let view = ViewSpec::from_value(view)?;
    Ok((hemi, view))
}

/// Rotating-camera angles for an untyped hemisphere/view request.
///
/// # Errors
/// `InvalidHemisphere` is reported before `InvalidView`.
pub fn resolve_matplotlib_view(hemi: &str, view: &Value) -> Result<CameraAngles> {
    let (hemi, view) = parse_view_request(hemi, view)?;
    Ok(resolve_angles(hemi, view))
}

/// Ray-camera pose for an untyped hemisphere/view request.
///
/// # Errors
/// `InvalidHemisphere` is reported before `InvalidView`.
pub fn resolve_plotly_view(hemi: &str, view: &Value) -> Result<CameraPose> {
    let (hemi, view) = parse_view_request(hemi, view)?;
    Ok(resolve_pose(hemi, view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use surfview_core::Error;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_table_rows_match_keys() {
        for hemi in Hemisphere::ALL {
            for view in View::ALL {
                let row = table_row(hemi, view);
                assert_eq!((VIEW_ANGLES[row].0, VIEW_ANGLES[row].1), (hemi, view));
                assert_eq!((VIEW_CAMERAS[row].0, VIEW_CAMERAS[row].1), (hemi, view));
            }
        }
    }

    #[test]
    fn test_angle_and_named_paths_agree() {
        for hemi in Hemisphere::ALL {
            for view in View::ALL {
                let named = camera_from_named_view(hemi, view);
                let computed = camera_from_angles(view_angles(hemi, view));
                assert!(
                    named.approx_eq(&computed, TOL),
                    "{hemi}/{view}: {named:?} != {computed:?}"
                );
            }
        }
    }

    #[test]
    fn test_lateral_is_mirrored() {
        let left = view_angles(Hemisphere::Left, View::Lateral);
        let right = view_angles(Hemisphere::Right, View::Lateral);
        assert_eq!(left, CameraAngles::new(0.0, 180.0));
        assert_eq!(right, CameraAngles::new(0.0, 0.0));
        assert_eq!(view_angles(Hemisphere::Left, View::Medial), right);
    }

    #[test]
    fn test_dorsal_up_vector_is_horizontal() {
        let pose = camera_from_angles(CameraAngles::new(90.0, 0.0));
        assert!(pose.up.max_abs_diff(&Vec3::new(-1.0, 0.0, 0.0)) < TOL);
        assert!(pose.eye.max_abs_diff(&Vec3::new(0.0, 0.0, 1.5)) < TOL);
    }

    #[test]
    fn test_explicit_angles_pass_through() {
        let angles = resolve_matplotlib_view("left", &json!([210.0, 90.0])).unwrap();
        assert_eq!(angles, CameraAngles::new(210.0, 90.0));
    }

    #[test]
    fn test_hemisphere_checked_before_view() {
        let err = resolve_plotly_view("foo", &json!("bar")).unwrap_err();
        assert!(matches!(err, Error::InvalidHemisphere { .. }));
        let err = resolve_matplotlib_view("left", &json!("foo")).unwrap_err();
        assert!(matches!(err, Error::InvalidView { .. }));
    }
}
