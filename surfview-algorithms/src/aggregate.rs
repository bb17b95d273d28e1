//! Vertex-to-face aggregation.
//!
//! Faces are the rendering unit, so per-vertex scalars are reduced to one
//! value per triangle before coloring.

use ndarray::ArrayView1;
use rayon::prelude::*;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use surfview_core::error::{Error, Result};

/// Signature of a user-supplied reducer.
///
/// The return value is dynamically typed: a number is accepted, `null` is
/// read as a missing value (NaN), anything else is rejected.
pub type CustomReducerFn = dyn Fn(&[f64; 3]) -> Value + Send + Sync;

/// How the three vertex values of a face are combined.
#[derive(Clone, Default)]
pub enum Reducer {
    /// Arithmetic mean (default).
    #[default]
    Mean,
    /// Middle value.
    Median,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// User-supplied function.
    Custom(Arc<CustomReducerFn>),
}

impl Reducer {
    /// Wraps a closure as a custom reducer.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[f64; 3]) -> Value + Send + Sync + 'static,
    {
        Reducer::Custom(Arc::new(f))
    }

    /// Name used in logs and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Reducer::Mean => "mean",
            Reducer::Median => "median",
            Reducer::Min => "min",
            Reducer::Max => "max",
            Reducer::Custom(_) => "custom",
        }
    }

    /// Reduces the values of face `face`.
    ///
    /// Built-in reducers propagate NaN.
    pub fn reduce(&self, face: usize, values: [f64; 3]) -> Result<f64> {
        let [a, b, c] = values;
        let has_nan = values.iter().any(|v| v.is_nan());
        match self {
            Reducer::Custom(f) => custom_value(face, &f(&values)),
            _ if has_nan => Ok(f64::NAN),
            Reducer::Mean => Ok((a + b + c) / 3.0),
            Reducer::Median => {
                let mut sorted = values;
                sorted.sort_by(f64::total_cmp);
                Ok(sorted[1])
            }
            Reducer::Min => Ok(a.min(b).min(c)),
            Reducer::Max => Ok(a.max(b).max(c)),
        }
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reducer({})", self.name())
    }
}

impl FromStr for Reducer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" => Ok(Reducer::Mean),
            "median" => Ok(Reducer::Median),
            "min" => Ok(Reducer::Min),
            "max" => Ok(Reducer::Max),
            other => Err(Error::UnknownReducer(other.to_string())),
        }
    }
}

fn custom_value(face: usize, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| Error::CustomReducerType {
            face,
            got: value.to_string(),
        }),
        Value::Null => Ok(f64::NAN),
        Value::Array(_) => Err(Error::CustomReducerShape {
            face,
            got: value.to_string(),
        }),
        _ => Err(Error::CustomReducerType {
            face,
            got: value.to_string(),
        }),
    }
}

/// Reduces per-vertex `values` to one value per face.
///
/// Faces are processed in parallel; the output order matches `faces`.
pub fn aggregate_faces(
    values: ArrayView1<'_, f64>,
    faces: &[[usize; 3]],
    reducer: &Reducer,
) -> Result<Vec<f64>> {
    faces
        .par_iter()
        .enumerate()
        .map(|(face, &[i, j, k])| reducer.reduce(face, [values[i], values[j], values[k]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use serde_json::json;

    #[test]
    fn test_builtin_reducers() {
        let values = [3.0, -1.0, 2.0];
        assert_relative_eq!(Reducer::Mean.reduce(0, values).unwrap(), 4.0 / 3.0);
        assert_relative_eq!(Reducer::Median.reduce(0, values).unwrap(), 2.0);
        assert_relative_eq!(Reducer::Min.reduce(0, values).unwrap(), -1.0);
        assert_relative_eq!(Reducer::Max.reduce(0, values).unwrap(), 3.0);
    }

    #[test]
    fn test_nan_propagates() {
        for reducer in [Reducer::Mean, Reducer::Median, Reducer::Min, Reducer::Max] {
            assert!(reducer.reduce(0, [1.0, f64::NAN, 2.0]).unwrap().is_nan());
        }
    }

    #[test]
    fn test_parse_reducer_names() {
        assert_eq!("median".parse::<Reducer>().unwrap().name(), "median");
        let err = "foo".parse::<Reducer>().unwrap_err();
        assert_eq!(err, Error::UnknownReducer("foo".to_string()));
        assert!(err
            .to_string()
            .contains("avg_method should be either ['mean', 'median', 'max', 'min']"));
    }

    #[test]
    fn test_custom_reducer_product() {
        let reducer = Reducer::custom(|v| json!(v[0] * v[1] * v[2]));
        let values = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);
        let out = aggregate_faces(values.view(), &[[0, 1, 2], [1, 2, 3]], &reducer).unwrap();
        assert_relative_eq!(out[0], 6.0);
        assert_relative_eq!(out[1], 24.0);
    }

    #[test]
    fn test_custom_reducer_wrong_shape() {
        let reducer = Reducer::custom(|v| json!([v[0] * v[1], v[2]]));
        let err = reducer.reduce(4, [1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::CustomReducerShape { face: 4, .. }));
    }

    #[test]
    fn test_custom_reducer_wrong_type() {
        let reducer = Reducer::custom(|_| json!("string"));
        let err = reducer.reduce(0, [1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::CustomReducerType { face: 0, .. }));
        assert!(err.to_string().contains("should be an array of numbers"));
    }

    #[test]
    fn test_custom_reducer_null_is_missing() {
        let reducer = Reducer::custom(|_| Value::Null);
        assert!(reducer.reduce(0, [1.0, 2.0, 3.0]).unwrap().is_nan());
    }
}
