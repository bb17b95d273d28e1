//! Non-fatal deprecation notices.
//!
//! Deprecated inputs are still honored. Each notice is logged at `warn`
//! level when emitted and handed back to the caller alongside the result.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A deprecated input that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Deprecation {
    /// The `darkness` background scaling was set.
    Darkness,
    /// A region map contained negative labels.
    NegativeRoiValues,
    /// A region map contained non-integer labels.
    NonIntegerRoiValues,
}

impl Deprecation {
    /// Logs the notice and returns it.
    #[must_use]
    pub fn emit(self) -> Self {
        log::warn!("{self}");
        self
    }
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deprecation::Darkness => write!(
                f,
                "The `darkness` parameter is deprecated. We recommend leaving `darkness` unset"
            ),
            Deprecation::NegativeRoiValues => write!(
                f,
                "Negative values in roi_map will no longer be allowed"
            ),
            Deprecation::NonIntegerRoiValues => write!(
                f,
                "Non-integer values in roi_map will no longer be allowed"
            ),
        }
    }
}
