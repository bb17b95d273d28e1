//! RGBA colors with channels in `[0, 1]`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An RGBA color, one `f64` per channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba(pub [f64; 4]);

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba([0.0, 0.0, 0.0, 1.0]);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);
    /// Opaque mid gray, used for thresholded colorbar bands.
    pub const GRAY: Rgba = Rgba([0.5, 0.5, 0.5, 1.0]);

    /// Creates a color from its channels.
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self([r, g, b, a])
    }

    /// Red channel.
    #[inline]
    #[must_use]
    pub fn r(&self) -> f64 {
        self.0[0]
    }

    /// Green channel.
    #[inline]
    #[must_use]
    pub fn g(&self) -> f64 {
        self.0[1]
    }

    /// Blue channel.
    #[inline]
    #[must_use]
    pub fn b(&self) -> f64 {
        self.0[2]
    }

    /// Alpha channel.
    #[inline]
    #[must_use]
    pub fn a(&self) -> f64 {
        self.0[3]
    }

    /// Returns the color with its alpha replaced.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha])
    }

    /// Channel-wise product, alpha included.
    #[inline]
    #[must_use]
    pub fn multiply(self, other: Rgba) -> Self {
        let [r, g, b, a] = self.0;
        let [or, og, ob, oa] = other.0;
        Self([r * or, g * og, b * ob, a * oa])
    }

    /// Linear interpolation between two colors, `t` in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Rgba, t: f64) -> Self {
        let mut out = [0.0; 4];
        for (i, channel) in out.iter_mut().enumerate() {
            *channel = self.0[i] + (other.0[i] - self.0[i]) * t;
        }
        Self(out)
    }

    /// Converts to 8-bit channels, clamping out-of-range values.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_u8(self) -> [u8; 4] {
        self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}
