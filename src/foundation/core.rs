pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Signed 8.8 fixed-point value as stored by the container format.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Fixed8(pub i16);

impl Fixed8 {
    /// Fixed-point `1.0`.
    pub const ONE: Fixed8 = Fixed8(1 << 8);
    /// Fixed-point `0.0`.
    pub const ZERO: Fixed8 = Fixed8(0);

    /// Nearest representable value of `v`, saturating at the format bounds.
    pub fn from_f64(v: f64) -> Self {
        let raw = (v * 256.0)
            .round()
            .clamp(f64::from(i16::MIN), f64::from(i16::MAX));
        Self(raw as i16)
    }

    /// Convert to floating point.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 256.0
    }
}

/// Per-channel multiply/add color transform applied to a placed character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorTransform {
    /// Red, green, blue, alpha multipliers.
    pub mult: [Fixed8; 4],
    /// Red, green, blue, alpha offsets.
    pub add: [i16; 4],
}

impl ColorTransform {
    /// The transform that leaves colors unchanged.
    pub const IDENTITY: ColorTransform = ColorTransform {
        mult: [Fixed8::ONE; 4],
        add: [0; 4],
    };

    /// Uniform alpha multiplier, leaving color channels untouched.
    pub fn alpha(a: f64) -> Self {
        let mut out = Self::IDENTITY;
        out.mult[3] = Fixed8::from_f64(a);
        out
    }

    /// Return `true` when applying this transform is a no-op.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for ColorTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
