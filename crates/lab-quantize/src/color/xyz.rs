//! CIE XYZ tristimulus values (D65)
//!
//! XYZ is the device-independent bridge between linear RGB and L*a*b*.
//! Values are on the 0..~1 scale produced by multiplying linear RGB with the
//! sRGB/D65 matrix; white points are published on the 0..100 scale.

use super::linear_rgb::LinearRgb;
use super::srgb::Rgb;

/// Linear sRGB to XYZ (D65).
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.072175],
    [0.0193339, 0.119192, 0.9503041],
];

/// XYZ (D65) to linear sRGB. The four-digit published inverse, not the exact
/// inverse of [`RGB_TO_XYZ`].
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.204, 1.057],
];

/// A color in CIE XYZ space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Reference white used to normalize XYZ for the L*a*b* transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WhitePoint {
    /// D65 white used by the forward XYZ → L*a*b* transform.
    pub const D65_FORWARD: WhitePoint = WhitePoint {
        x: 95.0489,
        y: 100.0,
        z: 108.884,
    };

    /// D65 white used by the inverse L*a*b* → XYZ transform.
    ///
    /// Differs from [`WhitePoint::D65_FORWARD`] in the last digits.
    pub const D65_INVERSE: WhitePoint = WhitePoint {
        x: 95.047,
        y: 100.0,
        z: 108.883,
    };
}

#[inline]
fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Linear RGB to XYZ through the fixed sRGB/D65 matrix.
#[inline]
pub fn linear_to_xyz(linear: LinearRgb) -> Xyz {
    let [x, y, z] = mul(&RGB_TO_XYZ, [linear.r, linear.g, linear.b]);
    Xyz { x, y, z }
}

/// XYZ to linear RGB through the published inverse matrix. Unclamped.
#[inline]
pub fn xyz_to_linear(xyz: Xyz) -> LinearRgb {
    let [r, g, b] = mul(&XYZ_TO_RGB, [xyz.x, xyz.y, xyz.z]);
    LinearRgb { r, g, b }
}

/// XYZ to 8-bit sRGB: inverse matrix, gamma encode, clamp, round.
///
/// Out-of-gamut XYZ (negative or >1 linear channels) is clamped per channel.
#[inline]
pub fn xyz_to_srgb(xyz: Xyz) -> Rgb {
    Rgb::from(xyz_to_linear(xyz))
}

impl From<LinearRgb> for Xyz {
    fn from(linear: LinearRgb) -> Self {
        linear_to_xyz(linear)
    }
}

impl From<Rgb> for Xyz {
    fn from(rgb: Rgb) -> Self {
        linear_to_xyz(LinearRgb::from(rgb))
    }
}

impl From<Xyz> for LinearRgb {
    fn from(xyz: Xyz) -> Self {
        xyz_to_linear(xyz)
    }
}

impl From<Xyz> for Rgb {
    fn from(xyz: Xyz) -> Self {
        xyz_to_srgb(xyz)
    }
}
