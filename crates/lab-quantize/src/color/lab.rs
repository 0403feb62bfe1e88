//! CIE L*a*b* perceptual color space
//!
//! Euclidean distance in L*a*b* approximates perceived color difference,
//! which is what palette matching minimizes.
//!
//! Forward and inverse transforms take their white point explicitly. The
//! `From` conversions use [`WhitePoint::D65_FORWARD`] going into L*a*b* and
//! [`WhitePoint::D65_INVERSE`] coming back out.

use super::linear_rgb::LinearRgb;
use super::srgb::Rgb;
use super::xyz::{linear_to_xyz, xyz_to_srgb, WhitePoint, Xyz};

/// 6/29, the knee of the L*a*b* companding function.
const DELTA: f64 = 6.0 / 29.0;

/// A color in CIE L*a*b* space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Components as `[L, a, b]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// Euclidean distance.
    ///
    /// ```
    /// use lab_quantize::Lab;
    /// let d = Lab::new(3.0, 4.0, 5.0).distance(Lab::new(6.0, 8.0, 10.0));
    /// assert!((d - 50f64.sqrt()).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn distance(self, other: Lab) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

#[inline]
fn f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn f_inverse(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// XYZ to L*a*b* relative to `white`.
#[inline]
pub fn xyz_to_lab(xyz: Xyz, white: WhitePoint) -> Lab {
    let fx = f(xyz.x / white.x);
    let fy = f(xyz.y / white.y);
    let fz = f(xyz.z / white.z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// L*a*b* to XYZ relative to `white`.
#[inline]
pub fn lab_to_xyz(lab: Lab, white: WhitePoint) -> Xyz {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    Xyz {
        x: f_inverse(fx) * white.x,
        y: f_inverse(fy) * white.y,
        z: f_inverse(fz) * white.z,
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        xyz_to_lab(xyz, WhitePoint::D65_FORWARD)
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        lab_to_xyz(lab, WhitePoint::D65_INVERSE)
    }
}

impl From<LinearRgb> for Lab {
    fn from(linear: LinearRgb) -> Self {
        Lab::from(linear_to_xyz(linear))
    }
}

impl From<Rgb> for Lab {
    /// Full forward chain: gamma decode, XYZ matrix, L*a*b* transform.
    fn from(rgb: Rgb) -> Self {
        Lab::from(LinearRgb::from(rgb))
    }
}

impl From<Lab> for Rgb {
    /// Full inverse chain: L*a*b* inverse, XYZ matrix, gamma encode, clamp.
    fn from(lab: Lab) -> Self {
        xyz_to_srgb(Xyz::from(lab))
    }
}
