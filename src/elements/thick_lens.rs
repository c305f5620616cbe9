#![warn(missing_docs)]
//! Thick lens derived from focal length and working distance
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use super::{Abcd, Element, OpticalElement};
use crate::error::{ParaxError, ParaxResult};

/// A thick lens described by its focal length, front working distance and
/// center thickness.
///
/// Instead of modeling the two refracting surfaces explicitly, the transfer
/// matrix is solved algebraically from the imaging parameters:
/// `C = -1/sqrt(f · WD)`, `A = -f·C`, `B = thickness` and
/// `D = (1 + B·C) / A`, where `D` follows from the unimodularity constraint
/// `A·D − B·C = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThickLens {
    working_distance: f64,
    focal_length: f64,
    thickness: f64,
    diameter: f64,
    z: Option<f64>,
}

impl ThickLens {
    /// Creates a new [`ThickLens`].
    ///
    /// `working_distance` is the axial distance from the front vertex to the
    /// object plane, `focal_length` the effective focal length and `thickness`
    /// the center thickness of the lens (all in mm).
    ///
    /// # Errors
    /// This function returns an error if
    ///  - `focal_length * working_distance` is not positive and finite (the
    ///    matrix solution requires both to carry the same sign)
    ///  - `thickness` is negative or not finite
    pub fn new(working_distance: f64, focal_length: f64, thickness: f64) -> ParaxResult<Self> {
        let product = focal_length * working_distance;
        if product <= 0.0 || !product.is_finite() {
            return Err(ParaxError::Element(
                "focal length and working distance must be finite, nonzero and of equal sign"
                    .into(),
            ));
        }
        if thickness < 0.0 || !thickness.is_finite() {
            return Err(ParaxError::Element(
                "lens thickness must be >= 0 and finite".into(),
            ));
        }
        Ok(Self {
            working_distance,
            focal_length,
            thickness,
            diameter: f64::INFINITY,
            z: None,
        })
    }
    /// Place this element at the given axial position.
    #[must_use]
    pub const fn at(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
    /// Set the lens diameter (used for plotting extents only).
    ///
    /// # Errors
    /// This function returns an error if the diameter is not positive.
    pub fn with_diameter(mut self, diameter: f64) -> ParaxResult<Self> {
        if diameter <= 0.0 || diameter.is_nan() {
            return Err(ParaxError::Element("lens diameter must be > 0".into()));
        }
        self.diameter = diameter;
        Ok(self)
    }
    /// Returns the focal length of this [`ThickLens`].
    #[must_use]
    pub const fn focal_length(&self) -> f64 {
        self.focal_length
    }
    /// Returns the front working distance of this [`ThickLens`].
    #[must_use]
    pub const fn working_distance(&self) -> f64 {
        self.working_distance
    }
    /// Returns the diameter of this [`ThickLens`].
    #[must_use]
    pub const fn diameter(&self) -> f64 {
        self.diameter
    }
}

impl Element for ThickLens {
    fn matrix(&self) -> Matrix2<f64> {
        let c = -1.0 / (self.focal_length * self.working_distance).sqrt();
        let a = -self.focal_length * c;
        let b = self.thickness;
        let d = b.mul_add(c, 1.0) / a;
        Matrix2::new(a, b, c, d)
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        // the inverse has C > 0 and is not expressible as a ThickLens
        let m = self.matrix();
        let inverted = Matrix2::new(m[(1, 1)], -m[(0, 1)], -m[(1, 0)], m[(0, 0)]);
        Ok(Abcd::from_matrix(inverted)?
            .at_option(self.z.map(|z| z + self.thickness))
            .into())
    }
    fn name(&self) -> &'static str {
        "ThickLens"
    }
}
