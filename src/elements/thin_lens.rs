#![warn(missing_docs)]
//! Ideal thin lens
use nalgebra::Matrix2;
use num::Zero;
use serde::{Deserialize, Serialize};

use super::{Element, OpticalElement};
use crate::error::{ParaxError, ParaxResult};

/// An ideal thin lens of a given focal length.
///
/// Matrix `[[1, 0], [-1/f, 1]]`. A positive focal length focuses, a negative
/// one defocuses. An infinite focal length models a plane window (no-op).
/// The optional diameter only affects plotting; vignetting is modeled by a
/// separate [`Stop`](super::Stop).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThinLens {
    focal_length: f64,
    diameter: f64,
    z: Option<f64>,
}

impl ThinLens {
    /// Creates a new [`ThinLens`] with the given focal length (mm).
    ///
    /// # Errors
    /// This function returns an error if the focal length is 0.0 or `NaN`.
    pub fn new(focal_length: f64) -> ParaxResult<Self> {
        if focal_length.is_zero() || focal_length.is_nan() {
            return Err(ParaxError::Element(
                "focal length must be nonzero (use +inf for a plane window)".into(),
            ));
        }
        Ok(Self {
            focal_length,
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
    /// Returns the focal length of this [`ThinLens`].
    #[must_use]
    pub const fn focal_length(&self) -> f64 {
        self.focal_length
    }
    /// Returns the diameter of this [`ThinLens`].
    #[must_use]
    pub const fn diameter(&self) -> f64 {
        self.diameter
    }
}

impl Element for ThinLens {
    fn matrix(&self) -> Matrix2<f64> {
        Matrix2::new(1.0, 0.0, -1.0 / self.focal_length, 1.0)
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        Ok(Self {
            focal_length: -self.focal_length,
            diameter: self.diameter,
            z: self.z,
        }
        .into())
    }
    fn name(&self) -> &'static str {
        "ThinLens"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ray::Path;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    #[test]
    fn new() {
        assert!(ThinLens::new(100.0).is_ok());
        assert!(ThinLens::new(-100.0).is_ok());
        assert!(ThinLens::new(f64::INFINITY).is_ok());
        assert_matches!(ThinLens::new(0.0), Err(ParaxError::Element(_)));
        assert_matches!(ThinLens::new(f64::NAN), Err(ParaxError::Element(_)));
    }
    #[test]
    fn matrix() {
        let lens = ThinLens::new(100.0).unwrap();
        assert_relative_eq!(lens.matrix()[(1, 0)], -0.01);
        assert_relative_eq!(lens.thickness(), 0.0);
        assert_relative_eq!(lens.matrix().determinant(), 1.0);
    }
    #[test]
    fn infinite_focal_length_is_a_window() {
        let window = ThinLens::new(f64::INFINITY).unwrap();
        let mut ray = Path::new(3.0, 0.02, 0.0, "#000000").unwrap();
        window.apply(&mut ray);
        assert_relative_eq!(ray.state().r(), 3.0);
        assert_relative_eq!(ray.state().theta(), 0.02);
    }
    #[test]
    fn apply_bends_towards_focus() {
        let lens = ThinLens::new(100.0).unwrap();
        let mut ray = Path::new(1.0, 0.0, 0.0, "#000000").unwrap();
        lens.apply(&mut ray);
        assert_relative_eq!(ray.state().r(), 1.0);
        assert_relative_eq!(ray.state().theta(), -0.01);
        assert_relative_eq!(ray.z(), 0.0);
    }
    #[test]
    fn diameter() {
        let lens = ThinLens::new(100.0).unwrap().with_diameter(25.4).unwrap();
        assert_relative_eq!(lens.diameter(), 25.4);
        assert!(ThinLens::new(100.0).unwrap().with_diameter(0.0).is_err());
    }
    #[test]
    fn inverse() {
        let lens = ThinLens::new(100.0).unwrap().at(10.0);
        let OpticalElement::ThinLens(inv) = lens.inverse().unwrap() else {
            panic!("inverse of a thin lens must be a thin lens");
        };
        assert_relative_eq!(inv.focal_length(), -100.0);
        assert_relative_eq!(inv.z().unwrap(), 10.0);
    }
}
