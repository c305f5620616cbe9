#![warn(missing_docs)]
//! Freestanding ray-transfer matrix
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use super::{Element, OpticalElement};
use crate::error::{ParaxError, ParaxResult};

/// A raw 2×2 ray-transfer matrix element.
///
/// Used for operators that have no dedicated variant, e.g. the inverse of a
/// [`ThickLens`](super::ThickLens) in a reversed system or a composed matrix
/// inserted as a single element. The `B` entry is treated as the element's
/// thickness, so rays advance axially by `B` when the element is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Abcd {
    matrix: Matrix2<f64>,
    z: Option<f64>,
}

impl Abcd {
    /// Creates a new [`Abcd`] element from its four matrix entries.
    ///
    /// # Errors
    /// This function returns an error if any entry is not finite.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> ParaxResult<Self> {
        Self::from_matrix(Matrix2::new(a, b, c, d))
    }
    /// Creates a new [`Abcd`] element from a 2×2 matrix.
    ///
    /// # Errors
    /// This function returns an error if any entry is not finite.
    pub fn from_matrix(matrix: Matrix2<f64>) -> ParaxResult<Self> {
        if matrix.iter().any(|entry| !entry.is_finite()) {
            return Err(ParaxError::Element(
                "ray-transfer matrix entries must be finite".into(),
            ));
        }
        Ok(Self { matrix, z: None })
    }
    /// Place this element at the given axial position.
    #[must_use]
    pub const fn at(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
    /// Place this element at the given optional axial position.
    #[must_use]
    pub const fn at_option(mut self, z: Option<f64>) -> Self {
        self.z = z;
        self
    }
}

impl Element for Abcd {
    fn matrix(&self) -> Matrix2<f64> {
        self.matrix
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        let det = self.matrix.determinant();
        if det.abs() < f64::EPSILON {
            return Err(ParaxError::Element(
                "cannot invert a singular ray-transfer matrix".into(),
            ));
        }
        let m = self.matrix;
        let inverted = Matrix2::new(m[(1, 1)], -m[(0, 1)], -m[(1, 0)], m[(0, 0)]) / det;
        Ok(Self {
            matrix: inverted,
            z: self.z.map(|z| z + self.thickness()),
        }
        .into())
    }
    fn name(&self) -> &'static str {
        "Abcd"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    #[test]
    fn new() {
        assert!(Abcd::new(1.0, 0.0, 0.0, 1.0).is_ok());
        assert_matches!(
            Abcd::new(f64::NAN, 0.0, 0.0, 1.0),
            Err(ParaxError::Element(_))
        );
        assert_matches!(
            Abcd::new(1.0, f64::INFINITY, 0.0, 1.0),
            Err(ParaxError::Element(_))
        );
    }
    #[test]
    fn thickness_is_b_entry() {
        let element = Abcd::new(1.0, 12.5, 0.0, 1.0).unwrap();
        assert_relative_eq!(element.thickness(), 12.5);
    }
    #[test]
    fn singular_matrix_has_no_inverse() {
        let singular = Abcd::new(1.0, 2.0, 2.0, 4.0).unwrap();
        assert_matches!(singular.inverse(), Err(ParaxError::Element(_)));
    }
    #[test]
    fn inverse() {
        let element = Abcd::new(2.0, 3.0, 1.0, 2.0).unwrap().at(1.0);
        let inverse = element.inverse().unwrap();
        let product = element.matrix() * inverse.matrix();
        assert_relative_eq!(product[(0, 0)], 1.0);
        assert_relative_eq!(product[(0, 1)], 0.0);
        assert_relative_eq!(inverse.z().unwrap(), 4.0);
    }
}
