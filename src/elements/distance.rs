#![warn(missing_docs)]
//! Free-space propagation
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use super::{Element, OpticalElement};
use crate::error::{ParaxError, ParaxResult};

/// Free-space propagation over a fixed axial length.
///
/// Matrix `[[1, d], [0, 1]]`; pure translation with `B = d`. Most distances of
/// a system are synthesized automatically between positioned elements, but
/// explicit instances are used for entry gaps and trailing propagation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    length: f64,
    z: Option<f64>,
}

impl Distance {
    /// Creates a new [`Distance`] of the given length (mm).
    ///
    /// Negative lengths are allowed; they occur in reversed systems.
    ///
    /// # Errors
    /// This function returns an error if the given length is not finite.
    pub fn new(length: f64) -> ParaxResult<Self> {
        if !length.is_finite() {
            return Err(ParaxError::Element("distance must be finite".into()));
        }
        Ok(Self { length, z: None })
    }
    /// Place this element at the given axial position.
    #[must_use]
    pub const fn at(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
    /// Returns the propagation length of this [`Distance`].
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }
}

impl Element for Distance {
    fn matrix(&self) -> Matrix2<f64> {
        Matrix2::new(1.0, self.length, 0.0, 1.0)
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        Ok(Self {
            length: -self.length,
            z: self.z.map(|z| z + self.length),
        }
        .into())
    }
    fn name(&self) -> &'static str {
        "Distance"
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
        assert!(Distance::new(10.0).is_ok());
        assert!(Distance::new(-10.0).is_ok());
        assert_matches!(Distance::new(f64::NAN), Err(ParaxError::Element(_)));
        assert_matches!(Distance::new(f64::INFINITY), Err(ParaxError::Element(_)));
    }
    #[test]
    fn matrix() {
        let d = Distance::new(25.0).unwrap();
        assert_relative_eq!(d.matrix()[(0, 1)], 25.0);
        assert_relative_eq!(d.thickness(), 25.0);
        assert_relative_eq!(d.matrix().determinant(), 1.0);
    }
    #[test]
    fn apply() {
        let d = Distance::new(10.0).unwrap();
        let mut ray = Path::new(1.0, 0.1, 0.0, "#000000").unwrap();
        d.apply(&mut ray);
        assert_relative_eq!(ray.state().r(), 2.0);
        assert_relative_eq!(ray.state().theta(), 0.1);
        assert_relative_eq!(ray.z(), 10.0);
    }
    #[test]
    fn inverse() {
        let d = Distance::new(10.0).unwrap().at(5.0);
        let OpticalElement::Distance(inv) = d.inverse().unwrap() else {
            panic!("inverse of a distance must be a distance");
        };
        assert_relative_eq!(inv.length(), -10.0);
        assert_relative_eq!(inv.z().unwrap(), 15.0);
    }
}
