#![warn(missing_docs)]
//! Refraction at a planar boundary
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use super::{Element, OpticalElement};
use crate::error::{ParaxError, ParaxResult};

/// Refraction at a planar boundary between media of indices `n1` and `n2`.
///
/// Matrix `[[1, 0], [0, n1/n2]]`. Note that this is the one element whose
/// determinant is not 1 but `n1/n2`, as usual for ray-transfer matrices
/// crossing an index boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    n1: f64,
    n2: f64,
    z: Option<f64>,
}

impl Interface {
    /// Creates a new [`Interface`] from the indices before (`n1`) and after
    /// (`n2`) the boundary.
    ///
    /// # Errors
    /// This function returns an error if either index is not finite or < 1.0.
    pub fn new(n1: f64, n2: f64) -> ParaxResult<Self> {
        if n1 < 1.0 || n2 < 1.0 || !n1.is_finite() || !n2.is_finite() {
            return Err(ParaxError::Element(
                "refractive indices must be >= 1.0 and finite".into(),
            ));
        }
        Ok(Self { n1, n2, z: None })
    }
    /// Place this element at the given axial position.
    #[must_use]
    pub const fn at(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
}

impl Element for Interface {
    fn matrix(&self) -> Matrix2<f64> {
        Matrix2::new(1.0, 0.0, 0.0, self.n1 / self.n2)
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        // crossing the boundary in the opposite direction
        Ok(Self {
            n1: self.n2,
            n2: self.n1,
            z: self.z,
        }
        .into())
    }
    fn name(&self) -> &'static str {
        "Interface"
    }
}
