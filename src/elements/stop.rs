#![warn(missing_docs)]
//! Aperture stop
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use super::{Element, OpticalElement};
use crate::{
    error::{ParaxError, ParaxResult},
    ray::Path,
};

/// An aperture stop transmitting rays within `[r_min, r_max]`.
///
/// Not a linear transform: its matrix is the identity, but on application it
/// inspects the ray's radial position and halts the ray if it falls outside
/// the aperture (vignetting). The boundary itself is transmitting. Halting is
/// expected control flow, not an error: the ray keeps its history up to the
/// stop plane and is frozen there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    r_max: f64,
    r_min: f64,
    z: Option<f64>,
}

impl Stop {
    /// Creates a new [`Stop`].
    ///
    /// If `r_min` is `None` the aperture is symmetric: `r_min = -r_max`.
    ///
    /// # Errors
    /// This function returns an error if the bounds are not finite or
    /// `r_min >= r_max`.
    pub fn new(r_max: f64, r_min: Option<f64>) -> ParaxResult<Self> {
        let r_min = r_min.unwrap_or(-r_max);
        if !r_max.is_finite() || !r_min.is_finite() {
            return Err(ParaxError::Element("stop bounds must be finite".into()));
        }
        if r_min >= r_max {
            return Err(ParaxError::Element(format!(
                "stop requires r_min < r_max, got [{r_min}, {r_max}]"
            )));
        }
        Ok(Self { r_max, r_min, z: None })
    }
    /// Place this element at the given axial position.
    #[must_use]
    pub const fn at(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
    /// Returns the upper aperture bound of this [`Stop`].
    #[must_use]
    pub const fn r_max(&self) -> f64 {
        self.r_max
    }
    /// Returns the lower aperture bound of this [`Stop`].
    #[must_use]
    pub const fn r_min(&self) -> f64 {
        self.r_min
    }
}

impl Element for Stop {
    fn matrix(&self) -> Matrix2<f64> {
        Matrix2::identity()
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn apply(&self, ray: &mut Path) {
        let r = ray.state().r();
        if r > self.r_max || r < self.r_min {
            ray.halt();
        }
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        // an aperture vignettes the same rays in both directions
        Ok((*self).into())
    }
    fn name(&self) -> &'static str {
        "Stop"
    }
}
