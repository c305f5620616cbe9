#![warn(missing_docs)]
//! Propagation through a refractive medium
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use super::{Element, OpticalElement};
use crate::error::{ParaxError, ParaxResult};

/// Propagation through a slab of refractive index `n` and physical thickness `t`.
///
/// Matrix `[[1, t/n], [0, 1]]`: the effective propagation length is reduced by
/// the index. The axial position of a ray advances by `t/n` accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    refractive_index: f64,
    thickness: f64,
    z: Option<f64>,
}

impl Slab {
    /// Creates a new [`Slab`] of the given refractive index and thickness (mm).
    ///
    /// Negative thicknesses are allowed; they occur in reversed systems.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - the refractive index is < 1.0 or not finite
    ///  - the thickness is not finite
    pub fn new(refractive_index: f64, thickness: f64) -> ParaxResult<Self> {
        if refractive_index < 1.0 || !refractive_index.is_finite() {
            return Err(ParaxError::Element(
                "refractive index must be >= 1.0 and finite".into(),
            ));
        }
        if !thickness.is_finite() {
            return Err(ParaxError::Element("slab thickness must be finite".into()));
        }
        Ok(Self {
            refractive_index,
            thickness,
            z: None,
        })
    }
    /// Place this element at the given axial position.
    #[must_use]
    pub const fn at(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
    /// Returns the refractive index of this [`Slab`].
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
}

impl Element for Slab {
    fn matrix(&self) -> Matrix2<f64> {
        Matrix2::new(1.0, self.thickness / self.refractive_index, 0.0, 1.0)
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        let b = self.thickness / self.refractive_index;
        Ok(Self {
            refractive_index: self.refractive_index,
            thickness: -self.thickness,
            z: self.z.map(|z| z + b),
        }
        .into())
    }
    fn name(&self) -> &'static str {
        "Slab"
    }
}
