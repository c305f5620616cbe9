#![warn(missing_docs)]
//! Microlens (lenslet) array
use nalgebra::{Matrix2, Vector2};
use num::Zero;
use serde::{Deserialize, Serialize};

use super::{Element, OpticalElement};
use crate::{
    error::{ParaxError, ParaxResult},
    ray::{Path, RayState},
};

/// A spatially periodic thin lens: an array of lenslets of focal length `f`
/// with centers spaced by `pitch`.
///
/// On application the incoming position is shifted into the local frame of the
/// nearest lenslet center (`round(r / pitch)`, ties to even), the thin-lens
/// matrix is applied there and the resulting angle is written back while the
/// recorded global position stays unchanged. Only the angle of a ray is ever
/// altered by this element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensletArray {
    focal_length: f64,
    pitch: f64,
    diameter: f64,
    z: Option<f64>,
}

impl LensletArray {
    /// Creates a new [`LensletArray`] from the lenslet focal length and the
    /// center-to-center pitch (mm).
    ///
    /// # Errors
    /// This function returns an error if
    ///  - the focal length is 0.0 or `NaN`
    ///  - the pitch is not positive or not finite
    pub fn new(focal_length: f64, pitch: f64) -> ParaxResult<Self> {
        if focal_length.is_zero() || focal_length.is_nan() {
            return Err(ParaxError::Element(
                "lenslet focal length must be nonzero".into(),
            ));
        }
        if pitch <= 0.0 || !pitch.is_finite() {
            return Err(ParaxError::Element(
                "lenslet pitch must be > 0 and finite".into(),
            ));
        }
        Ok(Self {
            focal_length,
            pitch,
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
    /// Set the overall array diameter (used for plotting extents only).
    ///
    /// # Errors
    /// This function returns an error if the diameter is not positive.
    pub fn with_diameter(mut self, diameter: f64) -> ParaxResult<Self> {
        if diameter <= 0.0 || diameter.is_nan() {
            return Err(ParaxError::Element("array diameter must be > 0".into()));
        }
        self.diameter = diameter;
        Ok(self)
    }
    /// Returns the lenslet focal length of this [`LensletArray`].
    #[must_use]
    pub const fn focal_length(&self) -> f64 {
        self.focal_length
    }
    /// Returns the lenslet pitch of this [`LensletArray`].
    #[must_use]
    pub const fn pitch(&self) -> f64 {
        self.pitch
    }
    /// Returns the array diameter of this [`LensletArray`].
    #[must_use]
    pub const fn diameter(&self) -> f64 {
        self.diameter
    }
}

impl Element for LensletArray {
    /// The local thin-lens matrix of a single lenslet.
    ///
    /// **Note**: the array as a whole is not a linear operator; this matrix
    /// only describes the action within one lenslet's frame.
    fn matrix(&self) -> Matrix2<f64> {
        Matrix2::new(1.0, 0.0, -1.0 / self.focal_length, 1.0)
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn apply(&self, ray: &mut Path) {
        let state = ray.state();
        // ties at r/pitch = n + 0.5 resolve to the even-indexed lenslet
        let lenslet = (state.r() / self.pitch).round_ties_even();
        let local_r = lenslet.mul_add(-self.pitch, state.r());
        let local_out = self.matrix() * Vector2::new(local_r, state.theta());
        ray.advance(RayState::new(state.r(), local_out.y));
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        Ok(Self {
            focal_length: -self.focal_length,
            pitch: self.pitch,
            diameter: self.diameter,
            z: self.z,
        }
        .into())
    }
    fn name(&self) -> &'static str {
        "LensletArray"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    #[test]
    fn new() {
        assert!(LensletArray::new(60.0, 0.05).is_ok());
        assert_matches!(LensletArray::new(0.0, 0.05), Err(ParaxError::Element(_)));
        assert_matches!(LensletArray::new(60.0, 0.0), Err(ParaxError::Element(_)));
        assert_matches!(LensletArray::new(60.0, -0.1), Err(ParaxError::Element(_)));
    }
    #[test]
    fn on_center_ray_is_unbent() {
        let mla = LensletArray::new(60.0, 0.05).unwrap();
        // exactly on the center of lenslet #2
        let mut ray = Path::new(0.1, 0.0, 0.0, "#000000").unwrap();
        mla.apply(&mut ray);
        assert_relative_eq!(ray.state().r(), 0.1);
        assert_relative_eq!(ray.state().theta(), 0.0);
    }
    #[test]
    fn position_is_preserved() {
        let mla = LensletArray::new(60.0, 0.05).unwrap();
        let mut ray = Path::new(0.11, 0.001, 0.0, "#000000").unwrap();
        mla.apply(&mut ray);
        assert_relative_eq!(ray.state().r(), 0.11);
        // local offset from lenslet #2 center is 0.01
        assert_relative_eq!(ray.state().theta(), 0.001 - 0.01 / 60.0, epsilon = 1e-12);
        assert_relative_eq!(ray.z(), 0.0);
    }
    #[test]
    fn boundary_ties_resolve_to_even_lenslet() {
        let mla = LensletArray::new(60.0, 1.0).unwrap();
        // r/pitch = 0.5: tie between lenslets 0 and 1 resolves to 0
        let mut ray = Path::new(0.5, 0.0, 0.0, "#000000").unwrap();
        mla.apply(&mut ray);
        assert_relative_eq!(ray.state().r(), 0.5);
        assert_relative_eq!(ray.state().theta(), -0.5 / 60.0, epsilon = 1e-12);
        // r/pitch = 1.5: tie between lenslets 1 and 2 resolves to 2
        let mut ray = Path::new(1.5, 0.0, 0.0, "#000000").unwrap();
        mla.apply(&mut ray);
        assert_relative_eq!(ray.state().theta(), 0.5 / 60.0, epsilon = 1e-12);
    }
    #[test]
    fn inverse_negates_focal_length() {
        let mla = LensletArray::new(60.0, 0.05).unwrap().at(1.0);
        let OpticalElement::LensletArray(inv) = mla.inverse().unwrap() else {
            panic!("inverse of a lenslet array must be a lenslet array");
        };
        assert_relative_eq!(inv.focal_length(), -60.0);
        assert_relative_eq!(inv.pitch(), 0.05);
        assert_relative_eq!(inv.z().unwrap(), 1.0);
    }
}
