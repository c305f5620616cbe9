#![warn(missing_docs)]
//! Module for handling paraxial rays
//!
//! A ray is described by its [`RayState`]: the radial offset `r` from the
//! optical axis (in mm) and the propagation angle `theta` (in radians, small
//! angle approximation). A [`Path`] is a stateful ray that additionally tracks
//! its axial position `z` and records every state change in an append-only
//! history used for trajectory plots.
use std::fmt::Display;

use nalgebra::{Matrix2, Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::{
    color::hex2rgb,
    error::{ParaxError, ParaxResult},
};

/// The paraxial state vector `(r, theta)` of a ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayState(Vector2<f64>);

impl RayState {
    /// Create a new [`RayState`] from a radial offset (mm) and an angle (rad).
    #[must_use]
    pub fn new(r: f64, theta: f64) -> Self {
        Self(Vector2::new(r, theta))
    }
    /// Returns the radial offset from the optical axis.
    #[must_use]
    pub fn r(&self) -> f64 {
        self.0.x
    }
    /// Returns the propagation angle.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.0.y
    }
    /// Returns the state as a column vector for matrix multiplication.
    #[must_use]
    pub const fn as_vector(&self) -> &Vector2<f64> {
        &self.0
    }
}
impl From<Vector2<f64>> for RayState {
    fn from(vector: Vector2<f64>) -> Self {
        Self(vector)
    }
}
impl Display for RayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(r: {:.4}, theta: {:.6})", self.r(), self.theta())
    }
}

/// A ray that keeps a record of its past states every time its state changes.
///
/// Once a [`Path`] has been halted (by an aperture [`Stop`](crate::elements::stop::Stop)
/// rejecting it) all further state mutation is ignored: the ray is frozen in
/// place for the remainder of the system, but its history up to the halting
/// moment stays available for partial-trajectory plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    state: RayState,
    z: f64,
    halted: bool,
    color: String,
    refractive_index: f64,
    history: Vec<(RayState, f64)>,
}

impl Path {
    /// Creates a new [`Path`] with an initial state and axial position.
    ///
    /// The initial state is recorded as the first history entry.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - `r`, `theta` or `z` is not finite
    ///  - `color` is not a valid `#RRGGBB` hex string
    pub fn new(r: f64, theta: f64, z: f64, color: &str) -> ParaxResult<Self> {
        if !r.is_finite() || !theta.is_finite() || !z.is_finite() {
            return Err(ParaxError::Other(
                "ray state and position must be finite".into(),
            ));
        }
        hex2rgb(color)?;
        let state = RayState::new(r, theta);
        Ok(Self {
            state,
            z,
            halted: false,
            color: color.to_owned(),
            refractive_index: 1.0,
            history: vec![(state, z)],
        })
    }
    /// Returns the current state of this [`Path`].
    #[must_use]
    pub const fn state(&self) -> RayState {
        self.state
    }
    /// Returns the current axial position of this [`Path`].
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }
    /// Returns `true` if this [`Path`] has been rejected by a stop.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }
    /// Returns the hex color string assigned to this [`Path`].
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
    /// Returns the assigned color decoded into an RGB triple.
    ///
    /// # Errors
    /// This function returns an error if the stored color string is malformed.
    /// (It was validated at construction, so this only happens after manual
    /// tampering with a serialized ray.)
    pub fn rgb(&self) -> ParaxResult<[u8; 3]> {
        hex2rgb(&self.color)
    }
    /// Returns the refractive index of the medium this ray starts in.
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
    /// Sets the refractive index of the medium this ray starts in.
    ///
    /// # Errors
    /// This function returns an error if the given index is < 1.0 or not finite.
    pub fn set_refractive_index(&mut self, refractive_index: f64) -> ParaxResult<()> {
        if refractive_index < 1.0 || !refractive_index.is_finite() {
            return Err(ParaxError::Other(
                "refractive index must be >=1.0 and finite".into(),
            ));
        }
        self.refractive_index = refractive_index;
        Ok(())
    }
    /// Halt this [`Path`], freezing its state and history.
    pub fn halt(&mut self) {
        self.halted = true;
    }
    /// Advance to a new state at the current axial position.
    ///
    /// The new state is appended to the history. No-op for halted rays.
    pub fn advance(&mut self, state: RayState) {
        if self.halted {
            return;
        }
        self.state = state;
        self.history.push((self.state, self.z));
    }
    /// Apply a ray-transfer matrix, advancing the axial position by `dz`.
    ///
    /// `z` is updated before the new state is recorded so that the history
    /// entry carries the position the state belongs to. No-op for halted rays.
    pub fn transform(&mut self, matrix: &Matrix2<f64>, dz: f64) {
        if self.halted {
            return;
        }
        self.z += dz;
        self.advance(RayState::from(matrix * self.state.0));
    }
    /// Returns the recorded `(state, z)` history of this [`Path`].
    #[must_use]
    pub fn history(&self) -> &[(RayState, f64)] {
        &self.history
    }
    /// Returns the trajectory of this [`Path`] as `(z, r)` points for plotting.
    #[must_use]
    pub fn position_history(&self) -> Vec<Point2<f64>> {
        self.history
            .iter()
            .map(|(state, z)| Point2::new(*z, state.r()))
            .collect()
    }
}
impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Path - current state: {} @ z = {:.3}{}",
            self.state,
            self.z,
            if self.halted { " (halted)" } else { "" }
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    #[test]
    fn new() {
        let ray = Path::new(1.0, 0.01, -100.0, "#ff0000").unwrap();
        assert_relative_eq!(ray.state().r(), 1.0);
        assert_relative_eq!(ray.state().theta(), 0.01);
        assert_relative_eq!(ray.z(), -100.0);
        assert!(!ray.is_halted());
        assert_eq!(ray.history().len(), 1);
        assert_eq!(ray.rgb().unwrap(), [255, 0, 0]);
    }
    #[test]
    fn new_invalid() {
        assert_matches!(
            Path::new(f64::NAN, 0.0, 0.0, "#ff0000"),
            Err(ParaxError::Other(_))
        );
        assert_matches!(
            Path::new(0.0, f64::INFINITY, 0.0, "#ff0000"),
            Err(ParaxError::Other(_))
        );
        assert_matches!(Path::new(0.0, 0.0, 0.0, "red"), Err(ParaxError::Color(_)));
    }
    #[test]
    fn advance_records_history() {
        let mut ray = Path::new(0.0, 0.0, 0.0, "#000000").unwrap();
        ray.advance(RayState::new(1.0, 0.1));
        ray.advance(RayState::new(2.0, 0.2));
        assert_eq!(ray.history().len(), 3);
        assert_relative_eq!(ray.state().r(), 2.0);
    }
    #[test]
    fn transform_updates_z_before_recording() {
        let mut ray = Path::new(1.0, 0.5, 0.0, "#000000").unwrap();
        // free-space propagation by 10
        ray.transform(&Matrix2::new(1.0, 10.0, 0.0, 1.0), 10.0);
        assert_relative_eq!(ray.z(), 10.0);
        assert_relative_eq!(ray.state().r(), 6.0);
        // the history entry must carry the *new* axial position
        let (state, z) = ray.history()[1];
        assert_relative_eq!(z, 10.0);
        assert_relative_eq!(state.r(), 6.0);
    }
    #[test]
    fn halted_rays_are_frozen() {
        let mut ray = Path::new(1.0, 0.0, 5.0, "#000000").unwrap();
        ray.halt();
        ray.advance(RayState::new(42.0, 1.0));
        ray.transform(&Matrix2::new(1.0, 10.0, 0.0, 1.0), 10.0);
        assert_relative_eq!(ray.state().r(), 1.0);
        assert_relative_eq!(ray.z(), 5.0);
        assert_eq!(ray.history().len(), 1);
    }
    #[test]
    fn refractive_index() {
        let mut ray = Path::new(0.0, 0.0, 0.0, "#000000").unwrap();
        assert_relative_eq!(ray.refractive_index(), 1.0);
        assert!(ray.set_refractive_index(1.5).is_ok());
        assert_relative_eq!(ray.refractive_index(), 1.5);
        assert!(ray.set_refractive_index(0.5).is_err());
        assert!(ray.set_refractive_index(f64::NAN).is_err());
    }
    #[test]
    fn position_history() {
        let mut ray = Path::new(1.0, 0.0, -10.0, "#000000").unwrap();
        ray.transform(&Matrix2::new(1.0, 10.0, 0.0, 1.0), 10.0);
        let points = ray.position_history();
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0].x, -10.0);
        assert_relative_eq!(points[0].y, 1.0);
        assert_relative_eq!(points[1].x, 0.0);
    }
    #[test]
    fn display() {
        let ray = Path::new(1.0, 0.0, 0.0, "#000000").unwrap();
        assert!(format!("{ray}").starts_with("Path - current state:"));
    }
}
