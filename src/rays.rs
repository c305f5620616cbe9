#![warn(missing_docs)]
//! Ray bundles and source generators
//!
//! A [`Bundle`] is an ordered, fixed-size collection of [`Path`]s sharing a
//! [`ColorScheme`]. Bundles are created by the two source generators:
//! [`point_source`](Bundle::point_source) (fixed position, fan of angles) and
//! [`collimated_source`](Bundle::collimated_source) (fixed angle, fan of
//! positions).
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{
    color::ColorScheme,
    error::{ParaxError, ParaxResult},
    ray::Path,
    utils::linspace,
};

/// An ordered collection of rays sharing a color scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    rays: Vec<Path>,
}

impl Bundle {
    fn from_states(
        states: impl Iterator<Item = (f64, f64)>,
        z: f64,
        count: usize,
        scheme: &ColorScheme,
    ) -> ParaxResult<Self> {
        let mut rays = Vec::with_capacity(count);
        for (index, (r, theta)) in states.enumerate() {
            let color = scheme.sample(index, count);
            rays.push(Path::new(r, theta, z, &color)?);
        }
        Ok(Self { rays })
    }
    /// Create a point source: `count` rays at a fixed position `(z, r)` with
    /// angles evenly spaced over the inclusive range `[theta_min, theta_max]`.
    ///
    /// If `theta_min` is `None` the fan is symmetric (`theta_min = -theta_max`).
    /// A missing color scheme defaults to a fixed red, matching the usual
    /// "point emitter" convention. `count == 1` yields a single ray at
    /// `theta_min`.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - `count` is zero
    ///  - any of the position or angle parameters is not finite
    pub fn point_source(
        z: f64,
        r: f64,
        theta_max: f64,
        theta_min: Option<f64>,
        count: usize,
        scheme: Option<ColorScheme>,
    ) -> ParaxResult<Self> {
        if count == 0 {
            return Err(ParaxError::Source(
                "a point source needs at least one ray".into(),
            ));
        }
        let theta_min = theta_min.unwrap_or(-theta_max);
        if !z.is_finite() || !r.is_finite() || !theta_max.is_finite() || !theta_min.is_finite() {
            return Err(ParaxError::Source(
                "point source parameters must be finite".into(),
            ));
        }
        let scheme = scheme.unwrap_or(ColorScheme::Fixed([255, 0, 0]));
        let angles = linspace(theta_min, theta_max, count);
        Self::from_states(angles.into_iter().map(|theta| (r, theta)), z, count, &scheme)
    }
    /// Create a collimated source: `count` rays at a fixed angle `theta` with
    /// positions evenly spaced over the inclusive range `[r_min, r_max]`.
    ///
    /// If `r_min` is `None` the fan is symmetric (`r_min = -r_max`). A missing
    /// color scheme defaults to the viridis gradient. `count == 1` yields a
    /// single ray at `r_min`.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - `count` is zero
    ///  - any of the position or angle parameters is not finite
    pub fn collimated_source(
        r_max: f64,
        r_min: Option<f64>,
        count: usize,
        z: f64,
        theta: f64,
        scheme: Option<ColorScheme>,
    ) -> ParaxResult<Self> {
        if count == 0 {
            return Err(ParaxError::Source(
                "a collimated source needs at least one ray".into(),
            ));
        }
        let r_min = r_min.unwrap_or(-r_max);
        if !z.is_finite() || !theta.is_finite() || !r_max.is_finite() || !r_min.is_finite() {
            return Err(ParaxError::Source(
                "collimated source parameters must be finite".into(),
            ));
        }
        let scheme = scheme.unwrap_or_default();
        let positions = linspace(r_min, r_max, count);
        Self::from_states(positions.into_iter().map(|r| (r, theta)), z, count, &scheme)
    }
    /// Returns the number of rays in this [`Bundle`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.rays.len()
    }
    /// Returns `true` if this [`Bundle`] contains no rays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }
    /// Returns an iterator over the rays.
    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.rays.iter()
    }
    /// Returns a mutable iterator over the rays.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Path> {
        self.rays.iter_mut()
    }
    /// Set the starting refractive index of every ray in this [`Bundle`].
    ///
    /// # Errors
    /// This function returns an error if the given index is < 1.0 or not finite.
    pub fn set_refractive_index(&mut self, refractive_index: f64) -> ParaxResult<()> {
        for ray in &mut self.rays {
            ray.set_refractive_index(refractive_index)?;
        }
        Ok(())
    }
}

impl Index<usize> for Bundle {
    type Output = Path;
    fn index(&self, index: usize) -> &Self::Output {
        &self.rays[index]
    }
}
impl<'a> IntoIterator for &'a Bundle {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;
    fn into_iter(self) -> Self::IntoIter {
        self.rays.iter()
    }
}
impl<'a> IntoIterator for &'a mut Bundle {
    type Item = &'a mut Path;
    type IntoIter = std::slice::IterMut<'a, Path>;
    fn into_iter(self) -> Self::IntoIter {
        self.rays.iter_mut()
    }
}
