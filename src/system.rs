#![warn(missing_docs)]
//! Optical system assembly, propagation and reversal
//!
//! An [`OpticsSystem`] is an ordered pipeline of positioned
//! [`OpticalElement`]s. At construction the free-space [`Distance`]s between
//! adjacent elements are synthesized from their axial positions and a trailing
//! propagation distance is appended, yielding a fully materialized element
//! list. The composed system matrix is the product of all element matrices
//! with the **rightmost factor being the first traversed element** (matrices
//! multiply in reverse of traversal order).
use std::fmt::Display;

use itertools::Itertools;
use log::debug;
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use crate::{
    elements::{Distance, Element, OpticalElement},
    error::{ParaxError, ParaxResult},
    ray::Path,
    rays::Bundle,
};

/// An ordered, immutable pipeline of optical elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticsSystem {
    elements: Vec<OpticalElement>,
    matrix: Matrix2<f64>,
    reversed: bool,
}

/// Materialize an ordered element list: synthesize the free-space distances
/// between adjacent positioned elements and append the trailing propagation.
///
/// Pure builder, no in-place mutation of the input ordering.
fn materialize(
    elements: Vec<OpticalElement>,
    propagate: f64,
) -> ParaxResult<Vec<OpticalElement>> {
    if !propagate.is_finite() {
        return Err(ParaxError::System(
            "trailing propagation distance must be finite".into(),
        ));
    }
    let mut positioned = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let Some(z) = element.z() else {
            return Err(ParaxError::System(format!(
                "element #{index} ({}) has no axial position",
                element.name()
            )));
        };
        positioned.push((element, z));
    }
    let Some((last, last_z)) = positioned.last().cloned() else {
        return Err(ParaxError::System(
            "system must contain at least one element".into(),
        ));
    };
    let mut materialized = Vec::with_capacity(2 * positioned.len());
    for ((prev, prev_z), (next, next_z)) in positioned.iter().tuple_windows() {
        let exit = prev_z + prev.thickness();
        let gap = next_z - exit;
        if gap < 0.0 {
            return Err(ParaxError::System(format!(
                "elements out of order: {} at z = {next_z} overlaps {} ending at z = {exit}",
                next.name(),
                prev.name()
            )));
        }
        materialized.push(prev.clone());
        materialized.push(Distance::new(gap)?.at(exit).into());
    }
    let exit = last_z + last.thickness();
    materialized.push(last);
    materialized.push(Distance::new(propagate)?.at(exit).into());
    Ok(materialized)
}

/// Compose the system matrix of a materialized element list.
fn compose(elements: &[OpticalElement]) -> Matrix2<f64> {
    elements
        .iter()
        .fold(Matrix2::identity(), |acc, element| element.matrix() * acc)
}

impl OpticsSystem {
    /// Creates a new [`OpticsSystem`] from an ordered list of positioned
    /// elements and a trailing propagation distance.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - the element list is empty
    ///  - any element has not been positioned with `at`
    ///  - adjacent elements overlap (a synthesized distance would be negative)
    ///  - the trailing propagation distance is not finite
    pub fn new(elements: Vec<OpticalElement>, propagate: f64) -> ParaxResult<Self> {
        let elements = materialize(elements, propagate)?;
        let matrix = compose(&elements);
        debug!("materialized system of {} elements", elements.len());
        Ok(Self {
            elements,
            matrix,
            reversed: false,
        })
    }
    /// Returns the materialized element list, synthesized distances included.
    #[must_use]
    pub fn elements(&self) -> &[OpticalElement] {
        &self.elements
    }
    /// Returns the composed 2×2 system matrix.
    ///
    /// **Note**: for systems containing a
    /// [`LensletArray`](crate::elements::LensletArray) the composed matrix
    /// uses the array's local thin-lens matrix and is only meaningful close to
    /// a lenslet center.
    #[must_use]
    pub const fn matrix(&self) -> Matrix2<f64> {
        self.matrix
    }
    /// Returns `true` if this system propagates towards descending `z`.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }
    /// Thread a single ray through the system, mutating it in place.
    ///
    /// The gap between the ray's axial position and the first element is
    /// covered by an implicit [`Distance`]. An already halted ray is left
    /// untouched; rays halted by a stop inside the system stay frozen while
    /// the remaining rays of a bundle are unaffected.
    ///
    /// # Errors
    /// This function returns an error if the ray starts beyond the first
    /// element (behind it for a forward system, in front of it for a reversed
    /// one).
    pub fn apply(&self, ray: &mut Path) -> ParaxResult<()> {
        if ray.is_halted() {
            return Ok(());
        }
        let Some(first_z) = self.elements.first().and_then(Element::z) else {
            return Err(ParaxError::System(
                "system has no positioned elements".into(),
            ));
        };
        let gap = first_z - ray.z();
        if (!self.reversed && gap < 0.0) || (self.reversed && gap > 0.0) {
            return Err(ParaxError::System(format!(
                "ray at z = {} starts beyond the first element at z = {first_z}",
                ray.z()
            )));
        }
        Distance::new(gap)?.apply(ray);
        for element in &self.elements {
            element.apply(ray);
        }
        Ok(())
    }
    /// Thread every ray of a bundle through the system.
    ///
    /// # Errors
    /// This function returns an error if any ray starts beyond the first
    /// element (see [`apply`](OpticsSystem::apply)).
    pub fn apply_bundle(&self, bundle: &mut Bundle) -> ParaxResult<()> {
        for ray in bundle.iter_mut() {
            self.apply(ray)?;
        }
        Ok(())
    }
    /// Returns the algebraically reversed system.
    ///
    /// The entire materialized element sequence is inverted in reverse order,
    /// each element repositioned at its exit plane. This makes the reversal
    /// exact: `reversed.matrix()` is the inverse of `self.matrix()` and
    /// reversing twice reproduces the original system. The original trailing
    /// propagation becomes the reversed system's *leading* distance, so a ray
    /// leaving the forward system can be handed to the reversed one without an
    /// entry gap. `propagate` optionally appends an extra trailing distance
    /// (negative lengths propagate further backwards).
    ///
    /// # Errors
    /// This function returns an error if an element matrix is singular or the
    /// extra propagation distance is not finite.
    pub fn reverse(&self, propagate: Option<f64>) -> ParaxResult<Self> {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        for element in self.elements.iter().rev() {
            elements.push(element.inverse()?);
        }
        if let Some(length) = propagate {
            let exit = elements
                .last()
                .and_then(|element| element.z().map(|z| z + element.thickness()));
            let mut trailing = Distance::new(length)?;
            if let Some(z) = exit {
                trailing = trailing.at(z);
            }
            elements.push(trailing.into());
        }
        let matrix = compose(&elements);
        debug!("reversed system of {} elements", elements.len());
        Ok(Self {
            elements,
            matrix,
            reversed: !self.reversed,
        })
    }
}

impl Display for OpticsSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for element in &self.elements {
            write!(f, " -> {}", element.name())?;
        }
        Ok(())
    }
}
