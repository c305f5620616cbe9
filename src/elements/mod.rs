#![warn(missing_docs)]
//! Paraxial optical elements
//!
//! Every element is a 2×2 ray-transfer (ABCD) matrix operator with an optional
//! axial position `z`. Elements are created unpositioned and placed on the
//! optical axis with [`at`](Distance::at) before being handed to an
//! [`OpticsSystem`](crate::system::OpticsSystem).
//!
//! Two variants deviate from pure matrix action: [`Stop`] is a side-effecting
//! predicate that halts vignetted rays, and [`LensletArray`] acts as a
//! spatially periodic thin lens which only alters the ray angle.
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use crate::{error::ParaxResult, ray::Path};

pub mod abcd;
pub mod distance;
pub mod interface;
pub mod lenslet_array;
pub mod slab;
pub mod stop;
pub mod thick_lens;
pub mod thin_lens;

pub use abcd::Abcd;
pub use distance::Distance;
pub use interface::Interface;
pub use lenslet_array::LensletArray;
pub use slab::Slab;
pub use stop::Stop;
pub use thick_lens::ThickLens;
pub use thin_lens::ThinLens;

/// Common interface of all paraxial optical elements.
pub trait Element {
    /// Returns the 2×2 ray-transfer matrix of this element.
    fn matrix(&self) -> Matrix2<f64>;
    /// Returns the axial position of this element, if it has been placed.
    fn z(&self) -> Option<f64>;
    /// Returns the axial length this element subtracts (the `B` matrix entry).
    ///
    /// Elements with nonzero thickness advance a ray's `z` when applied.
    fn thickness(&self) -> f64 {
        self.matrix()[(0, 1)]
    }
    /// Apply this element to a ray, mutating its state in place.
    ///
    /// The default implementation left-multiplies the element matrix onto the
    /// ray state and advances the ray's axial position by [`thickness`](Element::thickness).
    fn apply(&self, ray: &mut Path) {
        ray.transform(&self.matrix(), self.thickness());
    }
    /// Returns the algebraic inverse of this element, repositioned at its
    /// exit plane `z + B`.
    ///
    /// # Errors
    /// This function returns an error if the element matrix is singular (only
    /// possible for a raw [`Abcd`] element).
    fn inverse(&self) -> ParaxResult<OpticalElement>;
    /// Returns a short human readable name of the element type.
    fn name(&self) -> &'static str;
}

/// Variant family of all supported optical elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpticalElement {
    /// free-space propagation
    Distance(Distance),
    /// ideal thin lens
    ThinLens(ThinLens),
    /// thick lens defined by focal length and working distance
    ThickLens(ThickLens),
    /// refraction at a planar boundary between two media
    Interface(Interface),
    /// propagation through a medium of given refractive index
    Slab(Slab),
    /// aperture stop halting vignetted rays
    Stop(Stop),
    /// spatially periodic thin lens (microlens array)
    LensletArray(LensletArray),
    /// freestanding raw ray-transfer matrix
    Abcd(Abcd),
}

impl Element for OpticalElement {
    fn matrix(&self) -> Matrix2<f64> {
        match self {
            Self::Distance(e) => e.matrix(),
            Self::ThinLens(e) => e.matrix(),
            Self::ThickLens(e) => e.matrix(),
            Self::Interface(e) => e.matrix(),
            Self::Slab(e) => e.matrix(),
            Self::Stop(e) => e.matrix(),
            Self::LensletArray(e) => e.matrix(),
            Self::Abcd(e) => e.matrix(),
        }
    }
    fn z(&self) -> Option<f64> {
        match self {
            Self::Distance(e) => e.z(),
            Self::ThinLens(e) => e.z(),
            Self::ThickLens(e) => e.z(),
            Self::Interface(e) => e.z(),
            Self::Slab(e) => e.z(),
            Self::Stop(e) => e.z(),
            Self::LensletArray(e) => e.z(),
            Self::Abcd(e) => e.z(),
        }
    }
    fn apply(&self, ray: &mut Path) {
        match self {
            Self::Distance(e) => e.apply(ray),
            Self::ThinLens(e) => e.apply(ray),
            Self::ThickLens(e) => e.apply(ray),
            Self::Interface(e) => e.apply(ray),
            Self::Slab(e) => e.apply(ray),
            Self::Stop(e) => e.apply(ray),
            Self::LensletArray(e) => e.apply(ray),
            Self::Abcd(e) => e.apply(ray),
        }
    }
    fn inverse(&self) -> ParaxResult<OpticalElement> {
        match self {
            Self::Distance(e) => e.inverse(),
            Self::ThinLens(e) => e.inverse(),
            Self::ThickLens(e) => e.inverse(),
            Self::Interface(e) => e.inverse(),
            Self::Slab(e) => e.inverse(),
            Self::Stop(e) => e.inverse(),
            Self::LensletArray(e) => e.inverse(),
            Self::Abcd(e) => e.inverse(),
        }
    }
    fn name(&self) -> &'static str {
        match self {
            Self::Distance(e) => e.name(),
            Self::ThinLens(e) => e.name(),
            Self::ThickLens(e) => e.name(),
            Self::Interface(e) => e.name(),
            Self::Slab(e) => e.name(),
            Self::Stop(e) => e.name(),
            Self::LensletArray(e) => e.name(),
            Self::Abcd(e) => e.name(),
        }
    }
}

impl From<Distance> for OpticalElement {
    fn from(element: Distance) -> Self {
        Self::Distance(element)
    }
}
impl From<ThinLens> for OpticalElement {
    fn from(element: ThinLens) -> Self {
        Self::ThinLens(element)
    }
}
impl From<ThickLens> for OpticalElement {
    fn from(element: ThickLens) -> Self {
        Self::ThickLens(element)
    }
}
impl From<Interface> for OpticalElement {
    fn from(element: Interface) -> Self {
        Self::Interface(element)
    }
}
impl From<Slab> for OpticalElement {
    fn from(element: Slab) -> Self {
        Self::Slab(element)
    }
}
impl From<Stop> for OpticalElement {
    fn from(element: Stop) -> Self {
        Self::Stop(element)
    }
}
impl From<LensletArray> for OpticalElement {
    fn from(element: LensletArray) -> Self {
        Self::LensletArray(element)
    }
}
impl From<Abcd> for OpticalElement {
    fn from(element: Abcd) -> Self {
        Self::Abcd(element)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn unimodular_samples() -> Vec<OpticalElement> {
        vec![
            Distance::new(42.0).unwrap().into(),
            ThinLens::new(100.0).unwrap().into(),
            ThinLens::new(-50.0).unwrap().into(),
            ThickLens::new(80.0, 100.0, 10.0).unwrap().into(),
            Slab::new(1.5, 9.0).unwrap().into(),
            Stop::new(5.0, None).unwrap().into(),
            LensletArray::new(60.0, 0.05).unwrap().into(),
            Abcd::new(1.0, 2.0, 0.5, 2.0).unwrap().into(),
        ]
    }
    #[test]
    fn determinant_is_one() {
        for element in unimodular_samples() {
            assert_relative_eq!(
                element.matrix().determinant(),
                1.0,
                epsilon = 1e-12,
                max_relative = 1e-12
            );
        }
    }
    #[test]
    fn interface_determinant() {
        // a refractive interface is the one element with det = n1/n2
        let interface = Interface::new(1.0, 1.5).unwrap();
        assert_relative_eq!(interface.matrix().determinant(), 1.0 / 1.5);
    }
    #[test]
    fn inverse_matrices() {
        let mut samples = unimodular_samples();
        samples.push(Interface::new(1.0, 1.5).unwrap().into());
        for element in samples {
            let inverse = element.inverse().unwrap();
            let product = element.matrix() * inverse.matrix();
            assert_relative_eq!(product[(0, 0)], 1.0, epsilon = 1e-12);
            assert_relative_eq!(product[(0, 1)], 0.0, epsilon = 1e-12);
            assert_relative_eq!(product[(1, 0)], 0.0, epsilon = 1e-12);
            assert_relative_eq!(product[(1, 1)], 1.0, epsilon = 1e-12);
        }
    }
    #[test]
    fn inverse_repositions_to_exit_plane() {
        let slab: OpticalElement = Slab::new(1.5, 9.0).unwrap().at(10.0).into();
        let inverse = slab.inverse().unwrap();
        assert_relative_eq!(inverse.z().unwrap(), 10.0 + 9.0 / 1.5);
        assert_relative_eq!(inverse.thickness(), -9.0 / 1.5);
        // inverting twice restores the original position
        let back = inverse.inverse().unwrap();
        assert_relative_eq!(back.z().unwrap(), 10.0);
    }
    #[test]
    fn names() {
        let element: OpticalElement = ThinLens::new(100.0).unwrap().into();
        assert_eq!(element.name(), "ThinLens");
        let element: OpticalElement = Stop::new(1.0, None).unwrap().into();
        assert_eq!(element.name(), "Stop");
    }
}
