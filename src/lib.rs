//! This is the documentation for the **PARAX** software package, a small
//! simulator for **PARA**xial optics based on the ray-transfer (ABCD) matri**X**
//! formalism.
//!
//! Bundles of meridional rays are threaded through an [`OpticsSystem`], an
//! ordered pipeline of ideal optical [`elements`], while every ray records
//! its trajectory for later plotting or accumulation on a [`Sensor`]. Systems
//! support exact algebraic reversal.
//!
//! ```rust
//! use parax::{elements::ThinLens, Bundle, OpticsSystem};
//!
//! # fn main() -> parax::error::ParaxResult<()> {
//! let lens = ThinLens::new(100.0)?.at(0.0);
//! let system = OpticsSystem::new(vec![lens.into()], 100.0)?;
//! let mut fan = Bundle::collimated_source(1.0, None, 5, -50.0, 0.0, None)?;
//! system.apply_bundle(&mut fan)?;
//! // all rays meet on the axis at the focal plane
//! assert!(fan.iter().all(|ray| ray.state().r().abs() < 1e-9));
//! # Ok(())
//! # }
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod elements;
pub mod error;
pub mod plottable;
pub mod ray;
pub mod rays;
pub mod sensor;
pub mod system;
pub mod utils;

pub use color::ColorScheme;
pub use plottable::{plot_scene, Plottable};
pub use ray::{Path, RayState};
pub use rays::Bundle;
pub use sensor::Sensor;
pub use system::OpticsSystem;
