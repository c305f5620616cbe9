//! Light-field imager demo
//!
//! An objective lens images three point sources onto a microlens array placed
//! in the image plane. Each lenslet redirects the converging fans onto a line
//! sensor one lenslet focal length behind the array, producing the elemental
//! images typical of a Fourier light-field setup.
//!
//! Run with `cargo run --example lenslet_imager`. Writes
//! `lenslet_imager.png` (ray trace) and `lenslet_imager_sensor.png`.
use parax::{
    elements::{LensletArray, Stop, ThinLens},
    error::ParaxResult,
    plot_scene, Bundle, ColorScheme, OpticsSystem, Sensor,
};

fn main() -> ParaxResult<()> {
    env_logger::init();

    let objective = ThinLens::new(100.0)?.with_diameter(4.0)?.at(0.0);
    let aperture = Stop::new(2.0, None)?.at(0.0);
    let mla = LensletArray::new(60.0, 0.5)?.with_diameter(3.0)?.at(200.0);
    let system = OpticsSystem::new(
        vec![objective.into(), aperture.into(), mla.into()],
        60.0,
    )?;

    // three object points at 2f, imaged 1:1 onto the array plane
    let mut bundles = Vec::new();
    for (r, hex) in [(-0.6, "#d62728"), (0.0, "#2ca02c"), (0.6, "#1f77b4")] {
        let scheme = ColorScheme::fixed(hex)?;
        let mut bundle = Bundle::point_source(-200.0, r, 0.008, None, 15, Some(scheme))?;
        system.apply_bundle(&mut bundle)?;
        bundles.push(bundle);
    }

    let mut sensor = Sensor::new(1.5, 0.01, 10.0)?;
    for bundle in &bundles {
        sensor.expose_bundle(bundle)?;
    }
    sensor.cap(255.0);
    sensor
        .to_image(200)?
        .save("lenslet_imager_sensor.png")
        .map_err(|e| parax::error::ParaxError::Other(format!("cannot save sensor image: {e}")))?;

    plot_scene(
        std::path::Path::new("lenslet_imager.png"),
        &system,
        &bundles,
        (1200, 800),
    )
}
