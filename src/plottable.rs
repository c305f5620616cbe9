#![warn(missing_docs)]
//! Rendering of ray trajectories and element markers with [`plotters`]
//!
//! Everything that can be drawn into a 2D `z`/`r` chart implements
//! [`Plottable`]: a [`Path`] becomes a colored polyline of its recorded
//! trajectory, a [`Bundle`] draws all of its rays and an [`OpticsSystem`]
//! draws vertical markers at the positions of its zero-thickness elements
//! (stops appear as their blocked margins). [`plot_scene`] is the convenience
//! wrapper producing a complete bitmap plot.
use log::info;
use plotters::chart::{ChartBuilder, ChartContext, LabelAreaPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::{BitMapBackend, DrawingBackend, IntoDrawingArea};
use plotters::series::LineSeries;
use plotters::style::{RGBColor, ShapeStyle, BLACK, WHITE};

use crate::{
    elements::{Element, OpticalElement},
    error::{ParaxError, ParaxResult},
    ray::Path,
    rays::Bundle,
    system::OpticsSystem,
};

/// A 2D chart with `z` on the x axis and `r` on the y axis.
pub type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const ELEMENT_MARKER: RGBColor = RGBColor(128, 0, 128);

/// Something that can be drawn into a `z`/`r` chart.
pub trait Plottable {
    /// Draw this object into the given chart.
    ///
    /// # Errors
    /// This function returns an error if the drawing backend fails or a ray
    /// carries a malformed color.
    fn add_to_chart<DB: DrawingBackend>(&self, chart: &mut Chart2d<'_, DB>) -> ParaxResult<()>;
}

fn draw_vline<DB: DrawingBackend, S: Into<ShapeStyle>>(
    chart: &mut Chart2d<'_, DB>,
    z: f64,
    from: f64,
    to: f64,
    style: S,
) -> ParaxResult<()> {
    chart
        .draw_series(LineSeries::new([(z, from), (z, to)], style))
        .map_err(|e| ParaxError::Plot(format!("cannot draw element marker: {e}")))?;
    Ok(())
}

impl Plottable for Path {
    fn add_to_chart<DB: DrawingBackend>(&self, chart: &mut Chart2d<'_, DB>) -> ParaxResult<()> {
        let [r, g, b] = self.rgb()?;
        let color = RGBColor(r, g, b);
        chart
            .draw_series(LineSeries::new(
                self.position_history().iter().map(|point| (point.x, point.y)),
                &color,
            ))
            .map_err(|e| ParaxError::Plot(format!("cannot draw ray path: {e}")))?;
        Ok(())
    }
}

impl Plottable for Bundle {
    fn add_to_chart<DB: DrawingBackend>(&self, chart: &mut Chart2d<'_, DB>) -> ParaxResult<()> {
        for ray in self {
            ray.add_to_chart(chart)?;
        }
        Ok(())
    }
}

impl Plottable for OpticsSystem {
    fn add_to_chart<DB: DrawingBackend>(&self, chart: &mut Chart2d<'_, DB>) -> ParaxResult<()> {
        let y_range = chart.y_range();
        let (y_min, y_max) = (y_range.start, y_range.end);
        for element in self.elements() {
            let Some(z) = element.z() else {
                continue;
            };
            match element {
                OpticalElement::Stop(stop) => {
                    draw_vline(chart, z, y_min, stop.r_min(), &BLACK)?;
                    draw_vline(chart, z, stop.r_max(), y_max, &BLACK)?;
                }
                OpticalElement::ThinLens(lens) => {
                    let half = (lens.diameter() / 2.0).min(y_max).max(y_min);
                    draw_vline(chart, z, -half, half, &ELEMENT_MARKER)?;
                }
                OpticalElement::LensletArray(array) => {
                    let half = (array.diameter() / 2.0).min(y_max).max(y_min);
                    draw_vline(chart, z, -half, half, &ELEMENT_MARKER)?;
                }
                OpticalElement::Interface(_) => {
                    draw_vline(chart, z, y_min, y_max, &ELEMENT_MARKER)?;
                }
                // elements with axial thickness have no single marker plane
                _ => {}
            }
        }
        Ok(())
    }
}

/// Axis bounds of all recorded ray trajectories, padded by 5%.
fn scene_bounds(bundles: &[Bundle]) -> ParaxResult<((f64, f64), (f64, f64))> {
    let mut z_bounds = (f64::INFINITY, f64::NEG_INFINITY);
    let mut r_bounds = (f64::INFINITY, f64::NEG_INFINITY);
    for ray in bundles.iter().flatten() {
        for point in ray.position_history() {
            z_bounds = (z_bounds.0.min(point.x), z_bounds.1.max(point.x));
            r_bounds = (r_bounds.0.min(point.y), r_bounds.1.max(point.y));
        }
    }
    if !z_bounds.0.is_finite() || !r_bounds.0.is_finite() {
        return Err(ParaxError::Plot("no ray history to plot".into()));
    }
    let pad = |(min, max): (f64, f64)| {
        let span = max - min;
        let margin = if span > 0.0 { 0.05 * span } else { 1.0 };
        (min - margin, max + margin)
    };
    Ok((pad(z_bounds), pad(r_bounds)))
}

/// Render a complete scene (ray trajectories + element markers) to a bitmap.
///
/// # Errors
/// This function returns an error if
///  - no bundle contains any recorded trajectory
///  - the drawing backend fails (e.g. the file cannot be written)
pub fn plot_scene(
    path: &std::path::Path,
    system: &OpticsSystem,
    bundles: &[Bundle],
    size: (u32, u32),
) -> ParaxResult<()> {
    info!("writing ray trace plot to {}", path.display());
    let (z_bounds, r_bounds) = scene_bounds(bundles)?;
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ParaxError::Plot(format!("cannot clear drawing area: {e}")))?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(z_bounds.0..z_bounds.1, r_bounds.0..r_bounds.1)
        .map_err(|e| ParaxError::Plot(format!("cannot build chart: {e}")))?;
    chart
        .configure_mesh()
        .x_desc("z / mm")
        .y_desc("r / mm")
        .draw()
        .map_err(|e| ParaxError::Plot(format!("cannot draw chart mesh: {e}")))?;
    for bundle in bundles {
        bundle.add_to_chart(&mut chart)?;
    }
    system.add_to_chart(&mut chart)?;
    root.present()
        .map_err(|e| ParaxError::Plot(format!("cannot write plot: {e}")))?;
    Ok(())
}
