#![warn(missing_docs)]
//! Line sensor accumulating ray colors into pixel bins
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ParaxError, ParaxResult},
    ray::Path,
    rays::Bundle,
    utils::{f64_to_usize, usize_to_f64},
};

/// A 1D sensor strip spanning `[-extent, extent]` on the `r` axis.
///
/// Each exposed ray deposits its RGB color, scaled by the sensor intensity,
/// into the two pixel bins nearest to its final radial position (linear
/// interpolation). Halted rays and rays outside the extent are ignored.
/// Pixel 0 corresponds to `r = +extent`, the last pixel to `r = -extent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    extent: f64,
    intensity: f64,
    pixels: Vec<[f64; 3]>,
}

impl Sensor {
    /// Creates a new [`Sensor`].
    ///
    /// The pixel count is derived from the half-width `extent` and the pixel
    /// pitch `pixel_size` as `1 + 2 * (floor(extent / pixel_size) + 1)`, which
    /// keeps a center pixel exactly on the optical axis.
    ///
    /// # Errors
    /// This function returns an error if `extent`, `pixel_size` or
    /// `intensity` is not positive and finite.
    pub fn new(extent: f64, pixel_size: f64, intensity: f64) -> ParaxResult<Self> {
        for (name, value) in [
            ("extent", extent),
            ("pixel size", pixel_size),
            ("intensity", intensity),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ParaxError::Other(format!(
                    "sensor {name} must be > 0 and finite, got {value}"
                )));
            }
        }
        let n_px = 1 + 2 * (f64_to_usize((extent / pixel_size).floor()) + 1);
        Ok(Self {
            extent,
            intensity,
            pixels: vec![[0.0; 3]; n_px],
        })
    }
    /// Returns the number of pixels of this [`Sensor`].
    #[must_use]
    pub fn n_px(&self) -> usize {
        self.pixels.len()
    }
    /// Returns the accumulated raw pixel values.
    #[must_use]
    pub fn pixels(&self) -> &[[f64; 3]] {
        &self.pixels
    }
    /// Expose the sensor to a single ray at its current position.
    ///
    /// Halted rays and rays outside `[-extent, extent]` are skipped.
    ///
    /// # Errors
    /// This function returns an error if the ray carries a malformed color
    /// string (see [`Path::rgb`]).
    pub fn expose(&mut self, ray: &Path) -> ParaxResult<()> {
        if ray.is_halted() {
            return Ok(());
        }
        let pos_frac = ray.state().r() / self.extent;
        if pos_frac.abs() > 1.0 {
            return Ok(());
        }
        let [r, g, b] = ray.rgb()?;
        let rgb = [f64::from(r), f64::from(g), f64::from(b)];
        let index = 0.5 * (1.0 - pos_frac) * usize_to_f64(self.pixels.len() - 1);
        let lower = index.floor();
        let upper_weight = index - lower;
        let lower_index = f64_to_usize(lower);
        let upper_index = f64_to_usize(index.ceil());
        for channel in 0..3 {
            self.pixels[upper_index][channel] += rgb[channel] * upper_weight * self.intensity;
            self.pixels[lower_index][channel] +=
                rgb[channel] * (1.0 - upper_weight) * self.intensity;
        }
        Ok(())
    }
    /// Expose the sensor to every ray of a bundle.
    ///
    /// # Errors
    /// This function returns an error if any ray carries a malformed color.
    pub fn expose_bundle(&mut self, bundle: &Bundle) -> ParaxResult<()> {
        for ray in bundle {
            self.expose(ray)?;
        }
        Ok(())
    }
    /// Clamp all accumulated pixel values to the given maximum.
    pub fn cap(&mut self, max: f64) {
        for pixel in &mut self.pixels {
            for channel in pixel {
                *channel = channel.min(max);
            }
        }
    }
    /// Render the sensor strip as an image of the given width.
    ///
    /// The strip is replicated horizontally and normalized to the brightest
    /// accumulated value. An unexposed sensor yields an all-black image.
    ///
    /// # Errors
    /// This function returns an error if the pixel count exceeds the image
    /// dimension limits.
    pub fn to_image(&self, width: u32) -> ParaxResult<RgbImage> {
        let height = u32::try_from(self.pixels.len())
            .map_err(|_| ParaxError::Other("sensor has too many pixels to render".into()))?;
        let max = self
            .pixels
            .iter()
            .flatten()
            .copied()
            .fold(0.0_f64, f64::max);
        let to_byte = |value: f64| {
            if max > 0.0 {
                #[allow(clippy::cast_possible_truncation)]
                #[allow(clippy::cast_sign_loss)]
                let byte = (value / max * 255.0).round() as u8;
                byte
            } else {
                0
            }
        };
        Ok(RgbImage::from_fn(width, height, |_, y| {
            let pixel = self.pixels[y as usize];
            Rgb([to_byte(pixel[0]), to_byte(pixel[1]), to_byte(pixel[2])])
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    #[test]
    fn new() {
        let sensor = Sensor::new(1.0, 1.0, 0.1).unwrap();
        assert_eq!(sensor.n_px(), 5);
        assert_matches!(Sensor::new(0.0, 1.0, 0.1), Err(ParaxError::Other(_)));
        assert_matches!(Sensor::new(1.0, -1.0, 0.1), Err(ParaxError::Other(_)));
        assert_matches!(Sensor::new(1.0, 1.0, f64::NAN), Err(ParaxError::Other(_)));
    }
    #[test]
    fn axial_ray_hits_center_pixel() {
        let mut sensor = Sensor::new(1.0, 1.0, 1.0).unwrap();
        let ray = Path::new(0.0, 0.0, 0.0, "#ffffff").unwrap();
        sensor.expose(&ray).unwrap();
        assert_relative_eq!(sensor.pixels()[2][0], 255.0);
        assert_relative_eq!(sensor.pixels()[1][0], 0.0);
        assert_relative_eq!(sensor.pixels()[3][0], 0.0);
    }
    #[test]
    fn interpolation_splits_between_bins() {
        let mut sensor = Sensor::new(1.0, 1.0, 1.0).unwrap();
        // r = 0.75 lies halfway between pixels 0 and 1
        let ray = Path::new(0.75, 0.0, 0.0, "#ff0000").unwrap();
        sensor.expose(&ray).unwrap();
        assert_relative_eq!(sensor.pixels()[0][0], 127.5);
        assert_relative_eq!(sensor.pixels()[1][0], 127.5);
        assert_relative_eq!(sensor.pixels()[0][1], 0.0);
    }
    #[test]
    fn halted_and_out_of_range_rays_are_skipped() {
        let mut sensor = Sensor::new(1.0, 1.0, 1.0).unwrap();
        let mut halted = Path::new(0.0, 0.0, 0.0, "#ffffff").unwrap();
        halted.halt();
        sensor.expose(&halted).unwrap();
        let outside = Path::new(1.5, 0.0, 0.0, "#ffffff").unwrap();
        sensor.expose(&outside).unwrap();
        assert!(sensor.pixels().iter().flatten().all(|v| *v == 0.0));
    }
    #[test]
    fn cap_clamps_accumulated_values() {
        let mut sensor = Sensor::new(1.0, 1.0, 2.0).unwrap();
        let ray = Path::new(0.0, 0.0, 0.0, "#ffffff").unwrap();
        sensor.expose(&ray).unwrap();
        assert_relative_eq!(sensor.pixels()[2][0], 510.0);
        sensor.cap(255.0);
        assert_relative_eq!(sensor.pixels()[2][0], 255.0);
    }
    #[test]
    fn to_image_normalizes() {
        let mut sensor = Sensor::new(1.0, 1.0, 0.5).unwrap();
        let ray = Path::new(0.0, 0.0, 0.0, "#ff0000").unwrap();
        sensor.expose(&ray).unwrap();
        let image = sensor.to_image(10).unwrap();
        assert_eq!(image.dimensions(), (10, 5));
        assert_eq!(image.get_pixel(0, 2).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }
    #[test]
    fn empty_sensor_renders_black() {
        let sensor = Sensor::new(1.0, 1.0, 1.0).unwrap();
        let image = sensor.to_image(4).unwrap();
        assert!(image.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
