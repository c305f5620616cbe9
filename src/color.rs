#![warn(missing_docs)]
//! Hex / RGB color conversion and per-ray color schemes
//!
//! Every [`Path`](crate::ray::Path) carries its color as a 7-character hex string
//! (`#RRGGBB`). A [`ColorScheme`] assigns such a color to each ray of a bundle,
//! either as a single fixed color or sampled from a [`colorous`] gradient by
//! normalized ray index.
use std::fmt;

use crate::error::{ParaxError, ParaxResult};

/// Convert an RGB triple to a hex color string (`#rrggbb`).
///
/// Components must be finite and within `0..=255`. As a convenience, a triple
/// with *all* components within `0..=1` is treated as normalized and scaled by
/// 255 before formatting. Out-of-range input is rejected, never clamped.
///
/// # Errors
/// This function returns an error if
///  - the slice does not have exactly 3 components
///  - any component is negative, greater than 255 or not finite
pub fn rgb2hex(rgb: &[f64]) -> ParaxResult<String> {
    if rgb.len() != 3 {
        return Err(ParaxError::Color(format!(
            "RGB array must have exactly 3 components, got {}",
            rgb.len()
        )));
    }
    for value in rgb {
        if !value.is_finite() || *value < 0.0 || *value > 255.0 {
            return Err(ParaxError::Color(format!(
                "RGB component out of range 0..=255: {value}"
            )));
        }
    }
    let scale = if rgb.iter().all(|v| *v <= 1.0) {
        255.0
    } else {
        1.0
    };
    let channel = |v: f64| {
        #[allow(clippy::cast_possible_truncation)]
        #[allow(clippy::cast_sign_loss)]
        let byte = (v * scale).round() as u8;
        byte
    };
    Ok(format!(
        "#{:02x}{:02x}{:02x}",
        channel(rgb[0]),
        channel(rgb[1]),
        channel(rgb[2])
    ))
}

/// Convert a 7-character hex color string (`#RRGGBB`) into an RGB triple.
///
/// The exact inverse of [`rgb2hex`] for integral components: round-trips
/// without loss for any valid string.
///
/// # Errors
/// This function returns an error if
///  - the string is not exactly 7 ASCII characters
///  - the string does not start with `#`
///  - any of the three component pairs is not valid hexadecimal
pub fn hex2rgb(hex: &str) -> ParaxResult<[u8; 3]> {
    if !hex.is_ascii() || hex.len() != 7 {
        return Err(ParaxError::Color(format!(
            "hex color must be 7 ASCII characters: '{hex}'"
        )));
    }
    if !hex.starts_with('#') {
        return Err(ParaxError::Color(format!(
            "hex color must start with '#': '{hex}'"
        )));
    }
    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|e| ParaxError::Color(format!("invalid hex component in '{hex}': {e}")))
    };
    Ok([parse(1..3)?, parse(3..5)?, parse(5..7)?])
}

/// Color assignment for the rays of a [`Bundle`](crate::rays::Bundle).
#[derive(Clone, Copy)]
pub enum ColorScheme {
    /// all rays share a single fixed color
    Fixed([u8; 3]),
    /// ray colors are sampled from a gradient over the ray index
    Gradient(colorous::Gradient),
}

impl ColorScheme {
    /// Create a fixed color scheme from a hex color string.
    ///
    /// # Errors
    /// This function returns an error if the given string is not a valid
    /// `#RRGGBB` color (see [`hex2rgb`]).
    pub fn fixed(hex: &str) -> ParaxResult<Self> {
        Ok(Self::Fixed(hex2rgb(hex)?))
    }
    /// Sample the color for ray `index` out of `count` as a hex string.
    #[must_use]
    pub fn sample(&self, index: usize, count: usize) -> String {
        match self {
            Self::Fixed([r, g, b]) => format!("#{r:02x}{g:02x}{b:02x}"),
            Self::Gradient(gradient) => {
                let c = if count > 1 {
                    gradient.eval_rational(index, count)
                } else {
                    gradient.eval_continuous(0.0)
                };
                format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
            }
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::Gradient(colorous::VIRIDIS)
    }
}

impl fmt::Debug for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(rgb) => write!(f, "Fixed({rgb:?})"),
            Self::Gradient(_) => write!(f, "Gradient"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    #[test]
    fn rgb2hex_basic() {
        assert_eq!(rgb2hex(&[255.0, 0.0, 128.0]).unwrap(), "#ff0080");
        assert_eq!(rgb2hex(&[18.0, 52.0, 86.0]).unwrap(), "#123456");
    }
    #[test]
    fn rgb2hex_normalized() {
        // all components <= 1.0 are treated as normalized floats
        assert_eq!(rgb2hex(&[1.0, 0.0, 0.0]).unwrap(), "#ff0000");
        assert_eq!(rgb2hex(&[0.0, 0.5, 1.0]).unwrap(), "#0080ff");
    }
    #[test]
    fn rgb2hex_invalid() {
        assert_matches!(rgb2hex(&[0.0, 0.0]), Err(ParaxError::Color(_)));
        assert_matches!(rgb2hex(&[0.0, 0.0, 256.0]), Err(ParaxError::Color(_)));
        assert_matches!(rgb2hex(&[-1.0, 0.0, 0.0]), Err(ParaxError::Color(_)));
        assert_matches!(rgb2hex(&[f64::NAN, 0.0, 0.0]), Err(ParaxError::Color(_)));
    }
    #[test]
    fn hex2rgb_basic() {
        assert_eq!(hex2rgb("#123456").unwrap(), [18, 52, 86]);
        assert_eq!(hex2rgb("#FFFFFF").unwrap(), [255, 255, 255]);
    }
    #[test]
    fn hex2rgb_invalid() {
        assert_matches!(hex2rgb("#12345"), Err(ParaxError::Color(_)));
        assert_matches!(hex2rgb("123456#"), Err(ParaxError::Color(_)));
        assert_matches!(hex2rgb("#12345g"), Err(ParaxError::Color(_)));
        assert_matches!(hex2rgb("#12345é"), Err(ParaxError::Color(_)));
    }
    #[test]
    fn round_trip() {
        for rgb in [[0u8, 0, 0], [255, 255, 255], [2, 200, 17], [128, 64, 32]] {
            let hex = rgb2hex(&[f64::from(rgb[0]), f64::from(rgb[1]), f64::from(rgb[2])]).unwrap();
            assert_eq!(hex2rgb(&hex).unwrap(), rgb);
        }
    }
    #[test]
    fn scheme_fixed() {
        let scheme = ColorScheme::fixed("#ff8000").unwrap();
        assert_eq!(scheme.sample(0, 10), "#ff8000");
        assert_eq!(scheme.sample(9, 10), "#ff8000");
        assert_matches!(ColorScheme::fixed("red"), Err(ParaxError::Color(_)));
    }
    #[test]
    fn scheme_gradient() {
        let scheme = ColorScheme::Gradient(colorous::VIRIDIS);
        let first = scheme.sample(0, 11);
        let last = scheme.sample(10, 11);
        assert_ne!(first, last);
        assert!(hex2rgb(&first).is_ok());
        // a single-ray bundle samples the gradient start
        assert_eq!(scheme.sample(0, 1), first);
    }
}
