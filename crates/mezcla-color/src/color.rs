// SPDX-License-Identifier: MIT
//
// mezcla color codec — hex ↔ sRGB ↔ CIE L*a*b* (D65).
//
// Single-character variable names (r, g, b, l, a, x, y, z) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Display colors arrive as `#RRGGBB` strings from the inventory and the
// color picker. Everything the engine does with them (mixing, matching)
// happens in CIE L*a*b*, where Euclidean distance tracks perceived
// difference far better than distance in raw RGB.
//
// Conversion pipeline:
//
//   #RRGGBB ↔ sRGB (0–255) ↔ Linear sRGB ↔ CIE XYZ (D65, ×100) ↔ L*a*b*
//
// The matrices, white point and Lab thresholds below are fixed; the
// reference values in the tests were computed with exactly these.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ColorError, Result};

/// The fallback display color, pure white.
pub const WHITE_HEX: &str = "#ffffff";

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An sRGB color with floating-point channels in the range 0.0–255.0.
///
/// This is an intermediate form: it carries the gamma-encoded channel values
/// of a [`#RRGGBB`](hex_to_rgb) string without rounding, so that values coming
/// back from L*a*b* can be inspected before they are quantized to hex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red channel, 0.0–255.0.
    pub r: f64,
    /// Green channel, 0.0–255.0.
    pub g: f64,
    /// Blue channel, 0.0–255.0.
    pub b: f64,
}

impl Rgb {
    /// Create a color from channel values, clamping each to 0.0–255.0.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Create a color from 8-bit channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(f64::from(r), f64::from(g), f64::from(b))
    }

    /// Parse a `#RRGGBB` string. See [`hex_to_rgb`].
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] if `s` is not six hex digits
    /// with an optional leading `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }

    /// Round and clamp to 8-bit channels.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Encode as a lower-case `#rrggbb` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// Convert to CIE L*a*b* under D65.
    #[must_use]
    pub fn to_lab(self) -> Lab {
        rgb_to_lab(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─── Lab ─────────────────────────────────────────────────────────────────────

/// A color in CIE 1976 L*a*b* under the D65 reference white.
///
/// - `l`: lightness, 0.0 (black) to 100.0 (white)
/// - `a`: green (−) to red (+), unbounded but roughly −128 to 127 for sRGB
/// - `b`: blue (−) to yellow (+), same practical range as `a`
///
/// Every `Lab` can be turned back into a display color: [`lab_to_rgb`]
/// clamps out-of-gamut results to the sRGB cube.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness.
    pub l: f64,
    /// Green–red axis.
    pub a: f64,
    /// Blue–yellow axis.
    pub b: f64,
}

impl Lab {
    /// Create a color from L*a*b* coordinates.
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Parse a `#RRGGBB` string straight into L*a*b*.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] for malformed input.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_to_lab(s)
    }

    /// Convert back to sRGB (clamped to the displayable range).
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        lab_to_rgb(self)
    }

    /// Convert back to a `#rrggbb` display color.
    #[must_use]
    pub fn to_hex(self) -> String {
        lab_to_hex(self)
    }

    /// CIE76 color difference to another color.
    #[must_use]
    pub fn delta_e(self, other: &Self) -> f64 {
        delta_e76(self, *other)
    }
}

impl fmt::Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lab({:.2}, {:.2}, {:.2})", self.l, self.a, self.b)
    }
}

// ─── Hex Encoding ────────────────────────────────────────────────────────────

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
        .expect("hex color pattern is valid")
});

/// Parse a display color into sRGB channels.
///
/// Accepts exactly six hex digits, case-insensitive, with an optional
/// leading `#`. Shorthand (`#abc`), alpha (`#rrggbbaa`) and named colors are
/// rejected.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] carrying the input verbatim.
pub fn hex_to_rgb(s: &str) -> Result<Rgb> {
    let invalid = || ColorError::InvalidColorFormat(s.to_owned());
    let caps = HEX_COLOR.captures(s).ok_or_else(invalid)?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).map_err(|_| invalid());
    Ok(Rgb::rgb8(channel(1)?, channel(2)?, channel(3)?))
}

/// Encode channels as a lower-case `#rrggbb` string.
///
/// Each channel is rounded to the nearest integer and clamped to 0–255
/// first, which absorbs floating-point overshoot from color-space round
/// trips.
#[must_use]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    format!("#{:02x}{:02x}{:02x}", to_u8(r), to_u8(g), to_u8(b))
}

/// Round a 0–255 float to a byte. NaN encodes as 0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
const fn clamp_channel(v: f64) -> f64 {
    v.clamp(0.0, 255.0)
}

// ─── sRGB ↔ Linear sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single sRGB component (0.0–1.0) to linear light.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c > 0.040_45 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// Convert a single linear component (0.0–1.0) back to sRGB.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c > 0.003_130_8 {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    } else {
        c * 12.92
    }
}

// ─── Linear sRGB ↔ XYZ ──────────────────────────────────────────────────────
//
// The standard sRGB primaries with the D65 white point. Rows of the forward
// matrix sum to the white point (÷100), so #ffffff lands on L* = 100.

/// D65 reference white, X/Y/Z scaled so that Y = 100.
const D65_WHITE: [f64; 3] = [95.047, 100.0, 108.883];

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.240_454_2, -1.537_138_5, -0.498_531_4],
    [-0.969_266_0, 1.876_010_8, 0.041_556_0],
    [0.055_643_4, -0.204_025_9, 1.057_225_2],
];

#[inline]
fn mul3(m: [[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[2].mul_add(v[2], row[0].mul_add(v[0], row[1] * v[1])))
}

// ─── XYZ ↔ L*a*b* ───────────────────────────────────────────────────────────

/// Below this (normalized) value the cube root is replaced by a line.
const LAB_EPSILON: f64 = 0.008_856;
const LAB_SLOPE: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_SLOPE.mul_add(t, LAB_OFFSET)
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    let cube = t * t * t;
    if cube > LAB_EPSILON {
        cube
    } else {
        (t - LAB_OFFSET) / LAB_SLOPE
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert sRGB (0.0–255.0 channels) to CIE L*a*b* under D65.
///
/// Inputs are clamped to 0.0–255.0 first.
#[must_use]
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let linear = [rgb.r, rgb.g, rgb.b].map(|c| srgb_to_linear(clamp_channel(c) / 255.0));
    let xyz = mul3(SRGB_TO_XYZ, linear).map(|v| v * 100.0);

    let fx = lab_f(xyz[0] / D65_WHITE[0]);
    let fy = lab_f(xyz[1] / D65_WHITE[1]);
    let fz = lab_f(xyz[2] / D65_WHITE[2]);

    Lab {
        l: 116.0f64.mul_add(fy, -16.0),
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert CIE L*a*b* back to sRGB, the exact inverse of [`rgb_to_lab`].
///
/// Colors outside the sRGB gamut are clamped to 0.0–255.0 per channel.
#[must_use]
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    let xyz = [
        lab_f_inv(fx) * D65_WHITE[0] / 100.0,
        lab_f_inv(fy) * D65_WHITE[1] / 100.0,
        lab_f_inv(fz) * D65_WHITE[2] / 100.0,
    ];
    let [r, g, b] = mul3(XYZ_TO_SRGB, xyz).map(|c| linear_to_srgb(c) * 255.0);

    Rgb::new(r, g, b)
}

/// Parse a `#RRGGBB` string and convert it to L*a*b*.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] for malformed input.
pub fn hex_to_lab(s: &str) -> Result<Lab> {
    hex_to_rgb(s).map(rgb_to_lab)
}

/// Convert L*a*b* to a `#rrggbb` display color.
#[must_use]
pub fn lab_to_hex(lab: Lab) -> String {
    lab_to_rgb(lab).to_hex()
}

// ─── Delta E ─────────────────────────────────────────────────────────────────

/// CIE76 color difference: Euclidean distance in L*a*b*.
///
/// A difference around 2.3 is the commonly quoted "just noticeable"
/// threshold.
#[must_use]
pub fn delta_e76(x: Lab, y: Lab) -> f64 {
    let dl = x.l - y.l;
    let da = x.a - y.a;
    let db = x.b - y.b;
    db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
}

/// CIE76 difference between two display colors.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if either string is malformed.
pub fn delta_e_hex(x: &str, y: &str) -> Result<f64> {
    Ok(delta_e76(hex_to_lab(x)?, hex_to_lab(y)?))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
