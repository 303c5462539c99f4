// SPDX-License-Identifier: MIT
//
// mezcla-color — color codec for the mezcla paint-mixing engine.
//
// Converts between `#RRGGBB` display colors, floating-point sRGB and
// CIE L*a*b* under the D65 illuminant, and measures perceptual distance
// with the CIE76 Delta E. Pure functions only: no state, no I/O.

pub mod color;
pub mod error;

pub use color::{
    Lab, Rgb, WHITE_HEX, delta_e76, delta_e_hex, hex_to_lab, hex_to_rgb, lab_to_hex, lab_to_rgb,
    rgb_to_hex, rgb_to_lab,
};
pub use error::{ColorError, Result};
