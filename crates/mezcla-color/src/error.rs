// SPDX-License-Identifier: MIT
//
// Error type for the color codec.
//
// Only one thing can go wrong: a string that must be a color is not
// `#RRGGBB`. Every numeric conversion downstream of a successful parse is
// total, so there is nothing else to report.

use thiserror::Error;

/// Errors produced by the color codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not six hex digits with an optional leading `#`.
    #[error("invalid color format: {0:?} (expected #RRGGBB)")]
    InvalidColorFormat(String),
}

/// Result alias for color codec operations.
pub type Result<T> = std::result::Result<T, ColorError>;
