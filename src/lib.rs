// SPDX-License-Identifier: MIT
//
// mezcla — color engine for a paint-mixing point of sale.
//
// This is the facade that ties the workspace crates together:
//
//   mezcla-color  → #RRGGBB ↔ sRGB ↔ CIE L*a*b* (D65), Delta E
//   mezcla-engine → unit weights, Lab mixing, catalog matching, config
//
// Inventory, formulas, pricing and printing live in the host application.
// The engine only ever sees swatch colors, quantities with unit labels, a
// target color, and a catalog of candidates it hands back untouched.
//
//   ticket lines → weights → mix → live preview color
//   target color + catalog → Delta E ranking → closest products/formulas

use tracing_subscriber::EnvFilter;

pub use mezcla_color as color;
pub use mezcla_engine as engine;

pub use mezcla_color::{
    ColorError, Lab, Rgb, WHITE_HEX, delta_e76, delta_e_hex, hex_to_lab, hex_to_rgb, lab_to_hex,
    lab_to_rgb, rgb_to_hex, rgb_to_lab,
};
pub use mezcla_engine::{
    BasketItem, CatalogCandidate, ConfigError, EngineConfig, MatchKind, MatchResult, Matcher,
    Role, Unit, UnitQuantity, WeightedIngredient, find_closest_matches,
    find_closest_matches_default, find_closest_matches_of_kind, mix, mix_basket, weight_of,
};

/// Install a `tracing` subscriber that writes engine diagnostics to stderr.
///
/// `RUST_LOG` takes precedence over `default_level` (for example
/// `RUST_LOG=mezcla_engine=trace` shows every skipped ingredient and
/// candidate). Returns `false` if a global subscriber was already set, in
/// which case nothing changes.
pub fn init_tracing(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
