//! # mezcla-engine — mixing and matching for the paint counter
//!
//! Takes what the point of sale knows about a job (swatch colors,
//! quantities, unit labels, a target color, a catalog) and answers two
//! questions: what color will this mix be, and which products or saved
//! formulas come closest to a target.
//!
//! # Architecture
//!
//! ```text
//! BasketItem (color, quantity, unit label, role)
//!     │
//!     ▼
//! unit.rs:    quantity × mL-equivalent → weight
//!     │
//!     ▼
//! mix.rs:     weighted centroid in L*a*b* → #rrggbb preview
//!
//! target #rrggbb + [CatalogCandidate]
//!     │
//!     ▼
//! matcher.rs: CIE76 Delta E, stable ascending sort, limit
//! ```
//!
//! basket.rs ties the first pipeline together; config.rs holds the few
//! defaults a host can tune.
//!
//! Everything here is synchronous and stateless. Calls share nothing, so
//! they can run from any number of threads at once.

pub mod basket;
pub mod config;
pub mod matcher;
pub mod mix;
pub mod unit;

pub use basket::{BasketItem, Role, basket_ingredients, ingredient_weight, mix_basket};
pub use config::{ConfigError, DEFAULT_MATCH_LIMIT, EngineConfig};
pub use matcher::{
    CatalogCandidate, MatchKind, MatchResult, Matcher, find_closest_matches,
    find_closest_matches_default, find_closest_matches_of_kind,
};
pub use mix::{WeightedIngredient, centroid, mix};
pub use unit::{Unit, UnitQuantity, weight_of};
