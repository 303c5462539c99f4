//! Basket preview: turning the items on a mixing ticket into a color.
//!
//! The point of sale collects bases and tints with their quantities and
//! unit labels. Before they can be mixed, each quantity becomes a weight.
//! A missing unit label is filled in from the item's [`Role`]: bases are
//! sold by the container, tints by the gram.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::EngineConfig;
use crate::mix::{WeightedIngredient, mix};
use crate::unit::Unit;

/// What an item is doing in the mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The paint being tinted.
    Base,
    /// A pigment added to the base.
    Tint,
}

impl Role {
    /// The unit assumed when an item of this role has no unit label.
    #[must_use]
    pub const fn default_unit(self, config: &EngineConfig) -> Unit {
        match self {
            Self::Base => config.base_unit,
            Self::Tint => config.tint_unit,
        }
    }
}

/// One line of a mixing ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketItem {
    /// `#RRGGBB` swatch color, if the product has one.
    pub color: Option<String>,
    /// Dispensed quantity.
    pub quantity: f64,
    /// Unit label as recorded on the product.
    #[serde(default)]
    pub unit: Option<String>,
    /// Base or tint.
    pub role: Role,
}

impl BasketItem {
    /// A base item.
    #[must_use]
    pub fn base(color: impl Into<String>, quantity: f64, unit: Option<&str>) -> Self {
        Self::with_role(Role::Base, color, quantity, unit)
    }

    /// A tint item.
    #[must_use]
    pub fn tint(color: impl Into<String>, quantity: f64, unit: Option<&str>) -> Self {
        Self::with_role(Role::Tint, color, quantity, unit)
    }

    fn with_role(role: Role, color: impl Into<String>, quantity: f64, unit: Option<&str>) -> Self {
        Self {
            color: Some(color.into()),
            quantity,
            unit: unit.map(str::to_owned),
            role,
        }
    }

    /// The unit this item is weighed in.
    ///
    /// An empty label counts as missing. A label of only whitespace is a
    /// label, and like any other unrecognized one it weighs as
    /// [`Unit::Generic`]. With
    /// [`kilograms_as_grams`](EngineConfig::kilograms_as_grams) set, a
    /// kilogram label is weighed as grams.
    #[must_use]
    pub fn effective_unit(&self, config: &EngineConfig) -> Unit {
        let label = self.unit.as_deref().filter(|s| !s.is_empty());
        match label.map(Unit::from_label) {
            None => self.role.default_unit(config),
            Some(Unit::Kilogram) if config.kilograms_as_grams => Unit::Gram,
            Some(unit) => unit,
        }
    }
}

/// Mixing weight of a basket item.
#[must_use]
pub fn ingredient_weight(item: &BasketItem, config: &EngineConfig) -> f64 {
    item.quantity * item.effective_unit(config).ml_equivalent()
}

/// Convert basket items to mixer input, dropping items without a color.
#[must_use]
pub fn basket_ingredients(items: &[BasketItem], config: &EngineConfig) -> Vec<WeightedIngredient> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let Some(color) = &item.color else {
                trace!(index, role = ?item.role, "basket item has no color, leaving it out");
                return None;
            };
            Some(WeightedIngredient::new(
                color.clone(),
                ingredient_weight(item, config),
            ))
        })
        .collect()
}

/// The live preview color of a basket.
#[must_use]
pub fn mix_basket(items: &[BasketItem], config: &EngineConfig) -> String {
    mix(&basket_ingredients(items, config))
}
