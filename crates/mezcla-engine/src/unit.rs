//! Unit normalization: from (quantity, unit label) to a mixing weight.
//!
//! Ingredients in a basket are measured in whatever unit they are sold in:
//! bases by the gallon, tints by the gram, additives by the liter. To mix
//! them, every quantity is mapped onto a single milliliter-equivalent
//! scale. The scale is deliberately coarse: a gram of pigment and a
//! milliliter of solvent weigh the same here. It exists only to make
//! weights comparable, not to be volumetrically or gravimetrically right.
//!
//! # Unit tags
//!
//! Labels are trimmed and matched case-insensitively.
//!
//! | Tags                       | Unit                   | mL-equivalent |
//! |----------------------------|------------------------|---------------|
//! | `l`, `litro`, `litros`     | [`Unit::Liter`]        | 1000          |
//! | `gal`, `galon`, `galones`  | [`Unit::Gallon`]       | 3785          |
//! | `ml`, `cc`                 | [`Unit::Milliliter`]   | 1             |
//! | `gr`, `gramos`, `g`        | [`Unit::Gram`]         | 1             |
//! | `kg`, `kilos`              | [`Unit::Kilogram`]     | 1000          |
//! | `oz`, `onza`               | [`Unit::Ounce`]        | 29.57         |
//! | `1/4`, `cuarto`            | [`Unit::QuarterGallon`]| 946           |
//! | `1/8`, `octavo`            | [`Unit::EighthGallon`] | 473           |
//! | `1/16`                     | [`Unit::SixteenthGallon`] | 236        |
//! | `1/32`                     | [`Unit::ThirtySecondGallon`] | 118     |
//! | `u`, `unidad`, anything else | [`Unit::Generic`]    | 1000          |

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A measuring unit recognized by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Liter.
    Liter,
    /// US gallon.
    Gallon,
    /// Milliliter (also cubic centimeter).
    Milliliter,
    /// Gram, weighted 1:1 with milliliters.
    Gram,
    /// Kilogram.
    Kilogram,
    /// US fluid ounce.
    Ounce,
    /// Quarter-gallon container.
    QuarterGallon,
    /// Eighth-gallon container.
    EighthGallon,
    /// Sixteenth-gallon sample container.
    SixteenthGallon,
    /// Thirty-second-gallon sample container.
    ThirtySecondGallon,
    /// A generic "unit", and the fallback for anything unrecognized.
    #[default]
    Generic,
}

impl Unit {
    /// Every unit, in table order.
    pub const ALL: [Self; 11] = [
        Self::Liter,
        Self::Gallon,
        Self::Milliliter,
        Self::Gram,
        Self::Kilogram,
        Self::Ounce,
        Self::QuarterGallon,
        Self::EighthGallon,
        Self::SixteenthGallon,
        Self::ThirtySecondGallon,
        Self::Generic,
    ];

    /// Milliliter-equivalent multiplier for one of this unit.
    #[must_use]
    pub const fn ml_equivalent(self) -> f64 {
        match self {
            Self::Liter | Self::Kilogram | Self::Generic => 1000.0,
            Self::Gallon => 3785.0,
            Self::Milliliter | Self::Gram => 1.0,
            Self::Ounce => 29.57,
            Self::QuarterGallon => 946.0,
            Self::EighthGallon => 473.0,
            Self::SixteenthGallon => 236.0,
            Self::ThirtySecondGallon => 118.0,
        }
    }

    /// Canonical tag, as shown on labels and receipts.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Liter => "l",
            Self::Gallon => "gal",
            Self::Milliliter => "ml",
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Ounce => "oz",
            Self::QuarterGallon => "1/4",
            Self::EighthGallon => "1/8",
            Self::SixteenthGallon => "1/16",
            Self::ThirtySecondGallon => "1/32",
            Self::Generic => "u",
        }
    }

    /// Look up a unit label, returning `None` when it is not in the table.
    ///
    /// Use this when "unrecognized" has to be told apart from "generic";
    /// [`Unit::from_label`] folds both into [`Unit::Generic`].
    #[must_use]
    pub fn recognize(label: &str) -> Option<Self> {
        let unit = match label.trim().to_lowercase().as_str() {
            "l" | "litro" | "litros" => Self::Liter,
            "gal" | "galon" | "galones" => Self::Gallon,
            "ml" | "cc" => Self::Milliliter,
            "gr" | "gramos" | "g" => Self::Gram,
            "kg" | "kilos" => Self::Kilogram,
            "oz" | "onza" => Self::Ounce,
            "1/4" | "cuarto" => Self::QuarterGallon,
            "1/8" | "octavo" => Self::EighthGallon,
            "1/16" => Self::SixteenthGallon,
            "1/32" => Self::ThirtySecondGallon,
            "u" | "unidad" => Self::Generic,
            _ => return None,
        };
        Some(unit)
    }

    /// Look up a unit label, falling back to [`Unit::Generic`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::recognize(label).unwrap_or_else(|| {
            trace!(label, "unrecognized unit label, weighting as generic unit");
            Self::Generic
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Mixing weight of `quantity` measured in `unit`.
///
/// An absent unit (`None`) and an unrecognized one are both weighted as
/// [`Unit::Generic`]. Never fails. Negative quantities pass through
/// unchanged; rejecting them is up to the caller.
#[must_use]
pub fn weight_of(quantity: f64, unit: Option<&str>) -> f64 {
    let unit = unit.map_or(Unit::Generic, Unit::from_label);
    quantity * unit.ml_equivalent()
}

/// A quantity tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitQuantity {
    /// Amount, expected to be non-negative.
    pub quantity: f64,
    /// Unit the amount is measured in.
    pub unit: Unit,
}

impl UnitQuantity {
    /// Create a quantity in a known unit.
    #[must_use]
    pub const fn new(quantity: f64, unit: Unit) -> Self {
        Self { quantity, unit }
    }

    /// Create a quantity from a free-form unit label.
    #[must_use]
    pub fn from_label(quantity: f64, label: &str) -> Self {
        Self::new(quantity, Unit::from_label(label))
    }

    /// Mixing weight on the milliliter-equivalent scale.
    #[must_use]
    pub fn weight(self) -> f64 {
        self.quantity * self.unit.ml_equivalent()
    }
}

impl fmt::Display for UnitQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_weights_are_exact() {
        assert_eq!(weight_of(1.0, Some("gal")), 3785.0);
        assert_eq!(weight_of(2.0, Some("kg")), 2000.0);
        assert_eq!(weight_of(5.0, Some("gr")), 5.0);
        assert_eq!(weight_of(1.0, Some("bogus-unit")), 1000.0);
    }

    #[test]
    fn every_alias_resolves() {
        let cases = [
            ("l", Unit::Liter),
            ("litro", Unit::Liter),
            ("litros", Unit::Liter),
            ("gal", Unit::Gallon),
            ("galon", Unit::Gallon),
            ("galones", Unit::Gallon),
            ("ml", Unit::Milliliter),
            ("cc", Unit::Milliliter),
            ("gr", Unit::Gram),
            ("gramos", Unit::Gram),
            ("g", Unit::Gram),
            ("kg", Unit::Kilogram),
            ("kilos", Unit::Kilogram),
            ("oz", Unit::Ounce),
            ("onza", Unit::Ounce),
            ("1/4", Unit::QuarterGallon),
            ("cuarto", Unit::QuarterGallon),
            ("1/8", Unit::EighthGallon),
            ("octavo", Unit::EighthGallon),
            ("1/16", Unit::SixteenthGallon),
            ("1/32", Unit::ThirtySecondGallon),
            ("u", Unit::Generic),
            ("unidad", Unit::Generic),
        ];
        for (label, unit) in cases {
            assert_eq!(Unit::recognize(label), Some(unit), "label {label:?}");
        }
    }

    #[test]
    fn labels_are_case_insensitive_and_trimmed() {
        assert_eq!(Unit::recognize("L"), Some(Unit::Liter));
        assert_eq!(Unit::recognize("GAL"), Some(Unit::Gallon));
        assert_eq!(Unit::recognize("  Kg "), Some(Unit::Kilogram));
        assert_eq!(weight_of(3.0, Some("ML")), 3.0);
    }

    #[test]
    fn container_sizes() {
        assert_eq!(weight_of(1.0, Some("1/4")), 946.0);
        assert_eq!(weight_of(2.0, Some("1/8")), 946.0);
        assert_eq!(weight_of(1.0, Some("1/16")), 236.0);
        assert_eq!(weight_of(1.0, Some("1/32")), 118.0);
    }

    #[test]
    fn ounces_use_fluid_ounce_factor() {
        assert_eq!(weight_of(1.0, Some("oz")), 29.57);
    }

    #[test]
    fn absent_and_unknown_units_are_generic() {
        assert_eq!(weight_of(2.0, None), 2000.0);
        assert_eq!(weight_of(2.0, Some("")), 2000.0);
        assert_eq!(weight_of(2.0, Some("bucket")), 2000.0);
    }

    #[test]
    fn recognize_distinguishes_unknown_from_generic() {
        assert_eq!(Unit::recognize("u"), Some(Unit::Generic));
        assert_eq!(Unit::recognize("bucket"), None);
        assert_eq!(Unit::from_label("bucket"), Unit::Generic);
    }

    #[test]
    fn negative_quantities_pass_through() {
        assert_eq!(weight_of(-1.0, Some("l")), -1000.0);
    }

    #[test]
    fn canonical_tags_recognize_themselves() {
        for unit in Unit::ALL {
            assert_eq!(Unit::recognize(unit.tag()), Some(unit));
        }
    }

    #[test]
    fn unit_quantity_weight_matches_free_function() {
        let q = UnitQuantity::from_label(1.5, "litros");
        assert_eq!(q.unit, Unit::Liter);
        assert_eq!(q.weight(), weight_of(1.5, Some("litros")));
        assert_eq!(q.to_string(), "1.5 l");
    }

    #[test]
    fn unit_serializes_as_snake_case() {
        let json = serde_json::to_string(&Unit::ThirtySecondGallon).unwrap();
        assert_eq!(json, r#""thirty_second_gallon""#);
        let back: Unit = serde_json::from_str(r#""quarter_gallon""#).unwrap();
        assert_eq!(back, Unit::QuarterGallon);
    }
}
