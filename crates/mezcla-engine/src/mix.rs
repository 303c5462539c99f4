//! Perceptual mixing: the weighted centroid of ingredients in L*a*b*.
//!
//! Averaging in L*a*b* instead of raw RGB tracks what the eye sees much more
//! closely, particularly when lightness differs a lot between ingredients
//! (a little black in a lot of white darkens it more than an RGB average
//! suggests). It is still an approximation: pigment opacity, tinting
//! strength and the subtractive nature of real paint are not modeled.
//!
//! The mixer never fails. Ingredients with no positive weight or with a
//! color that does not parse contribute nothing, and a mix with nothing
//! left in it is white.

use mezcla_color::{Lab, WHITE_HEX, hex_to_lab, lab_to_hex};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One ingredient of a mix: a display color and a unit-free weight.
///
/// Weights must already be on a common scale, see
/// [`weight_of`](crate::unit::weight_of).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedIngredient {
    /// `#RRGGBB` display color.
    pub color: String,
    /// Mixing weight; only values greater than zero count.
    pub weight: f64,
}

impl WeightedIngredient {
    /// Create an ingredient.
    #[must_use]
    pub fn new(color: impl Into<String>, weight: f64) -> Self {
        Self {
            color: color.into(),
            weight,
        }
    }
}

/// Running weighted sums of L*, a*, b*.
#[derive(Debug, Default)]
struct LabAccumulator {
    l: f64,
    a: f64,
    b: f64,
    total: f64,
    count: usize,
}

impl LabAccumulator {
    // Plain multiply and add: a fused multiply-add would make the sums
    // depend on ingredient order.
    #[allow(clippy::suboptimal_flops)]
    fn add(&mut self, lab: Lab, weight: f64) {
        self.l += lab.l * weight;
        self.a += lab.a * weight;
        self.b += lab.b * weight;
        self.total += weight;
        self.count += 1;
    }

    fn centroid(&self) -> Option<Lab> {
        (self.total > 0.0).then(|| {
            Lab::new(
                self.l / self.total,
                self.a / self.total,
                self.b / self.total,
            )
        })
    }
}

/// Weighted centroid of the ingredients in L*a*b*.
///
/// Returns `None` when no ingredient contributes (empty input, all weights
/// zero or negative, or no parseable color).
#[must_use]
pub fn centroid(ingredients: &[WeightedIngredient]) -> Option<Lab> {
    let mut acc = LabAccumulator::default();

    for (index, ingredient) in ingredients.iter().enumerate() {
        let weight = ingredient.weight;
        if weight.is_nan() || weight <= 0.0 {
            trace!(index, weight, "skipping ingredient without positive weight");
            continue;
        }
        match hex_to_lab(&ingredient.color) {
            Ok(lab) => acc.add(lab, weight),
            Err(err) => trace!(index, %err, "skipping ingredient with unusable color"),
        }
    }

    let centroid = acc.centroid();
    debug!(
        ingredients = ingredients.len(),
        contributing = acc.count,
        total_weight = acc.total,
        "accumulated mix"
    );
    centroid
}

/// Mix the ingredients into a single `#rrggbb` display color.
///
/// The result does not depend on the order of `ingredients`. When nothing
/// contributes, the result is `#ffffff`.
#[must_use]
pub fn mix(ingredients: &[WeightedIngredient]) -> String {
    centroid(ingredients).map_or_else(|| WHITE_HEX.to_owned(), lab_to_hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mezcla_color::hex_to_rgb;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn within_one(actual: &str, expected: &str) -> bool {
        let (ar, ag, ab) = hex_to_rgb(actual).unwrap().to_rgb8();
        let (er, eg, eb) = hex_to_rgb(expected).unwrap().to_rgb8();
        ar.abs_diff(er) <= 1 && ag.abs_diff(eg) <= 1 && ab.abs_diff(eb) <= 1
    }

    fn arb_hex() -> impl Strategy<Value = String> {
        (0u32..=0x00ff_ffff).prop_map(|v| format!("#{v:06x}"))
    }

    fn arb_ingredient() -> impl Strategy<Value = WeightedIngredient> {
        (arb_hex(), 0.0f64..1.0e4)
            .prop_map(|(color, weight)| WeightedIngredient::new(color, weight))
    }

    // ── Fallbacks ────────────────────────────────────────────────────────

    #[test]
    fn empty_mix_is_white() {
        assert_eq!(mix(&[]), "#ffffff");
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn all_zero_weights_are_white() {
        let ingredients = [
            WeightedIngredient::new("#000000", 0.0),
            WeightedIngredient::new("#8b0000", 0.0),
        ];
        assert_eq!(mix(&ingredients), "#ffffff");
    }

    #[test]
    fn unparseable_colors_are_white() {
        let ingredients = [
            WeightedIngredient::new("black", 10.0),
            WeightedIngredient::new("", 5.0),
        ];
        assert_eq!(mix(&ingredients), "#ffffff");
    }

    #[test]
    fn negative_and_nan_weights_are_skipped() {
        let ingredients = [
            WeightedIngredient::new("#000f89", 100.0),
            WeightedIngredient::new("#ffffff", -50.0),
            WeightedIngredient::new("#ffffff", f64::NAN),
        ];
        assert_eq!(mix(&ingredients), "#000f89");
    }

    #[test]
    fn bad_color_does_not_spoil_the_rest() {
        let ingredients = [
            WeightedIngredient::new("#d4a017", 3.0),
            WeightedIngredient::new("#zzzzzz", 1000.0),
        ];
        assert_eq!(mix(&ingredients), "#d4a017");
    }

    // ── Mixing ───────────────────────────────────────────────────────────

    #[test]
    fn white_with_a_little_black_follows_lab_lightness() {
        let ingredients = [
            WeightedIngredient::new("#ffffff", 950.0),
            WeightedIngredient::new("#000000", 50.0),
        ];
        let result = mix(&ingredients);
        // A naive RGB average would give #f2f2f2.
        assert_ne!(result, "#f2f2f2");
        assert_eq!(result, "#f1f1f1");
    }

    #[test]
    fn equal_parts_average_lab_coordinates() {
        let ingredients = [
            WeightedIngredient::new("#ff0000", 1.0),
            WeightedIngredient::new("#ffffff", 1.0),
        ];
        let lab = centroid(&ingredients).unwrap();
        let red = hex_to_lab("#ff0000").unwrap();
        let white = hex_to_lab("#ffffff").unwrap();
        assert!((lab.l - (red.l + white.l) / 2.0).abs() < 1e-9);
        assert!((lab.a - (red.a + white.a) / 2.0).abs() < 1e-9);
        assert!((lab.b - (red.b + white.b) / 2.0).abs() < 1e-9);
        assert_eq!(mix(&ingredients), "#ff9e81");
    }

    #[test]
    fn uppercase_and_unprefixed_colors_mix() {
        let ingredients = [WeightedIngredient::new("E0115F", 2.0)];
        assert_eq!(mix(&ingredients), "#e0115f");
    }

    proptest! {
        #[test]
        fn single_ingredient_mixes_to_itself(color in arb_hex(), weight in 0.001f64..1.0e6) {
            let result = mix(&[WeightedIngredient::new(color.clone(), weight)]);
            prop_assert!(within_one(&result, &color), "{} -> {}", color, result);
        }

        #[test]
        fn zero_weight_ingredient_changes_nothing(
            c1 in arb_hex(),
            c2 in arb_hex(),
            weight in 0.001f64..1.0e6,
        ) {
            let alone = mix(&[WeightedIngredient::new(c1.clone(), weight)]);
            let with_zero = mix(&[
                WeightedIngredient::new(c1, weight),
                WeightedIngredient::new(c2, 0.0),
            ]);
            prop_assert_eq!(alone, with_zero);
        }

        #[test]
        fn swapping_two_ingredients_is_exact(
            c1 in arb_hex(),
            c2 in arb_hex(),
            w1 in 0.0f64..1.0e4,
            w2 in 0.0f64..1.0e4,
        ) {
            let forward = mix(&[
                WeightedIngredient::new(c1.clone(), w1),
                WeightedIngredient::new(c2.clone(), w2),
            ]);
            let backward = mix(&[
                WeightedIngredient::new(c2, w2),
                WeightedIngredient::new(c1, w1),
            ]);
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn mixing_is_order_independent(
            pair in proptest::collection::vec(arb_ingredient(), 3..=6)
                .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle())),
        ) {
            let (ingredients, shuffled) = pair;
            prop_assert_eq!(mix(&ingredients), mix(&shuffled));
        }
    }
}
