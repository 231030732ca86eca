use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::nutritional_matcher::{NutritionProfile, ReferenceTable};
use crate::unit_converter::to_grams;

/// Nutrition computed for the whole quantity of an ingredient line.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedNutrition {
    /// Reference key the ingredient name matched.
    pub source_name: String,
    pub grams: f64,
    pub nutrition: NutritionProfile,
}

/// Maps (name, quantity, unit) onto reference data scaled to that quantity.
#[derive(Debug, Clone)]
pub struct NutritionResolver {
    table: Arc<ReferenceTable>,
}

impl NutritionResolver {
    pub fn new(table: Arc<ReferenceTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn has_nutrition_data(&self, name: &str) -> bool {
        self.table.has_nutrition_data(name)
    }

    /// Returns `None` for a blank name, a non-positive quantity, a name with
    /// no reference match, or a quantity that does not convert to a positive
    /// mass. None of these are errors.
    ///
    /// Calories are rounded to the nearest integer; macros stay unrounded.
    pub fn resolve(&self, name: &str, quantity: f64, unit: &str) -> Option<ResolvedNutrition> {
        if name.trim().is_empty() || !(quantity > 0.0) {
            return None;
        }
        let (source_name, reference) = self.table.lookup_entry(name)?;

        let grams = to_grams(quantity, unit);
        if !(grams > 0.0) {
            debug!("'{}': {} {} does not convert to a positive mass", name, quantity, unit);
            return None;
        }

        let multiplier = grams / 100.0;
        let nutrition = NutritionProfile {
            calories: (f64::from(reference.calories) * multiplier).round() as u32,
            protein: reference.protein * multiplier,
            fat: reference.fat * multiplier,
            carbs: reference.carbs * multiplier,
        };
        debug!(
            "Resolved '{}' via '{}': {}g -> {} kcal",
            name, source_name, grams, nutrition.calories
        );
        Some(ResolvedNutrition {
            source_name: source_name.to_string(),
            grams,
            nutrition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> NutritionResolver {
        NutritionResolver::new(Arc::new(ReferenceTable::builtin()))
    }

    #[test]
    fn test_chicken_breast_200g() {
        let resolved = resolver().resolve("chicken breast", 200.0, "g").unwrap();
        assert_eq!(resolved.source_name, "chicken breast");
        assert_eq!(resolved.grams, 200.0);
        assert_eq!(resolved.nutrition.calories, 330);
        assert!((resolved.nutrition.protein - 62.0).abs() < 1e-9);
        assert!((resolved.nutrition.fat - 7.2).abs() < 1e-9);
        assert_eq!(resolved.nutrition.carbs, 0.0);
    }

    #[test]
    fn test_butter_tablespoon_rounds_calories() {
        let resolved = resolver().resolve("butter", 1.0, "tbsp").unwrap();
        assert_eq!(resolved.grams, 15.0);
        // 717 * 0.15 = 107.55
        assert_eq!(resolved.nutrition.calories, 108);
    }

    #[test]
    fn test_macros_are_linear_in_quantity() {
        let r = resolver();
        let single = r.resolve("salmon", 130.0, "g").unwrap().nutrition;
        let double = r.resolve("salmon", 260.0, "g").unwrap().nutrition;
        assert!((double.protein - 2.0 * single.protein).abs() < 1e-9);
        assert!((double.fat - 2.0 * single.fat).abs() < 1e-9);
        assert!((double.carbs - 2.0 * single.carbs).abs() < 1e-9);
    }

    #[test]
    fn test_unresolvable_inputs_return_none() {
        let r = resolver();
        assert!(r.resolve("xylophone", 100.0, "g").is_none());
        assert!(r.resolve("", 100.0, "g").is_none());
        assert!(r.resolve("rice", 0.0, "g").is_none());
        assert!(r.resolve("rice", -5.0, "cup").is_none());
        assert!(r.resolve("rice", f64::NAN, "g").is_none());
    }

    #[test]
    fn test_unknown_unit_is_treated_as_grams() {
        let resolved = resolver().resolve("rice", 100.0, "handful").unwrap();
        assert_eq!(resolved.grams, 100.0);
        assert_eq!(resolved.nutrition.calories, 130);
    }
}
