use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::ingredient_line::IngredientLine;
use crate::nutritional_matcher::ReferenceTable;
use crate::unit_converter::to_grams;

/// Absolute nutrition values, for one line or a whole recipe.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl NutritionTotals {
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbs: self.carbs * factor,
        }
    }
}

impl Add for NutritionTotals {
    type Output = NutritionTotals;

    fn add(self, other: NutritionTotals) -> NutritionTotals {
        NutritionTotals {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
        }
    }
}

impl AddAssign for NutritionTotals {
    fn add_assign(&mut self, other: NutritionTotals) {
        *self = *self + other;
    }
}

impl Sum for NutritionTotals {
    fn sum<I: Iterator<Item = NutritionTotals>>(iter: I) -> Self {
        iter.fold(NutritionTotals::default(), Add::add)
    }
}

/// Recipe totals in the shape the recipe header stores them: whole calories,
/// fractional macros.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct RecipeHeaderTotals {
    pub calories: i64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl From<NutritionTotals> for RecipeHeaderTotals {
    fn from(totals: NutritionTotals) -> Self {
        Self {
            calories: totals.calories.round() as i64,
            protein: totals.protein,
            fat: totals.fat,
            carbs: totals.carbs,
        }
    }
}

/// Aggregated totals alongside the same values normalized per 100g of dish.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RecipeNutritionalProfile {
    pub total_mass_g: Option<f64>,
    pub aggregated: NutritionTotals,
    pub per_100g: Option<NutritionTotals>,
}

/// Sums line totals. Lines without nutrition simply add zero.
pub fn aggregate_totals(lines: &[IngredientLine]) -> NutritionTotals {
    lines.iter().map(IngredientLine::totals).sum()
}

/// Returns copies of `lines` with every quantity multiplied by
/// `serving_multiplier`. The input is left untouched. The multiplier is
/// expected to be positive; parsing and rejection happen upstream.
pub fn rescale(lines: &[IngredientLine], serving_multiplier: f64) -> Vec<IngredientLine> {
    lines.iter().map(|line| line.scaled(serving_multiplier)).collect()
}

/// Number of lines whose name matches the reference table, whether the
/// values currently on the line came from auto-fill or from the user.
pub fn auto_filled_count(lines: &[IngredientLine], table: &ReferenceTable) -> usize {
    lines
        .iter()
        .filter(|line| table.has_nutrition_data(&line.name))
        .count()
}

pub fn calculate_nutritional_profile(lines: &[IngredientLine]) -> RecipeNutritionalProfile {
    let aggregated = aggregate_totals(lines);
    let total_mass_g: f64 = lines
        .iter()
        .map(|line| to_grams(line.quantity, &line.unit))
        .filter(|grams| *grams > 0.0)
        .sum();

    if total_mass_g > 0.0 {
        RecipeNutritionalProfile {
            total_mass_g: Some(total_mass_g),
            aggregated,
            per_100g: Some(aggregated.scale(100.0 / total_mass_g)),
        }
    } else {
        RecipeNutritionalProfile {
            total_mass_g: None,
            aggregated,
            per_100g: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: f64, unit: &str, per_unit: [f64; 4]) -> IngredientLine {
        let mut line = IngredientLine::new(name, quantity, unit);
        line.unit_calories = per_unit[0];
        line.unit_protein = per_unit[1];
        line.unit_fat = per_unit[2];
        line.unit_carbohydrates = per_unit[3];
        line
    }

    fn sample_lines() -> Vec<IngredientLine> {
        vec![
            line("rice", 200.0, "g", [1.3, 0.027, 0.003, 0.28]),
            line("egg", 2.0, "pieces", [77.5, 6.5, 5.5, 0.55]),
            line("mystery spice", 1.0, "tsp", [0.0, 0.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn test_aggregate_totals_sums_all_lines() {
        let totals = aggregate_totals(&sample_lines());
        assert!((totals.calories - (260.0 + 155.0)).abs() < 1e-9);
        assert!((totals.protein - (5.4 + 13.0)).abs() < 1e-9);
        assert!((totals.fat - (0.6 + 11.0)).abs() < 1e-9);
        assert!((totals.carbs - (56.0 + 1.1)).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_of_empty_list_is_zero() {
        assert_eq!(aggregate_totals(&[]), NutritionTotals::default());
    }

    #[test]
    fn test_rescale_identity() {
        let lines = sample_lines();
        assert_eq!(rescale(&lines, 1.0), lines);
    }

    #[test]
    fn test_rescale_triples_quantities_and_totals() {
        let lines = sample_lines();
        let tripled = rescale(&lines, 3.0);
        for (before, after) in lines.iter().zip(&tripled) {
            assert_eq!(after.quantity, before.quantity * 3.0);
            assert_eq!(after.unit_calories, before.unit_calories);
            assert!((after.total_calories() - 3.0 * before.total_calories()).abs() < 1e-9);
        }
        // Input untouched.
        assert_eq!(lines[0].quantity, 200.0);
    }

    #[test]
    fn test_header_totals_round_calories() {
        let header = RecipeHeaderTotals::from(NutritionTotals {
            calories: 414.6,
            protein: 18.4,
            fat: 11.6,
            carbs: 57.1,
        });
        assert_eq!(header.calories, 415);
        assert_eq!(header.protein, 18.4);
    }

    #[test]
    fn test_auto_filled_count_counts_reference_matches() {
        let table = ReferenceTable::builtin();
        assert_eq!(auto_filled_count(&sample_lines(), &table), 2);
    }

    #[test]
    fn test_nutritional_profile_per_100g() {
        let lines = vec![
            line("rice", 200.0, "g", [1.3, 0.0, 0.0, 0.0]),
            line("water", 0.2, "l", [0.0, 0.0, 0.0, 0.0]),
        ];
        let profile = calculate_nutritional_profile(&lines);
        assert_eq!(profile.total_mass_g, Some(400.0));
        let per_100g = profile.per_100g.unwrap();
        assert!((per_100g.calories - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_nutritional_profile_without_mass() {
        let profile = calculate_nutritional_profile(&[]);
        assert_eq!(profile.total_mass_g, None);
        assert_eq!(profile.per_100g, None);
    }
}
