use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nutrition_resolver::{NutritionResolver, ResolvedNutrition};
use crate::recipe_aggregator::NutritionTotals;

/// The four nutrition fields tracked on every ingredient line.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Macro {
    Calories,
    Protein,
    Fat,
    Carbohydrates,
}

impl Macro {
    pub const ALL: [Macro; 4] = [Macro::Calories, Macro::Protein, Macro::Fat, Macro::Carbohydrates];
}

/// What happened when a line was offered to the auto-fill step.
#[derive(Debug, Clone, PartialEq)]
pub enum AutoFillOutcome {
    /// Per-unit values were populated from the matched reference entry.
    Filled { source_name: String },
    /// The line already carries a manual calorie value and was left alone.
    KeptManual,
    /// Nothing could be resolved; existing values are unchanged.
    NotFound,
}

/// One ingredient row of a recipe.
///
/// Nutrition is stored per unit of `quantity` (not per 100g, not per
/// serving). Totals are always derived as `unit value * quantity` and never
/// stored, so the two views cannot drift apart.
///
/// A `unit_calories` of exactly zero means "no value yet" and makes the line
/// eligible for auto-fill; this also covers genuinely zero-calorie
/// ingredients such as salt or water.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub unit_calories: f64,
    #[serde(default)]
    pub unit_protein: f64,
    #[serde(default)]
    pub unit_fat: f64,
    #[serde(default)]
    pub unit_carbohydrates: f64,
}

macro_rules! total_accessors {
    ($($getter:ident, $setter:ident => $macro_kind:expr;)*) => {
        $(
            pub fn $getter(&self) -> f64 {
                self.total($macro_kind)
            }

            pub fn $setter(&mut self, total: f64) {
                self.set_total($macro_kind, total);
            }
        )*
    };
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            description: None,
            unit_calories: 0.0,
            unit_protein: 0.0,
            unit_fat: 0.0,
            unit_carbohydrates: 0.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn unit_value(&self, kind: Macro) -> f64 {
        match kind {
            Macro::Calories => self.unit_calories,
            Macro::Protein => self.unit_protein,
            Macro::Fat => self.unit_fat,
            Macro::Carbohydrates => self.unit_carbohydrates,
        }
    }

    pub fn set_unit_value(&mut self, kind: Macro, value: f64) {
        let field = match kind {
            Macro::Calories => &mut self.unit_calories,
            Macro::Protein => &mut self.unit_protein,
            Macro::Fat => &mut self.unit_fat,
            Macro::Carbohydrates => &mut self.unit_carbohydrates,
        };
        *field = value;
    }

    pub fn total(&self, kind: Macro) -> f64 {
        self.unit_value(kind) * self.quantity
    }

    /// Back-solves the per-unit value from a line total.
    ///
    /// With a non-positive quantity the total is stored as the per-unit value
    /// unchanged, which avoids the division but conflates the two meanings
    /// for that line.
    pub fn set_total(&mut self, kind: Macro, total: f64) {
        let per_unit = if self.quantity > 0.0 {
            total / self.quantity
        } else {
            total
        };
        self.set_unit_value(kind, per_unit);
    }

    total_accessors! {
        total_calories, set_total_calories => Macro::Calories;
        total_protein, set_total_protein => Macro::Protein;
        total_fat, set_total_fat => Macro::Fat;
        total_carbohydrates, set_total_carbohydrates => Macro::Carbohydrates;
    }

    pub fn totals(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.total_calories(),
            protein: self.total_protein(),
            fat: self.total_fat(),
            carbs: self.total_carbohydrates(),
        }
    }

    pub fn accepts_auto_fill(&self) -> bool {
        self.unit_calories == 0.0
    }

    /// Stores a quantity-scaled resolution as per-unit values.
    pub fn apply_resolved(&mut self, resolved: &ResolvedNutrition) {
        if !(self.quantity > 0.0) {
            return;
        }
        let n = &resolved.nutrition;
        self.unit_calories = f64::from(n.calories) / self.quantity;
        self.unit_protein = n.protein / self.quantity;
        self.unit_fat = n.fat / self.quantity;
        self.unit_carbohydrates = n.carbs / self.quantity;
    }

    /// Populates per-unit nutrition from the reference table unless a manual
    /// calorie value is present.
    pub fn auto_fill(&mut self, resolver: &NutritionResolver) -> AutoFillOutcome {
        if !self.accepts_auto_fill() {
            debug!("'{}' keeps its manual nutrition values", self.name);
            return AutoFillOutcome::KeptManual;
        }
        match resolver.resolve(&self.name, self.quantity, &self.unit) {
            Some(resolved) => {
                self.apply_resolved(&resolved);
                debug!(
                    "Auto-filled '{}' from '{}': {:.3} kcal per {}",
                    self.name, resolved.source_name, self.unit_calories, self.unit
                );
                AutoFillOutcome::Filled {
                    source_name: resolved.source_name,
                }
            }
            None => AutoFillOutcome::NotFound,
        }
    }

    /// Applies an edit of the identifying fields, then offers the line to
    /// auto-fill.
    pub fn update_identity(
        &mut self,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        resolver: &NutritionResolver,
    ) -> AutoFillOutcome {
        self.name = name.into();
        self.quantity = quantity;
        self.unit = unit.into();
        self.auto_fill(resolver)
    }

    /// Copy of this line with the quantity multiplied; per-unit values are
    /// scale-invariant and carried over as they are.
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            quantity: self.quantity * multiplier,
            ..self.clone()
        }
    }
}
