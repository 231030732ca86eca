use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::ingredient_line::{AutoFillOutcome, IngredientLine, Macro};
use crate::nutrition_resolver::NutritionResolver;
use crate::nutritional_matcher::ReferenceTable;
use crate::recipe_aggregator::{
    aggregate_totals, auto_filled_count, rescale, NutritionTotals, RecipeHeaderTotals,
};
use crate::validation::{
    parse_serving_multiplier, validate_ingredient, validate_servings, ValidationError,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No ingredient at row {index} (recipe has {len})")]
    NoSuchLine { index: usize, len: usize },
}

/// Recipe-level values the persistence layer stores next to the title.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeHeader {
    pub title: String,
    pub servings: f64,
    pub totals: RecipeHeaderTotals,
}

/// Persistence collaborator. Values are stored verbatim.
pub trait RecipeStore {
    fn persist_ingredients(&mut self, recipe_title: &str, lines: &[IngredientLine]) -> Result<()>;
    fn persist_header(&mut self, header: &RecipeHeader) -> Result<()>;
}

/// Keeps the last saved recipe in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    pub ingredients: Vec<IngredientLine>,
    pub header: Option<RecipeHeader>,
}

impl RecipeStore for InMemoryStore {
    fn persist_ingredients(&mut self, _recipe_title: &str, lines: &[IngredientLine]) -> Result<()> {
        self.ingredients = lines.to_vec();
        Ok(())
    }

    fn persist_header(&mut self, header: &RecipeHeader) -> Result<()> {
        self.header = Some(header.clone());
        Ok(())
    }
}

/// What a save reports back to the user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SaveSummary {
    pub header: RecipeHeader,
    pub ingredient_count: usize,
    /// Lines whose name has reference data, regardless of whether the
    /// values on the line are the auto-filled ones.
    pub auto_filled_count: usize,
}

/// One editing session over a recipe's ingredient list.
///
/// Every change to a line's name, quantity or unit goes through auto-fill;
/// manual nutrition edits are stored as given. The list is private to the
/// session until `save` hands it to a [`RecipeStore`].
#[derive(Debug, Clone)]
pub struct RecipeEditor {
    resolver: NutritionResolver,
    title: String,
    servings: f64,
    lines: Vec<IngredientLine>,
}

impl RecipeEditor {
    pub fn new(title: impl Into<String>, table: Arc<ReferenceTable>) -> Self {
        Self {
            resolver: NutritionResolver::new(table),
            title: title.into(),
            servings: 1.0,
            lines: Vec::new(),
        }
    }

    /// Opens an existing recipe. Loaded lines keep their stored values and
    /// are not auto-filled until edited. The stored serving count becomes the
    /// base for later rescaling, so it must be finite and positive.
    pub fn open(
        title: impl Into<String>,
        servings: f64,
        lines: Vec<IngredientLine>,
        table: Arc<ReferenceTable>,
    ) -> Result<Self, EditorError> {
        Ok(Self {
            resolver: NutritionResolver::new(table),
            title: title.into(),
            servings: validate_servings(servings)?,
            lines,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn servings(&self) -> f64 {
        self.servings
    }

    pub fn lines(&self) -> &[IngredientLine] {
        &self.lines
    }

    pub fn resolver(&self) -> &NutritionResolver {
        &self.resolver
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut IngredientLine, EditorError> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(EditorError::NoSuchLine { index, len })
    }

    /// Validates raw row input, appends the line and auto-fills it.
    pub fn add_ingredient(
        &mut self,
        name: &str,
        quantity: &str,
        unit: &str,
    ) -> Result<(usize, AutoFillOutcome), EditorError> {
        let mut line = validate_ingredient(name, quantity, unit)?.into_line();
        let outcome = line.auto_fill(&self.resolver);
        self.lines.push(line);
        Ok((self.lines.len() - 1, outcome))
    }

    /// Appends an already-validated line, e.g. one read from a file that
    /// may carry manual nutrition values, and offers it to auto-fill.
    pub fn add_line(&mut self, mut line: IngredientLine) -> AutoFillOutcome {
        let outcome = line.auto_fill(&self.resolver);
        self.lines.push(line);
        outcome
    }

    pub fn edit_ingredient(
        &mut self,
        index: usize,
        name: &str,
        quantity: &str,
        unit: &str,
    ) -> Result<AutoFillOutcome, EditorError> {
        let validated = validate_ingredient(name, quantity, unit)?;
        let resolver = self.resolver.clone();
        let line = self.line_mut(index)?;
        Ok(line.update_identity(validated.name, validated.quantity, validated.unit, &resolver))
    }

    pub fn set_description(
        &mut self,
        index: usize,
        description: Option<String>,
    ) -> Result<(), EditorError> {
        self.line_mut(index)?.description = description;
        Ok(())
    }

    /// Manual per-unit override. A non-zero calorie value opts the line out
    /// of auto-fill; setting it back to zero opts it in again.
    pub fn set_unit_nutrition(
        &mut self,
        index: usize,
        kind: Macro,
        value: f64,
    ) -> Result<(), EditorError> {
        self.line_mut(index)?.set_unit_value(kind, value);
        Ok(())
    }

    /// Manual override entered as a line total; the per-unit value is
    /// back-solved from the current quantity.
    pub fn set_total_nutrition(
        &mut self,
        index: usize,
        kind: Macro,
        total: f64,
    ) -> Result<(), EditorError> {
        self.line_mut(index)?.set_total(kind, total);
        Ok(())
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Result<IngredientLine, EditorError> {
        let len = self.lines.len();
        if index >= len {
            return Err(EditorError::NoSuchLine { index, len });
        }
        Ok(self.lines.remove(index))
    }

    /// Changes the serving count, rescaling every line by the ratio of the
    /// new count to the current one. Returns the multiplier applied.
    pub fn change_servings(&mut self, raw: &str) -> Result<f64, EditorError> {
        let servings = parse_serving_multiplier(raw)?;
        let multiplier = servings / self.servings;
        self.lines = rescale(&self.lines, multiplier);
        debug!(
            "Servings {} -> {} (x{}) for '{}'",
            self.servings, servings, multiplier, self.title
        );
        self.servings = servings;
        Ok(multiplier)
    }

    pub fn totals(&self) -> NutritionTotals {
        aggregate_totals(&self.lines)
    }

    pub fn save(&self, store: &mut impl RecipeStore) -> Result<SaveSummary> {
        let header = RecipeHeader {
            title: self.title.clone(),
            servings: self.servings,
            totals: RecipeHeaderTotals::from(self.totals()),
        };
        store.persist_ingredients(&self.title, &self.lines)?;
        store.persist_header(&header)?;

        let summary = SaveSummary {
            header,
            ingredient_count: self.lines.len(),
            auto_filled_count: auto_filled_count(&self.lines, self.resolver.table()),
        };
        info!(
            "Saved '{}': {} ingredients, {} with reference data, {} kcal",
            summary.header.title,
            summary.ingredient_count,
            summary.auto_filled_count,
            summary.header.totals.calories
        );
        Ok(summary)
    }
}
