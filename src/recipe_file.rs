use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::ingredient_line::{AutoFillOutcome, IngredientLine};
use crate::nutritional_matcher::ReferenceTable;
use crate::recipe_aggregator::{calculate_nutritional_profile, RecipeNutritionalProfile};
use crate::recipe_editor::{EditorError, RecipeEditor, SaveSummary};
use crate::validation::validate_line;

fn default_servings() -> f64 {
    1.0
}

/// Recipe as read from a JSON file. Ingredient nutrition fields are
/// optional; present non-zero calorie values count as manual entries.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipeFile {
    #[serde(alias = "recipe_title")]
    pub title: String,
    #[serde(default = "default_servings")]
    pub servings: f64,
    pub ingredients: Vec<IngredientLine>,
}

/// An ingredient row the validation gate turned away.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RejectedIngredient {
    pub row: usize,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LineReport {
    pub line: IngredientLine,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_carbohydrates: f64,
    pub nutrition_source: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipeReport {
    pub summary: SaveSummary,
    pub lines: Vec<LineReport>,
    pub rejected: Vec<RejectedIngredient>,
    pub profile: RecipeNutritionalProfile,
}

pub fn parse_recipe_json(content: &str) -> Result<RecipeFile> {
    serde_json::from_str(content).with_context(|| "Failed to parse recipe JSON")
}

/// Opens an editing session for a recipe file. An invalid serving count
/// rejects the whole file. Rows failing validation are reported and left
/// out; the rest are added and offered to auto-fill.
pub fn load_into_editor(
    recipe: RecipeFile,
    table: Arc<ReferenceTable>,
) -> Result<(RecipeEditor, Vec<RejectedIngredient>), EditorError> {
    let mut editor = RecipeEditor::open(recipe.title, recipe.servings, Vec::new(), table)?;
    let mut rejected = Vec::new();

    for (row, line) in recipe.ingredients.into_iter().enumerate() {
        if let Err(e) = validate_line(&line) {
            warn!("Rejecting ingredient row {} ('{}'): {}", row + 1, line.name, e);
            rejected.push(RejectedIngredient {
                row: row + 1,
                name: line.name,
                message: e.to_string(),
            });
            continue;
        }
        let name = line.name.clone();
        if editor.add_line(line) == AutoFillOutcome::NotFound {
            warn!("No reference data for '{}'; nutrition left for manual entry", name);
        }
    }
    Ok((editor, rejected))
}

pub fn build_report(
    editor: &RecipeEditor,
    summary: SaveSummary,
    rejected: Vec<RejectedIngredient>,
) -> RecipeReport {
    let table = editor.resolver().table();
    let lines = editor
        .lines()
        .iter()
        .map(|line| LineReport {
            line: line.clone(),
            total_calories: line.total_calories(),
            total_protein: line.total_protein(),
            total_fat: line.total_fat(),
            total_carbohydrates: line.total_carbohydrates(),
            nutrition_source: table.lookup_entry(&line.name).map(|(key, _)| key.to_string()),
        })
        .collect();

    RecipeReport {
        summary,
        lines,
        rejected,
        profile: calculate_nutritional_profile(editor.lines()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_editor::InMemoryStore;
    use crate::validation::ValidationError;

    const RECIPE: &str = r#"{
        "title": "Buttered chicken",
        "servings": 2,
        "ingredients": [
            {"name": "chicken breast", "quantity": 200, "unit": "g"},
            {"name": "butter", "quantity": 1, "unit": "tbsp", "unit_calories": 100},
            {"name": "", "quantity": 1, "unit": "g"},
            {"name": "salt", "quantity": 1, "unit": "pinch!"}
        ]
    }"#;

    #[test]
    fn test_parse_recipe_json_defaults_servings() -> Result<()> {
        let recipe = parse_recipe_json(r#"{"title": "Toast", "ingredients": []}"#)?;
        assert_eq!(recipe.servings, 1.0);
        assert!(parse_recipe_json("not json").is_err());
        Ok(())
    }

    #[test]
    fn test_load_into_editor_rejects_invalid_rows() -> Result<()> {
        let recipe = parse_recipe_json(RECIPE)?;
        let (editor, rejected) = load_into_editor(recipe, Arc::new(ReferenceTable::builtin()))?;

        assert_eq!(editor.servings(), 2.0);
        assert_eq!(editor.lines().len(), 2);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].row, 3);
        assert_eq!(rejected[0].message, "Ingredient name is required");
        assert_eq!(rejected[1].name, "salt");
        Ok(())
    }

    #[test]
    fn test_manual_values_from_file_are_kept() -> Result<()> {
        let recipe = parse_recipe_json(RECIPE)?;
        let (editor, _) = load_into_editor(recipe, Arc::new(ReferenceTable::builtin()))?;
        assert_eq!(editor.lines()[1].unit_calories, 100.0);
        assert!((editor.totals().calories - 430.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_load_into_editor_rejects_degenerate_servings() -> Result<()> {
        for servings in ["0", "-1.5"] {
            let recipe = parse_recipe_json(&format!(
                r#"{{"title": "Rice", "servings": {}, "ingredients": [
                    {{"name": "rice", "quantity": 100, "unit": "g"}}
                ]}}"#,
                servings
            ))?;
            let err = load_into_editor(recipe, Arc::new(ReferenceTable::builtin())).unwrap_err();
            assert_eq!(err, EditorError::Validation(ValidationError::ServingsNotPositive));
        }

        let recipe = parse_recipe_json(
            r#"{"title": "Rice", "ingredients": [{"name": "rice", "quantity": 100, "unit": "g"}]}"#,
        )?;
        let (editor, _) = load_into_editor(recipe, Arc::new(ReferenceTable::builtin()))?;
        assert_eq!(editor.servings(), 1.0);
        Ok(())
    }

    #[test]
    fn test_rescaled_recipe_survives_save_and_reload() -> Result<()> {
        let table = Arc::new(ReferenceTable::builtin());
        let recipe = parse_recipe_json(
            r#"{"title": "Rice", "servings": 3, "ingredients": [{"name": "rice", "quantity": 100, "unit": "g"}]}"#,
        )?;
        let (mut editor, _) = load_into_editor(recipe, table.clone())?;
        editor.change_servings("2")?;
        let mut store = InMemoryStore::default();
        editor.save(&mut store)?;

        let header = store.header.clone().unwrap();
        let saved = serde_json::to_string(&RecipeFile {
            title: header.title,
            servings: header.servings,
            ingredients: store.ingredients.clone(),
        })?;
        let (reloaded, rejected) = load_into_editor(parse_recipe_json(&saved)?, table)?;

        assert!(rejected.is_empty(), "{:?}", rejected);
        assert_eq!(reloaded.servings(), 2.0);
        assert_eq!(reloaded.lines().len(), 1);
        let line = &reloaded.lines()[0];
        assert!((line.quantity - 200.0 / 3.0).abs() < 1e-9);
        assert!((line.unit_calories - 1.3).abs() < 1e-9);
        assert!((reloaded.totals().calories - editor.totals().calories).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_build_report() -> Result<()> {
        let recipe = parse_recipe_json(RECIPE)?;
        let (editor, rejected) = load_into_editor(recipe, Arc::new(ReferenceTable::builtin()))?;
        let summary = editor.save(&mut InMemoryStore::default())?;
        let report = build_report(&editor, summary, rejected);

        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.lines[0].nutrition_source.as_deref(), Some("chicken breast"));
        assert_eq!(report.summary.header.totals.calories, 430);
        assert_eq!(report.profile.total_mass_g, Some(215.0));
        assert_eq!(report.rejected.len(), 2);
        Ok(())
    }
}
