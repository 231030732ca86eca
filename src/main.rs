use anyhow::{Context, Result};
use recipe_nutrition::cli::parse_args;
use recipe_nutrition::config::EngineConfig;
use recipe_nutrition::recipe_editor::InMemoryStore;
use recipe_nutrition::recipe_file::{build_report, load_into_editor, parse_recipe_json, RecipeReport};
use tokio::fs;
use tracing::info;

fn print_report(report: &RecipeReport) {
    let header = &report.summary.header;
    println!("\n{} ({} servings)", header.title, header.servings);
    println!(
        "{:<30} {:>10} {:<8} {:>9} {:>9} {:>9} {:>9}",
        "Ingredient", "Qty", "Unit", "kcal", "Protein", "Fat", "Carbs"
    );
    for line_report in &report.lines {
        let line = &line_report.line;
        println!(
            "{:<30} {:>10.2} {:<8} {:>9.1} {:>9.1} {:>9.1} {:>9.1}",
            line.name,
            line.quantity,
            line.unit,
            line_report.total_calories,
            line_report.total_protein,
            line_report.total_fat,
            line_report.total_carbohydrates
        );
    }
    println!(
        "{:<50} {:>9} {:>9.1} {:>9.1} {:>9.1}",
        "Total", header.totals.calories, header.totals.protein, header.totals.fat, header.totals.carbs
    );
    if let Some(per_100g) = &report.profile.per_100g {
        println!(
            "{:<50} {:>9.1} {:>9.1} {:>9.1} {:>9.1}",
            "Per 100g", per_100g.calories, per_100g.protein, per_100g.fat, per_100g.carbs
        );
    }
    println!(
        "\n{} of {} ingredients have reference nutrition data.",
        report.summary.auto_filled_count, report.summary.ingredient_count
    );
    for rejected in &report.rejected {
        eprintln!("Row {} ('{}') skipped: {}", rejected.row, rejected.name, rejected.message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = parse_args();
    let config = EngineConfig::from_env().with_reference_csv(cli_args.reference_csv.clone());
    let table = config.load_reference_table()?;

    info!("Reading recipe file: {}", cli_args.recipe_file);
    let recipe_content = fs::read_to_string(&cli_args.recipe_file)
        .await
        .with_context(|| format!("Failed to read recipe file '{}'", cli_args.recipe_file))?;
    let recipe = parse_recipe_json(&recipe_content)
        .with_context(|| format!("Invalid recipe file '{}'", cli_args.recipe_file))?;

    let (mut editor, rejected) = load_into_editor(recipe, table)
        .with_context(|| format!("Invalid recipe file '{}'", cli_args.recipe_file))?;

    if let Some(servings) = &cli_args.servings {
        let multiplier = editor
            .change_servings(servings)
            .with_context(|| format!("Cannot rescale to '{}' servings", servings))?;
        info!("Rescaled ingredients by x{}", multiplier);
    }

    let mut store = InMemoryStore::default();
    let summary = editor.save(&mut store)?;
    let report = build_report(&editor, summary, rejected);

    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}
