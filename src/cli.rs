use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the recipe JSON file
    #[arg(short, long)]
    pub recipe_file: String,

    /// Desired serving count; ingredient quantities are rescaled to it
    #[arg(short, long)]
    pub servings: Option<String>,

    /// CSV reference table to use instead of the built-in one
    #[arg(long)]
    pub reference_csv: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
