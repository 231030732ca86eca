use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::data_loader::load_reference_table;
use crate::nutritional_matcher::ReferenceTable;

// Environment variable naming an optional CSV reference table
pub const REFERENCE_CSV_ENV_VAR: &str = "RECIPE_NUTRITION_REFERENCE_CSV";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub reference_csv: Option<PathBuf>,
}

impl EngineConfig {
    /// Reads settings from the process environment. Call `dotenv` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Self {
        let reference_csv = env::var(REFERENCE_CSV_ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Self { reference_csv }
    }

    /// A path given explicitly (e.g. on the command line) wins over the
    /// environment.
    pub fn with_reference_csv(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.reference_csv = path;
        }
        self
    }

    pub fn load_reference_table(&self) -> Result<Arc<ReferenceTable>> {
        let table = match &self.reference_csv {
            Some(path) => {
                info!("Loading reference table from {:?}", path);
                load_reference_table(path)
                    .with_context(|| format!("Failed to load reference table from {:?}", path))?
            }
            None => ReferenceTable::builtin(),
        };
        Ok(Arc::new(table))
    }
}
