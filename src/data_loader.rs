use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{info, warn};

use crate::nutritional_matcher::{NutritionProfile, ReferenceTable};

// Expected column headers
pub const NAME_COL: &str = "Name";
pub const KCAL_COL: &str = "kcal/100g";
pub const PROTEIN_COL: &str = "Protein (g/100g)";
pub const FAT_COL: &str = "Fat (g/100g)";
pub const CARB_COL: &str = "Carbohydrate (g/100g)";

fn parse_optional_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| anyhow!("Column '{}' not found", column))
}

/// Loads a reference table from CSV. Row order becomes lookup priority.
///
/// Rows with an empty name are skipped silently; rows whose kcal cell is
/// missing or invalid are skipped with a warning. Blank or invalid macro
/// cells read as zero.
pub fn load_reference_table(csv_path: &Path) -> Result<ReferenceTable> {
    if !csv_path.exists() {
        return Err(anyhow!("Reference CSV file not found at: {:?}", csv_path));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open reference CSV file at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let name_idx = column_index(&headers, NAME_COL)?;
    let kcal_idx = column_index(&headers, KCAL_COL)?;
    let protein_idx = column_index(&headers, PROTEIN_COL)?;
    let fat_idx = column_index(&headers, FAT_COL)?;
    let carb_idx = column_index(&headers, CARB_COL)?;

    let mut table = ReferenceTable::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let name = record.get(name_idx).unwrap_or_default().trim();
        if name.is_empty() {
            continue;
        }

        let Some(kcal) = record.get(kcal_idx).and_then(parse_optional_f64) else {
            warn!("Skipping reference row {} ('{}'): missing or invalid kcal", row_index + 1, name);
            continue;
        };
        let macro_value = |idx: usize| record.get(idx).and_then(parse_optional_f64).unwrap_or(0.0);

        let profile = NutritionProfile {
            calories: kcal.round() as u32,
            protein: macro_value(protein_idx),
            fat: macro_value(fat_idx),
            carbs: macro_value(carb_idx),
        };
        table.insert(name, profile);
    }

    if table.is_empty() {
        return Err(anyhow!("No valid reference data loaded from {:?}", csv_path));
    }

    info!("Loaded {} reference entries from {:?}", table.len(), csv_path);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn header_line() -> String {
        format!("{},{},{},{},{}", NAME_COL, KCAL_COL, PROTEIN_COL, FAT_COL, CARB_COL)
    }

    fn create_test_csv_file() -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", header_line())?;
        writeln!(file, "Apple,52,0.3,0.2,13.8")?;
        writeln!(file, "Banana,,1.1,0.3,22.8")?; // Missing kcal
        writeln!(file, "Carrot,41,0.9,,9.6")?; // Missing fat
        writeln!(file, ",10,10,10,10")?; // Empty name
        writeln!(file, "InvalidNutrient,text,1,1,1")?; // Invalid kcal
        writeln!(file, "  Green Apple ,55.5,0.4,0.2,14")?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_load_reference_table_success() -> Result<()> {
        let file = create_test_csv_file()?;
        let table = load_reference_table(file.path())?;

        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["apple", "carrot", "green apple"]);

        assert_eq!(table.lookup("apple"), Some(&NutritionProfile::new(52, 0.3, 0.2, 13.8)));
        assert_eq!(table.lookup("carrot").unwrap().fat, 0.0);
        assert_eq!(table.lookup("green apple").unwrap().calories, 56);
        assert!(table.lookup("banana").is_none());
        Ok(())
    }

    #[test]
    fn test_row_order_is_lookup_priority() -> Result<()> {
        let file = create_test_csv_file()?;
        let table = load_reference_table(file.path())?;
        // Both "apple" and "green apple" are contained in the query; the earlier row wins.
        let (key, _) = table.lookup_entry("sliced green apple").unwrap();
        assert_eq!(key, "apple");
        Ok(())
    }

    #[test]
    fn test_load_reference_table_missing_column() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{},{},{},{}", NAME_COL, PROTEIN_COL, FAT_COL, CARB_COL)?;
        writeln!(file, "Apple,0.3,0.2,13.8")?;
        file.flush()?;

        let result = load_reference_table(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains(&format!("Column '{}' not found", KCAL_COL)));
        Ok(())
    }

    #[test]
    fn test_load_reference_table_empty_file_with_headers() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", header_line())?;
        file.flush()?;

        let result = load_reference_table(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("No valid reference data loaded"));
        Ok(())
    }

    #[test]
    fn test_load_reference_table_file_not_found() {
        let path = Path::new("this_file_does_not_exist.csv");
        let result = load_reference_table(path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Reference CSV file not found"));
    }
}
