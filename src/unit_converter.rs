use serde::{Deserialize, Serialize};
use tracing::debug;

/// Units the converter knows a gram equivalent for.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MassUnit {
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Milliliter,
    Liter,
    Cup,
    Tablespoon,
    Teaspoon,
    Piece,
    Slice,
    Spoon,
}

impl MassUnit {
    /// Parses a unit string (case-insensitive, surrounding whitespace ignored).
    pub fn parse(unit: &str) -> Option<Self> {
        let unit = match unit.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => MassUnit::Gram,
            "kg" | "kilogram" | "kilograms" => MassUnit::Kilogram,
            "oz" | "ounce" | "ounces" => MassUnit::Ounce,
            "lb" | "pound" | "pounds" => MassUnit::Pound,
            "ml" | "milliliter" | "milliliters" => MassUnit::Milliliter,
            "l" | "liter" | "liters" => MassUnit::Liter,
            "cup" | "cups" => MassUnit::Cup,
            "tbsp" | "tablespoon" | "tablespoons" => MassUnit::Tablespoon,
            "tsp" | "teaspoon" | "teaspoons" => MassUnit::Teaspoon,
            "piece" | "pieces" => MassUnit::Piece,
            "slice" | "slices" => MassUnit::Slice,
            "spoon" | "spoons" => MassUnit::Spoon,
            _ => return None,
        };
        Some(unit)
    }

    /// Grams in one of this unit. Volumes assume the density of water.
    pub fn grams_per_unit(self) -> f64 {
        match self {
            MassUnit::Gram => 1.0,
            MassUnit::Kilogram => 1000.0,
            MassUnit::Ounce => 28.35,
            MassUnit::Pound => 453.59,
            MassUnit::Milliliter => 1.0,
            MassUnit::Liter => 1000.0,
            MassUnit::Cup => 240.0,
            MassUnit::Tablespoon => 15.0,
            MassUnit::Teaspoon => 5.0,
            MassUnit::Piece => 50.0,
            MassUnit::Slice => 25.0,
            MassUnit::Spoon => 10.0,
        }
    }
}

/// Converts `quantity` expressed in `unit` to grams.
///
/// A blank unit means the quantity is already in grams. Unknown units are
/// treated as grams as well, so free-text units never block a save. A result
/// that is not strictly positive means nutrition cannot be computed for the
/// line; the caller decides what to do with it.
pub fn to_grams(quantity: f64, unit: &str) -> f64 {
    if unit.trim().is_empty() {
        return quantity;
    }
    match MassUnit::parse(unit) {
        Some(known) => quantity * known.grams_per_unit(),
        None => {
            debug!("Unrecognized unit '{}', treating quantity as grams", unit.trim());
            quantity
        }
    }
}
