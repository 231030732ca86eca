//! Precondition checks run on user input before the nutrition engine sees a
//! line. The `Display` text of each error is the message shown to the user.

use thiserror::Error;

use crate::ingredient_line::IngredientLine;

pub const MAX_NAME_LEN: usize = 30;
pub const MAX_QUANTITY_LEN: usize = 10;
pub const MAX_UNIT_LEN: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ingredient name is required")]
    MissingName,

    #[error("Ingredient name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("Quantity is required")]
    MissingQuantity,

    #[error("Quantity '{0}' is not a number")]
    QuantityNotNumeric(String),

    #[error("Quantity must be greater than zero")]
    QuantityNotPositive,

    #[error("Quantity must be at most {max} characters")]
    QuantityTooLong { max: usize },

    #[error("Unit is required")]
    MissingUnit,

    #[error("Unit must be at most {max} characters")]
    UnitTooLong { max: usize },

    #[error("Unit '{0}' may only contain letters")]
    UnitNotAlphabetic(String),

    #[error("Serving count '{0}' is not a number")]
    ServingsNotNumeric(String),

    #[error("Serving count must be greater than zero")]
    ServingsNotPositive,
}

/// Ingredient fields that passed the gate, with the quantity parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl ValidatedIngredient {
    pub fn into_line(self) -> IngredientLine {
        IngredientLine::new(self.name, self.quantity, self.unit)
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong { max: MAX_NAME_LEN });
    }
    Ok(name.to_string())
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn validate_quantity(quantity: &str) -> Result<f64, ValidationError> {
    let quantity = quantity.trim();
    if quantity.is_empty() {
        return Err(ValidationError::MissingQuantity);
    }
    if quantity.chars().count() > MAX_QUANTITY_LEN {
        return Err(ValidationError::QuantityTooLong { max: MAX_QUANTITY_LEN });
    }
    let value = parse_finite(quantity)
        .ok_or_else(|| ValidationError::QuantityNotNumeric(quantity.to_string()))?;
    if value <= 0.0 {
        return Err(ValidationError::QuantityNotPositive);
    }
    Ok(value)
}

fn validate_unit(unit: &str) -> Result<String, ValidationError> {
    let unit = unit.trim();
    if unit.is_empty() {
        return Err(ValidationError::MissingUnit);
    }
    if unit.chars().count() > MAX_UNIT_LEN {
        return Err(ValidationError::UnitTooLong { max: MAX_UNIT_LEN });
    }
    if !unit.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::UnitNotAlphabetic(unit.to_string()));
    }
    Ok(unit.to_string())
}

/// Checks raw form input for one ingredient row. Fields are checked in
/// name, quantity, unit order and the first failure is reported.
pub fn validate_ingredient(
    name: &str,
    quantity: &str,
    unit: &str,
) -> Result<ValidatedIngredient, ValidationError> {
    Ok(ValidatedIngredient {
        name: validate_name(name)?,
        quantity: validate_quantity(quantity)?,
        unit: validate_unit(unit)?,
    })
}

/// Runs the gate on a line that already carries a typed quantity, e.g. one
/// read from a recipe file. The length limit only applies to typed-in text,
/// so the quantity just has to be finite and positive.
pub fn validate_line(line: &IngredientLine) -> Result<(), ValidationError> {
    validate_name(&line.name)?;
    if !line.quantity.is_finite() {
        return Err(ValidationError::QuantityNotNumeric(line.quantity.to_string()));
    }
    if line.quantity <= 0.0 {
        return Err(ValidationError::QuantityNotPositive);
    }
    validate_unit(&line.unit)?;
    Ok(())
}

/// Checks an already-numeric serving count.
pub fn validate_servings(servings: f64) -> Result<f64, ValidationError> {
    if !servings.is_finite() {
        return Err(ValidationError::ServingsNotNumeric(servings.to_string()));
    }
    if servings <= 0.0 {
        return Err(ValidationError::ServingsNotPositive);
    }
    Ok(servings)
}

/// Parses a serving count typed by the user. Non-numeric, non-finite and
/// non-positive values are rejected here so rescaling only ever sees a valid
/// multiplier.
pub fn parse_serving_multiplier(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    let value =
        parse_finite(raw).ok_or_else(|| ValidationError::ServingsNotNumeric(raw.to_string()))?;
    validate_servings(value)
}
