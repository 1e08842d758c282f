//! Unit definitions with conversion factors

use std::fmt;
use serde::{Serialize, Deserialize};
use dimconv_core::{ConversionError, DimensionVector};

/// A registry entry: one named unit, its dimensions and its scale factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    /// The unit symbol (e.g., "m", "kg", "s")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "second")
    pub name: String,
    /// The dimensional signature
    pub dimensions: DimensionVector,
    /// Factor to convert to the base unit of its dimensions (value_base = value * factor)
    pub factor: f64,
    /// Category for organization (e.g., "length", "mass", "time")
    pub category: String,
}

impl UnitDef {
    pub fn new(
        symbol: &str,
        name: &str,
        factor: f64,
        dimensions: &[(&str, i32)],
        category: &str,
    ) -> Self {
        UnitDef {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimensions: DimensionVector::from_pairs(dimensions),
            factor,
            category: category.to_string(),
        }
    }

    /// Check the registry invariants: valid symbol, positive finite factor
    pub fn validate(&self) -> Result<(), ConversionError> {
        validate_symbol(&self.symbol)?;
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(ConversionError::invalid_definition(
                &self.symbol,
                format!("factor must be positive and finite, got {}", self.factor),
            ));
        }
        Ok(())
    }
}

/// Check that `symbol` can come out of the parser as a single component:
/// not empty, no surrounding whitespace and no operator characters.
pub(crate) fn validate_symbol(symbol: &str) -> Result<(), ConversionError> {
    if symbol.trim().is_empty() {
        return Err(ConversionError::invalid_definition(symbol, "symbol is empty"));
    }
    if symbol != symbol.trim() || symbol.contains(['*', '·', '/', '^']) {
        return Err(ConversionError::invalid_definition(
            symbol,
            "symbol contains whitespace padding or an operator character",
        ));
    }
    Ok(())
}

impl fmt::Display for UnitDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
