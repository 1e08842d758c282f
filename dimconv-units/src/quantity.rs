//! Quantity type - a value with an associated unit expression

use std::fmt;
use serde::{Serialize, Deserialize};
use dimconv_core::{ConversionError, DimensionVector};
use crate::Converter;

/// A physical quantity: a numeric value with a unit expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: f64,
    /// The unit expression, e.g. "km/h"
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Quantity { value, unit: unit.into() }
    }

    /// Convert to another unit expression
    pub fn convert_to(&self, converter: &Converter, target: &str) -> Result<Quantity, ConversionError> {
        let value = converter.convert(&self.unit, target, self.value)?;
        Ok(Quantity::new(value, target))
    }

    /// Get the value in base units
    pub fn base_value(&self, converter: &Converter) -> Result<f64, ConversionError> {
        converter.to_base(self.value, &self.unit)
    }

    /// Get the dimension of this quantity
    pub fn dimensions(&self, converter: &Converter) -> Result<DimensionVector, ConversionError> {
        converter.dimensions_of(&self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}
