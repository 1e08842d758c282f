//! Dimensional analysis types
//!
//! A dimension vector maps a base-dimension symbol ("L", "M", "T", or any
//! other symbol a registry defines) to a non-zero integer exponent.
//! Zero exponents are never stored, so two vectors describing the same
//! physical quantity are equal regardless of how they were built.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};
use crate::ConversionError;

/// Base dimension symbols used by the built-in unit table
pub const LENGTH: &str = "L";
pub const MASS: &str = "M";
pub const TIME: &str = "T";

/// Net dimensions of a unit as exponents of base dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct DimensionVector {
    exponents: BTreeMap<String, i32>,
}

impl DimensionVector {
    /// Dimensionless quantity (no entries)
    pub const DIMENSIONLESS: DimensionVector = DimensionVector { exponents: BTreeMap::new() };

    /// Empty vector, ready for accumulation
    pub fn new() -> Self {
        Self::DIMENSIONLESS
    }

    /// Single base dimension with exponent 1, e.g. `base(LENGTH)` is [L]
    pub fn base(symbol: &str) -> Self {
        Self::from_pairs(&[(symbol, 1)])
    }

    /// Build from (symbol, exponent) pairs. Zero exponents are dropped and
    /// a repeated symbol keeps its last exponent.
    pub fn from_pairs(pairs: &[(&str, i32)]) -> Self {
        let exponents = pairs.iter()
            .filter(|&&(_, exp)| exp != 0)
            .map(|&(symbol, exp)| (symbol.to_string(), exp))
            .collect();
        DimensionVector { exponents }
    }

    /// Exponent of one base dimension (0 when absent)
    pub fn get(&self, symbol: &str) -> i32 {
        self.exponents.get(symbol).copied().unwrap_or(0)
    }

    /// Iterate (symbol, exponent) pairs in symbol order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.exponents.iter().map(|(d, &e)| (d.as_str(), e))
    }

    /// Number of base dimensions with a non-zero exponent
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &DimensionVector) -> Result<DimensionVector, ConversionError> {
        let mut result = self.clone();
        result.accumulate(other, 1)?;
        Ok(result)
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &DimensionVector) -> Result<DimensionVector, ConversionError> {
        let mut result = self.clone();
        result.accumulate(other, -1)?;
        Ok(result)
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, exp: i32) -> Result<DimensionVector, ConversionError> {
        let mut result = DimensionVector::new();
        result.accumulate(self, exp)?;
        Ok(result)
    }

    /// Add `other` raised to `exp`, failing if any exponent leaves the i32 range
    fn accumulate(&mut self, other: &DimensionVector, exp: i32) -> Result<(), ConversionError> {
        for (symbol, value) in other.iter() {
            let scaled = value.checked_mul(exp).ok_or_else(|| exponent_overflow(symbol))?;
            let current = self.get(symbol);
            let sum = current.checked_add(scaled).ok_or_else(|| exponent_overflow(symbol))?;
            if sum == 0 {
                self.exponents.remove(symbol);
            } else {
                self.exponents.insert(symbol.to_string(), sum);
            }
        }
        Ok(())
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        let key: Vec<(&str, i32)> = self.iter().collect();
        match key.as_slice() {
            [] => Some("dimensionless"),
            [("L", 1)] => Some("length"),
            [("M", 1)] => Some("mass"),
            [("T", 1)] => Some("time"),
            [("L", 2)] => Some("area"),
            [("L", 3)] => Some("volume"),
            [("T", -1)] => Some("frequency"),
            [("L", 1), ("T", -1)] => Some("velocity"),
            [("L", 1), ("T", -2)] => Some("acceleration"),
            [("L", 1), ("M", 1), ("T", -2)] => Some("force"),
            [("L", 2), ("M", 1), ("T", -2)] => Some("energy"),
            [("L", 2), ("M", 1), ("T", -3)] => Some("power"),
            [("L", -1), ("M", 1), ("T", -2)] => Some("pressure"),
            _ => None,
        }
    }
}

fn exponent_overflow(symbol: &str) -> ConversionError {
    ConversionError::overflow(symbol, "dimension exponent exceeds the i32 range")
}

impl From<BTreeMap<String, i32>> for DimensionVector {
    fn from(mut exponents: BTreeMap<String, i32>) -> Self {
        exponents.retain(|_, exp| *exp != 0);
        DimensionVector { exponents }
    }
}

impl From<DimensionVector> for BTreeMap<String, i32> {
    fn from(dims: DimensionVector) -> Self {
        dims.exponents
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }

        let parts: Vec<String> = self.iter()
            .map(|(symbol, exp)| {
                if exp == 1 {
                    symbol.to_string()
                } else {
                    format!("{}^{}", symbol, exp)
                }
            })
            .collect();

        write!(f, "{}", parts.join(" "))
    }
}
