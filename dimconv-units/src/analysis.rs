//! Dimensional analysis of parsed composite units

use dimconv_core::{ConversionError, DimensionVector};
use crate::{CompositeUnit, UnitRegistry};

impl UnitRegistry {
    /// Net dimension vector of a composite unit.
    ///
    /// Numerator factors add `dimension * exponent`, denominator factors
    /// subtract it. Dimensions that cancel out are dropped. An exponent
    /// outside the i32 range fails with `Overflow`.
    pub fn dimensions(&self, unit: &CompositeUnit) -> Result<DimensionVector, ConversionError> {
        let overflow = |_: ConversionError| ConversionError::overflow(unit.to_string(), "dimension exponent exceeds the i32 range");

        let mut dims = DimensionVector::new();
        for factor in &unit.numerator {
            let raised = self.lookup(&factor.symbol)?.dimensions.power(factor.exponent).map_err(overflow)?;
            dims = dims.multiply(&raised).map_err(overflow)?;
        }
        for factor in &unit.denominator {
            let raised = self.lookup(&factor.symbol)?.dimensions.power(factor.exponent).map_err(overflow)?;
            dims = dims.divide(&raised).map_err(overflow)?;
        }
        Ok(dims)
    }

    /// Scale of a composite unit relative to the base units of its dimensions.
    ///
    /// Fails with `Overflow` when the product leaves the finite non-zero range of f64.
    pub fn factor(&self, unit: &CompositeUnit) -> Result<f64, ConversionError> {
        let mut factor = 1.0;
        for f in &unit.numerator {
            factor *= self.lookup(&f.symbol)?.factor.powi(f.exponent);
        }
        for f in &unit.denominator {
            factor /= self.lookup(&f.symbol)?.factor.powi(f.exponent);
        }

        if !factor.is_finite() || factor == 0.0 {
            return Err(ConversionError::overflow(
                unit.to_string(),
                "scale factor is not a finite non-zero number",
            ));
        }
        Ok(factor)
    }
}
