//! Conversion engine
//!
//! `Converter` pairs a read-only `UnitRegistry` with `ConvertOptions`.
//! Every operation is a pure function of its arguments: no call mutates
//! the registry, so a converter can be cloned and shared across threads.

use std::sync::Arc;
use serde::{Serialize, Deserialize};
use tracing::debug;
use dimconv_core::{ConversionError, DimensionVector};
use crate::parse::parse_composite;
use crate::registry::{UnitRegistry, UNITS};
use crate::temperature::{convert_temperature, TemperatureMatching, TemperatureScale};

/// Conversion settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub temperature_matching: TemperatureMatching,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature_matching(mut self, matching: TemperatureMatching) -> Self {
        self.temperature_matching = matching;
        self
    }
}

/// Dimension-checked unit converter over a registry
#[derive(Debug, Clone)]
pub struct Converter {
    registry: Arc<UnitRegistry>,
    options: ConvertOptions,
}

impl Converter {
    pub fn new(registry: Arc<UnitRegistry>) -> Self {
        Self { registry, options: ConvertOptions::default() }
    }

    /// Converter over the built-in unit table
    pub fn builtin() -> Self {
        Self::new(Arc::clone(&*UNITS))
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    fn is_temperature(&self, unit: &str) -> bool {
        self.options.temperature_matching.is_temperature(unit)
    }

    /// Convert `value` from `from` units to `to` units
    pub fn convert(&self, from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
        let from_temp = self.is_temperature(from);
        let to_temp = self.is_temperature(to);

        if from_temp || to_temp {
            if !(from_temp && to_temp) {
                return Err(ConversionError::TypeMismatch {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            debug!(from, to, value, "temperature conversion");
            return convert_temperature(from, to, value);
        }

        let source = parse_composite(from)?;
        let target = parse_composite(to)?;

        let source_dims = self.registry.dimensions(&source)?;
        let target_dims = self.registry.dimensions(&target)?;
        if source_dims != target_dims {
            return Err(ConversionError::DimensionMismatch {
                from: source_dims,
                to: target_dims,
            });
        }

        let source_factor = self.registry.factor(&source)?;
        let target_factor = self.registry.factor(&target)?;
        debug!(
            from, to, value,
            dimensions = %source_dims,
            source_factor, target_factor,
            "linear conversion"
        );

        let ratio = source_factor / target_factor;
        if !ratio.is_finite() || ratio == 0.0 {
            return Err(ConversionError::overflow(
                format!("{} -> {}", from, to),
                "conversion ratio is not a finite non-zero number",
            ));
        }
        Ok(value * ratio)
    }

    /// Net dimensions of a linear unit expression
    pub fn dimensions_of(&self, unit: &str) -> Result<DimensionVector, ConversionError> {
        self.registry.dimensions(&parse_composite(unit)?)
    }

    /// Check if two unit expressions can be converted into each other.
    ///
    /// Two temperature units are compatible when both scales are supported;
    /// a temperature unit is never compatible with a linear one.
    pub fn compatible(&self, a: &str, b: &str) -> Result<bool, ConversionError> {
        match (self.is_temperature(a), self.is_temperature(b)) {
            (true, true) => {
                TemperatureScale::from_symbol(a)?;
                TemperatureScale::from_symbol(b)?;
                Ok(true)
            }
            (false, false) => Ok(self.dimensions_of(a)? == self.dimensions_of(b)?),
            _ => Ok(false),
        }
    }

    /// Scale of a linear unit expression relative to base units
    pub fn factor_of(&self, unit: &str) -> Result<f64, ConversionError> {
        if self.is_temperature(unit) {
            return Err(ConversionError::TypeMismatch {
                from: unit.to_string(),
                to: "base units".to_string(),
            });
        }
        self.registry.factor(&parse_composite(unit)?)
    }

    /// Express a value in base units. Temperatures go to Kelvin.
    pub fn to_base(&self, value: f64, unit: &str) -> Result<f64, ConversionError> {
        if self.is_temperature(unit) {
            return Ok(TemperatureScale::from_symbol(unit)?.convert(value, TemperatureScale::Kelvin));
        }
        Ok(value * self.factor_of(unit)?)
    }

    /// Check if a unit expression has no net dimensions (e.g. "m/km")
    pub fn is_dimensionless(&self, unit: &str) -> Result<bool, ConversionError> {
        Ok(self.dimensions_of(unit)?.is_dimensionless())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Convert `value` between two unit expressions using the built-in table
pub fn convert(from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
    Converter::builtin().convert(from, to, value)
}
