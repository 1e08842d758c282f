//! Temperature scales
//!
//! Celsius, Fahrenheit and Kelvin are related by affine transforms, so they
//! live outside the dimension-vector system. Conversions pivot on Celsius.

use std::fmt;
use serde::{Serialize, Deserialize};
use dimconv_core::ConversionError;

/// Unit texts that route a conversion to the temperature branch
pub const TEMPERATURE_SYMBOLS: [&str; 5] = ["C", "°C", "F", "°F", "K"];

const KELVIN_OFFSET: f64 = 273.15;

/// How a unit text is recognised as a temperature unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureMatching {
    /// The unit text contains any of `TEMPERATURE_SYMBOLS`.
    /// Any symbol with an uppercase C, F or K in it (e.g. a "kCal") is
    /// therefore treated as a temperature.
    #[default]
    Substring,
    /// The trimmed unit text, without `°`, is exactly C, F or K
    Exact,
}

impl TemperatureMatching {
    pub fn is_temperature(&self, unit: &str) -> bool {
        match self {
            TemperatureMatching::Substring => {
                TEMPERATURE_SYMBOLS.iter().any(|symbol| unit.contains(*symbol))
            }
            TemperatureMatching::Exact => TemperatureScale::from_symbol(unit).is_ok(),
        }
    }
}

/// Supported temperature scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Resolve a unit text after trimming and removing the degree mark.
    /// Case is preserved: "c" is not Celsius.
    pub fn from_symbol(unit: &str) -> Result<Self, ConversionError> {
        match unit.trim().replace('°', "").as_str() {
            "C" => Ok(TemperatureScale::Celsius),
            "F" => Ok(TemperatureScale::Fahrenheit),
            "K" => Ok(TemperatureScale::Kelvin),
            _ => Err(ConversionError::UnsupportedUnit(unit.to_string())),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "C",
            TemperatureScale::Fahrenheit => "F",
            TemperatureScale::Kelvin => "K",
        }
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - KELVIN_OFFSET,
        }
    }

    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + KELVIN_OFFSET,
        }
    }

    /// Convert a reading on this scale to `target`
    pub fn convert(&self, value: f64, target: TemperatureScale) -> f64 {
        target.from_celsius(self.to_celsius(value))
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Convert between two temperature unit texts. The source is resolved first.
pub fn convert_temperature(from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
    let source = TemperatureScale::from_symbol(from)?;
    let target = TemperatureScale::from_symbol(to)?;
    Ok(source.convert(value, target))
}
