//! Unit string parsing - split expressions like "kg*m/s^2" into factors

use std::fmt;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Serialize, Deserialize};
use tracing::trace;
use dimconv_core::ConversionError;

/// `symbol` or `symbol^exponent`, the symbol being anything but `^`
static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\^]+)(?:\^(-?[0-9]+))?$").expect("component pattern compiles")
});

/// One unit symbol raised to an integer power
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    pub symbol: String,
    pub exponent: i32,
}

impl Factor {
    pub fn new(symbol: impl Into<String>, exponent: i32) -> Self {
        Factor { symbol: symbol.into(), exponent }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 1 {
            write!(f, "{}", self.symbol)
        } else {
            write!(f, "{}^{}", self.symbol, self.exponent)
        }
    }
}

/// A unit expression as numerator and denominator factor lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeUnit {
    pub numerator: Vec<Factor>,
    pub denominator: Vec<Factor>,
}

impl fmt::Display for CompositeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |factors: &[Factor]| {
            factors.iter().map(|factor| factor.to_string()).collect::<Vec<_>>().join("*")
        };

        if self.numerator.is_empty() {
            write!(f, "1")?;
        } else {
            write!(f, "{}", join(&self.numerator))?;
        }
        if !self.denominator.is_empty() {
            write!(f, "/{}", join(&self.denominator))?;
        }
        Ok(())
    }
}

/// Parse a unit expression into numerator and denominator factors
///
/// Supported formats:
/// - Simple: "m", "kg", "s"
/// - Powers: "m^2", "s^-1"
/// - Products: "m*s", "kg·m"
/// - Quotients: "m/s", "1/s", "kg/m^2"
/// - Combined: "kg*m/s^2", "m^2*kg/s^3"
///
/// Only the first `/` divides. A bare `1` on either side contributes no factor.
pub fn parse_composite(unit_text: &str) -> Result<CompositeUnit, ConversionError> {
    let (numerator_part, denominator_part) = unit_text
        .split_once('/')
        .unwrap_or((unit_text, "1"));

    let unit = CompositeUnit {
        numerator: parse_product(numerator_part, unit_text)?,
        denominator: parse_product(denominator_part, unit_text)?,
    };

    trace!(unit = unit_text, parsed = %unit, "parsed composite unit");
    Ok(unit)
}

/// Parse a product of factors like "kg*m" or "m^2·s"
fn parse_product(s: &str, unit_text: &str) -> Result<Vec<Factor>, ConversionError> {
    s.split(|c: char| c == '*' || c == '·')
        .map(str::trim)
        .filter(|component| *component != "1")
        .map(|component| parse_power(component, unit_text))
        .collect()
}

/// Parse a factor with optional power like "m^2" or "s^-1"
fn parse_power(component: &str, unit_text: &str) -> Result<Factor, ConversionError> {
    let caps = COMPONENT.captures(component)
        .ok_or_else(|| ConversionError::parse(component, unit_text))?;

    let exponent = match caps.get(2) {
        Some(exp) => exp.as_str().parse::<i32>()
            .map_err(|_| ConversionError::parse(component, unit_text))?,
        None => 1,
    };

    Ok(Factor::new(&caps[1], exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(pairs: &[(&str, i32)]) -> Vec<Factor> {
        pairs.iter().map(|&(s, e)| Factor::new(s, e)).collect()
    }

    #[test]
    fn test_parse_simple_unit() {
        let unit = parse_composite("m").unwrap();
        assert_eq!(unit.numerator, factors(&[("m", 1)]));
        assert!(unit.denominator.is_empty());
    }

    #[test]
    fn test_parse_unit_with_power() {
        let unit = parse_composite("m^2").unwrap();
        assert_eq!(unit.numerator, factors(&[("m", 2)]));

        let unit = parse_composite("s^-1").unwrap();
        assert_eq!(unit.numerator, factors(&[("s", -1)]));
    }

    #[test]
    fn test_parse_reciprocal() {
        let unit = parse_composite("1/s").unwrap();
        assert!(unit.numerator.is_empty());
        assert_eq!(unit.denominator, factors(&[("s", 1)]));
    }

    #[test]
    fn test_parse_complex() {
        let unit = parse_composite("kg*m/s^2").unwrap();
        assert_eq!(unit.numerator, factors(&[("kg", 1), ("m", 1)]));
        assert_eq!(unit.denominator, factors(&[("s", 2)]));
    }

    #[test]
    fn test_parse_middle_dot_and_whitespace() {
        let unit = parse_composite(" kg · m / s^2 ").unwrap();
        assert_eq!(unit.numerator, factors(&[("kg", 1), ("m", 1)]));
        assert_eq!(unit.denominator, factors(&[("s", 2)]));
    }

    #[test]
    fn test_explicit_identity_factors_are_dropped() {
        let unit = parse_composite("1*m/1").unwrap();
        assert_eq!(unit.numerator, factors(&[("m", 1)]));
        assert!(unit.denominator.is_empty());
        assert_eq!(parse_composite("1/1").unwrap(), CompositeUnit::default());
    }

    #[test]
    fn test_only_first_slash_divides() {
        let unit = parse_composite("m/s/s").unwrap();
        assert_eq!(unit.numerator, factors(&[("m", 1)]));
        assert_eq!(unit.denominator, factors(&[("s/s", 1)]));
    }

    #[test]
    fn test_double_caret_is_rejected() {
        let err = parse_composite("kg^^2").unwrap_err();
        assert_eq!(err, ConversionError::parse("kg^^2", "kg^^2"));
    }

    #[test]
    fn test_dangling_caret_is_rejected() {
        assert!(parse_composite("m^").is_err());
        assert!(parse_composite("m^x").is_err());
        assert!(parse_composite("^2").is_err());
    }

    #[test]
    fn test_empty_components_are_rejected() {
        assert_eq!(parse_composite("m**s").unwrap_err(), ConversionError::parse("", "m**s"));
        assert_eq!(parse_composite("/s").unwrap_err(), ConversionError::parse("", "/s"));
        assert!(parse_composite("").is_err());
    }

    #[test]
    fn test_exponent_overflow_is_rejected() {
        assert!(parse_composite("m^99999999999").is_err());
    }

    #[test]
    fn test_exponent_digits_are_ascii() {
        assert_eq!(parse_composite("m^٢").unwrap_err(), ConversionError::parse("m^٢", "m^٢"));
        assert_eq!(parse_composite("m^-2147483648").unwrap().numerator, factors(&[("m", i32::MIN)]));
    }

    #[test]
    fn test_display() {
        assert_eq!(parse_composite("kg*m/s^2").unwrap().to_string(), "kg*m/s^2");
        assert_eq!(parse_composite("1/s").unwrap().to_string(), "1/s");
    }
}
