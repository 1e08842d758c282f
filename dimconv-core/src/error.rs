//! Conversion errors
//!
//! `ConversionError` is the typed error every operation returns.
//! `ErrorReport` is its structured, serializable form for hosts that
//! forward errors to a user or an LLM.

use crate::DimensionVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNSUPPORTED_UNIT: &str = "UNSUPPORTED_UNIT";
    pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const INVALID_DEFINITION: &str = "INVALID_DEFINITION";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const OVERFLOW: &str = "OVERFLOW";
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// A unit expression component does not have the `symbol[^exponent]` shape
    #[error("invalid component '{component}' in unit '{unit}'")]
    Parse { component: String, unit: String },

    /// A temperature unit other than C, F or K
    #[error("unsupported temperature unit: {0}")]
    UnsupportedUnit(String),

    /// Exactly one side of the conversion is a temperature unit
    #[error("cannot convert between temperature and non-temperature units ({from} -> {to})")]
    TypeMismatch { from: String, to: String },

    /// Symbol not present in the unit registry
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Both units resolve but describe different physical quantities
    #[error("cannot convert between different unit types: {from} vs {to}")]
    DimensionMismatch { from: DimensionVector, to: DimensionVector },

    /// A registry definition was rejected
    #[error("invalid definition for unit '{symbol}': {reason}")]
    InvalidDefinition { symbol: String, reason: String },

    /// A registry document could not be loaded
    #[error("invalid unit table: {0}")]
    Config(String),

    /// A dimension exponent or scale factor left its numeric range
    #[error("unit '{unit}' is out of range: {reason}")]
    Overflow { unit: String, reason: String },
}

impl ConversionError {
    pub fn parse(component: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::Parse { component: component.into(), unit: unit.into() }
    }

    pub fn invalid_definition(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition { symbol: symbol.into(), reason: reason.into() }
    }

    pub fn overflow(unit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Overflow { unit: unit.into(), reason: reason.into() }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => codes::PARSE_ERROR,
            Self::UnsupportedUnit(_) => codes::UNSUPPORTED_UNIT,
            Self::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            Self::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            Self::DimensionMismatch { .. } => codes::DIMENSION_MISMATCH,
            Self::InvalidDefinition { .. } => codes::INVALID_DEFINITION,
            Self::Config(_) => codes::CONFIG_ERROR,
            Self::Overflow { .. } => codes::OVERFLOW,
        }
    }
}

/// Structured error for host consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Unit expression the caller was working with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Dimension vectors involved in a mismatch, source first
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dimensions: Vec<DimensionVector>,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            unit: None,
            dimensions: Vec::new(),
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set unit context
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl From<&ConversionError> for ErrorReport {
    fn from(err: &ConversionError) -> Self {
        let report = ErrorReport::new(err.code(), err.to_string());
        match err {
            ConversionError::Parse { unit, .. } => report
                .with_unit(unit.clone())
                .with_suggestion("Write components as symbol or symbol^exponent, e.g. kg*m/s^2"),
            ConversionError::UnsupportedUnit(unit) => report
                .with_unit(unit.clone())
                .with_suggestion("Temperature units are C, F and K (optionally with °)"),
            ConversionError::TypeMismatch { .. } => report
                .with_suggestion("Convert temperatures only to other temperature units"),
            ConversionError::UnknownUnit(symbol) => report
                .with_unit(symbol.clone())
                .with_suggestion(format!("Check the spelling of '{}' or register it", symbol)),
            ConversionError::DimensionMismatch { from, to } => {
                let mut report = report
                    .with_suggestion("Source and target must measure the same kind of quantity");
                report.dimensions = vec![from.clone(), to.clone()];
                report
            }
            ConversionError::InvalidDefinition { symbol, .. } => report.with_unit(symbol.clone()),
            ConversionError::Config(_) => report,
            ConversionError::Overflow { unit, .. } => report
                .with_unit(unit.clone())
                .with_suggestion("Use smaller exponents"),
        }
    }
}

impl From<ConversionError> for ErrorReport {
    fn from(err: ConversionError) -> Self {
        ErrorReport::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{LENGTH, MASS};

    #[test]
    fn test_codes() {
        assert_eq!(ConversionError::UnknownUnit("xyz".into()).code(), codes::UNKNOWN_UNIT);
        assert_eq!(ConversionError::parse("^^2", "kg^^2").code(), codes::PARSE_ERROR);
    }

    #[test]
    fn test_parse_message_names_component_and_unit() {
        let err = ConversionError::parse("kg^^2", "kg^^2/s");
        assert_eq!(err.to_string(), "invalid component 'kg^^2' in unit 'kg^^2/s'");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ConversionError::TypeMismatch { from: "C".into(), to: "m".into() };
        assert!(err.to_string().starts_with("cannot convert between temperature and non-temperature units"));
    }

    #[test]
    fn test_dimension_mismatch_report() {
        let err = ConversionError::DimensionMismatch {
            from: DimensionVector::base(LENGTH),
            to: DimensionVector::base(MASS),
        };
        assert_eq!(err.to_string(), "cannot convert between different unit types: L vs M");

        let report = ErrorReport::from(&err);
        assert_eq!(report.code, codes::DIMENSION_MISMATCH);
        assert_eq!(report.dimensions.len(), 2);
    }

    #[test]
    fn test_report_serialization() {
        let report: ErrorReport = ConversionError::UnknownUnit("xyz".into()).into();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["code"], "UNKNOWN_UNIT");
        assert_eq!(json["unit"], "xyz");
        assert!(json.get("dimensions").is_none());
    }

    #[test]
    fn test_overflow_report() {
        let err = ConversionError::overflow("km^400", "scale factor is not a finite non-zero number");
        assert_eq!(err.code(), codes::OVERFLOW);
        assert_eq!(
            err.to_string(),
            "unit 'km^400' is out of range: scale factor is not a finite non-zero number"
        );
        assert_eq!(ErrorReport::from(err).unit.as_deref(), Some("km^400"));
    }

    #[test]
    fn test_report_display() {
        let report = ErrorReport::new(codes::CONFIG_ERROR, "bad table").with_suggestion("fix it");
        assert_eq!(format!("{}", report), "[CONFIG_ERROR] bad table (suggestion: fix it)");
    }
}
