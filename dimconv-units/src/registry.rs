//! Unit registry and the built-in unit table

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use serde::Deserialize;
use tracing::debug;
use dimconv_core::{ConversionError, DimensionVector, LENGTH, MASS, TIME};
use crate::unit::{validate_symbol, UnitDef};

/// Global built-in registry, initialised on first use and never mutated
pub static UNITS: LazyLock<Arc<UnitRegistry>> = LazyLock::new(|| Arc::new(UnitRegistry::builtin()));

const FORCE: &[(&str, i32)] = &[(MASS, 1), (LENGTH, 1), (TIME, -2)];
const ENERGY: &[(&str, i32)] = &[(MASS, 1), (LENGTH, 2), (TIME, -2)];
const POWER: &[(&str, i32)] = &[(MASS, 1), (LENGTH, 2), (TIME, -3)];
const PRESSURE: &[(&str, i32)] = &[(MASS, 1), (LENGTH, -1), (TIME, -2)];

/// Registry of known units, keyed by case-sensitive symbol
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: HashMap<String, UnitDef>,
    aliases: HashMap<String, String>,
}

/// One entry of a JSON unit table
#[derive(Debug, Deserialize)]
struct UnitEntry {
    symbol: String,
    #[serde(default)]
    name: Option<String>,
    factor: f64,
    #[serde(default)]
    dimensions: DimensionVector,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

impl UnitRegistry {
    /// Registry with no units
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the built-in unit table
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register_all_units();
        debug!(units = registry.units.len(), aliases = registry.aliases.len(), "built-in unit table loaded");
        registry
    }

    /// Parse a JSON unit table into a fresh registry
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        let mut registry = Self::empty();
        registry.extend_from_json(json)?;
        Ok(registry)
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&UnitDef> {
        // Try direct lookup first
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        // Try alias lookup
        if let Some(canonical) = self.aliases.get(symbol) {
            return self.units.get(canonical);
        }
        None
    }

    /// Look up a symbol, failing with `UnknownUnit`
    pub fn lookup(&self, symbol: &str) -> Result<&UnitDef, ConversionError> {
        self.get(symbol)
            .ok_or_else(|| ConversionError::UnknownUnit(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&UnitDef> {
        self.units.values()
            .filter(|u| u.category == category)
            .collect()
    }

    /// Get all canonical unit symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.units.keys().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Number of canonical units (aliases not counted)
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Add a unit after checking its invariants. Symbols must be new.
    pub fn try_register(&mut self, unit: UnitDef) -> Result<(), ConversionError> {
        unit.validate()?;
        if self.contains(&unit.symbol) {
            return Err(ConversionError::invalid_definition(&unit.symbol, "symbol is already registered"));
        }
        self.register(unit);
        Ok(())
    }

    /// Add an alternative spelling for a registered unit.
    /// The alias obeys the same symbol rules as a unit definition.
    pub fn try_alias(&mut self, alias: &str, symbol: &str) -> Result<(), ConversionError> {
        validate_symbol(alias)?;
        if self.contains(alias) {
            return Err(ConversionError::invalid_definition(alias, "symbol is already registered"));
        }
        let canonical = self.lookup(symbol)?.symbol.clone();
        self.aliases.insert(alias.to_string(), canonical);
        Ok(())
    }

    /// Add every unit of a JSON table. Either the whole table is applied or nothing is.
    ///
    /// The table is an array of objects:
    /// `{"symbol": "furlong", "factor": 201.168, "dimensions": {"L": 1}, "aliases": ["furlongs"]}`
    /// where `name`, `category`, `dimensions` and `aliases` are optional.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, ConversionError> {
        let entries: Vec<UnitEntry> = serde_json::from_str(json)
            .map_err(|e| ConversionError::Config(e.to_string()))?;

        let mut staged = self.clone();
        for entry in &entries {
            let category = entry.category.clone().unwrap_or_else(|| {
                entry.dimensions.name().unwrap_or("derived").to_string()
            });
            staged.try_register(UnitDef {
                symbol: entry.symbol.clone(),
                name: entry.name.clone().unwrap_or_else(|| entry.symbol.clone()),
                dimensions: entry.dimensions.clone(),
                factor: entry.factor,
                category,
            })?;
            for alias in &entry.aliases {
                staged.try_alias(alias, &entry.symbol)?;
            }
        }

        *self = staged;
        debug!(added = entries.len(), total = self.units.len(), "unit table extended");
        Ok(entries.len())
    }

    fn register(&mut self, unit: UnitDef) {
        self.units.insert(unit.symbol.clone(), unit);
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_pressure_units();
    }

    fn register_length_units(&mut self) {
        let l = &[(LENGTH, 1)];
        self.register(UnitDef::new("m", "meter", 1.0, l, "length"));
        self.register(UnitDef::new("km", "kilometer", 1e3, l, "length"));
        self.register(UnitDef::new("dm", "decimeter", 0.1, l, "length"));
        self.register(UnitDef::new("cm", "centimeter", 1e-2, l, "length"));
        self.register(UnitDef::new("mm", "millimeter", 1e-3, l, "length"));
        self.register(UnitDef::new("nm", "nanometer", 1e-9, l, "length"));
        self.register(UnitDef::new("fm", "femtometer", 1e-15, l, "length"));
        self.register(UnitDef::new("in", "inch", 0.0254, l, "length"));
        self.register(UnitDef::new("ft", "foot", 0.3048, l, "length"));
        self.register(UnitDef::new("yard", "yard", 0.9144, l, "length"));
        self.register(UnitDef::new("mile", "mile", 1609.344, l, "length"));
        self.register(UnitDef::new("nmi", "nautical mile", 1852.0, l, "length"));

        self.alias("inch", "in");
        self.alias("feet", "ft");
        self.alias("decimeter", "dm");
        self.alias("nanometer", "nm");
        self.alias("femtometer", "fm");
        self.alias("nautical_mile", "nmi");
    }

    fn register_mass_units(&mut self) {
        let m = &[(MASS, 1)];
        self.register(UnitDef::new("kg", "kilogram", 1.0, m, "mass"));
        self.register(UnitDef::new("g", "gram", 1e-3, m, "mass"));
        self.register(UnitDef::new("mg", "milligram", 1e-6, m, "mass"));
        self.register(UnitDef::new("lb", "pound", 0.45359237, m, "mass"));
        self.register(UnitDef::new("slug", "slug", 14.5939029, m, "mass"));
        self.register(UnitDef::new("ounce", "ounce", 0.0283495, m, "mass"));

        self.alias("lbm", "lb");
    }

    fn register_time_units(&mut self) {
        let t = &[(TIME, 1)];
        self.register(UnitDef::new("s", "second", 1.0, t, "time"));
        self.register(UnitDef::new("min", "minute", 60.0, t, "time"));
        self.register(UnitDef::new("h", "hour", 3600.0, t, "time"));
        self.register(UnitDef::new("day", "day", 86400.0, t, "time"));
        // 365 days, no leap correction
        self.register(UnitDef::new("year", "year", 31536000.0, t, "time"));

        self.alias("sec", "s");
        self.alias("hour", "h");
    }

    fn register_force_units(&mut self) {
        self.register(UnitDef::new("N", "newton", 1.0, FORCE, "force"));
        self.register(UnitDef::new("lbf", "pound-force", 4.4482216153, FORCE, "force"));
    }

    fn register_energy_units(&mut self) {
        self.register(UnitDef::new("J", "joule", 1.0, ENERGY, "energy"));
        self.register(UnitDef::new("kJ", "kilojoule", 1e3, ENERGY, "energy"));
        self.register(UnitDef::new("cal", "calorie", 4.184, ENERGY, "energy"));
        self.register(UnitDef::new("kcal", "kilocalorie", 4184.0, ENERGY, "energy"));
        self.register(UnitDef::new("btu", "British thermal unit", 1055.05585262, ENERGY, "energy"));
        self.register(UnitDef::new("Wh", "watt-hour", 3600.0, ENERGY, "energy"));
        self.register(UnitDef::new("kWh", "kilowatt-hour", 3.6e6, ENERGY, "energy"));
    }

    fn register_power_units(&mut self) {
        self.register(UnitDef::new("W", "watt", 1.0, POWER, "power"));
        self.register(UnitDef::new("kW", "kilowatt", 1e3, POWER, "power"));
        self.register(UnitDef::new("hp", "horsepower", 745.7, POWER, "power"));
    }

    fn register_area_units(&mut self) {
        let a = &[(LENGTH, 2)];
        self.register(UnitDef::new("acre", "acre", 4046.8564224, a, "area"));
        self.register(UnitDef::new("hectare", "hectare", 1e4, a, "area"));
    }

    fn register_volume_units(&mut self) {
        let v = &[(LENGTH, 3)];
        self.register(UnitDef::new("L", "liter", 0.001, v, "volume"));
        self.register(UnitDef::new("gal", "gallon", 0.00378541, v, "volume"));
        self.register(UnitDef::new("quart", "quart", 0.000946353, v, "volume"));
        self.register(UnitDef::new("pint", "pint", 0.000473176, v, "volume"));

        self.alias("liter", "L");
    }

    fn register_pressure_units(&mut self) {
        self.register(UnitDef::new("Pa", "pascal", 1.0, PRESSURE, "pressure"));
        self.register(UnitDef::new("hPa", "hectopascal", 100.0, PRESSURE, "pressure"));
        self.register(UnitDef::new("kPa", "kilopascal", 1e3, PRESSURE, "pressure"));
        self.register(UnitDef::new("MPa", "megapascal", 1e6, PRESSURE, "pressure"));
        self.register(UnitDef::new("GPa", "gigapascal", 1e9, PRESSURE, "pressure"));
        self.register(UnitDef::new("bar", "bar", 1e5, PRESSURE, "pressure"));
        self.register(UnitDef::new("psi", "pound per square inch", 6894.757293168, PRESSURE, "pressure"));
        self.register(UnitDef::new("atm", "standard atmosphere", 101325.0, PRESSURE, "pressure"));
        self.register(UnitDef::new("mmHg", "millimeter of mercury", 133.322, PRESSURE, "pressure"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let unit = UNITS.get("km").unwrap();
        assert_eq!(unit.factor, 1e3);
        assert_eq!(unit.dimensions, DimensionVector::base(LENGTH));
    }

    #[test]
    fn test_alias_lookup() {
        assert_eq!(UNITS.get("inch").unwrap().symbol, "in");
        assert_eq!(UNITS.get("liter").unwrap().symbol, "L");
        assert_eq!(UNITS.get("nautical_mile").unwrap().factor, 1852.0);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(UNITS.contains("L"));
        assert!(!UNITS.contains("l"));
        assert!(UNITS.contains("mmHg"));
        assert!(!UNITS.contains("mmhg"));
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(UNITS.lookup("xyz"), Err(ConversionError::UnknownUnit("xyz".to_string())));
    }

    #[test]
    fn test_every_builtin_factor_is_positive() {
        for symbol in UNITS.symbols() {
            let unit = UNITS.get(symbol).unwrap();
            assert!(unit.validate().is_ok(), "{} failed validation", symbol);
        }
    }

    #[test]
    fn test_by_category() {
        let pressure = UNITS.by_category("pressure");
        assert_eq!(pressure.len(), 9);
        assert!(pressure.iter().all(|u| u.dimensions.name() == Some("pressure")));
    }

    #[test]
    fn test_try_register_rejects_duplicates() {
        let mut registry = UnitRegistry::builtin();
        let dup = UnitDef::new("m", "meter again", 1.0, &[(LENGTH, 1)], "length");
        assert!(matches!(registry.try_register(dup), Err(ConversionError::InvalidDefinition { .. })));

        let furlong = UnitDef::new("furlong", "furlong", 201.168, &[(LENGTH, 1)], "length");
        registry.try_register(furlong).unwrap();
        assert!(registry.contains("furlong"));
    }

    #[test]
    fn test_try_alias_requires_target() {
        let mut registry = UnitRegistry::builtin();
        assert_eq!(
            registry.try_alias("metre", "nope"),
            Err(ConversionError::UnknownUnit("nope".to_string()))
        );
        registry.try_alias("metre", "m").unwrap();
        assert_eq!(registry.get("metre").unwrap().symbol, "m");
    }

    #[test]
    fn test_try_alias_rejects_unparseable_spellings() {
        let mut registry = UnitRegistry::builtin();
        for alias in ["m/s", " metre", "metre ", "", "m^2", "kg*m"] {
            assert!(
                matches!(registry.try_alias(alias, "m"), Err(ConversionError::InvalidDefinition { .. })),
                "alias {:?} was accepted",
                alias
            );
        }
        assert!(!registry.contains("m/s"));
    }

    #[test]
    fn test_extend_from_json_rejects_bad_alias() {
        let mut registry = UnitRegistry::empty();
        let result = registry.extend_from_json(
            r#"[{"symbol": "furlong", "factor": 201.168, "dimensions": {"L": 1}, "aliases": ["fur long "]}]"#,
        );
        assert!(matches!(result, Err(ConversionError::InvalidDefinition { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_extend_from_json() {
        let mut registry = UnitRegistry::builtin();
        let before = registry.len();
        let added = registry.extend_from_json(r#"[
            {"symbol": "furlong", "factor": 201.168, "dimensions": {"L": 1}, "aliases": ["furlongs"]},
            {"symbol": "fortnight", "factor": 1209600, "dimensions": {"T": 1}, "category": "time"}
        ]"#).unwrap();

        assert_eq!(added, 2);
        assert_eq!(registry.len(), before + 2);
        assert_eq!(registry.get("furlongs").unwrap().category, "length");
        assert_eq!(registry.get("fortnight").unwrap().name, "fortnight");
    }

    #[test]
    fn test_extend_from_json_is_all_or_nothing() {
        let mut registry = UnitRegistry::empty();
        let result = registry.extend_from_json(r#"[
            {"symbol": "a", "factor": 1.0, "dimensions": {"L": 1}},
            {"symbol": "b", "factor": -1.0, "dimensions": {"L": 1}}
        ]"#);

        assert!(matches!(result, Err(ConversionError::InvalidDefinition { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let result = UnitRegistry::from_json("{not json");
        assert!(matches!(result, Err(ConversionError::Config(_))));
    }
}
