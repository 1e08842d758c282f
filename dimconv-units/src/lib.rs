//! dimconv Units - Composite unit parsing and conversion
//!
//! Converts values between unit expressions such as `kg*m/s^2` and `N`,
//! refusing conversions between units of different dimensions.
//! Temperature scales (C, F, K) are converted with affine formulas.
//!
//! Categories in the built-in table:
//! - Length (m, km, ft, mile, nmi, etc.)
//! - Mass (kg, g, lb, slug, etc.)
//! - Time (s, min, h, day, year)
//! - Force (N, lbf)
//! - Energy (J, cal, kWh, btu, etc.)
//! - Power (W, kW, hp)
//! - Area (acre, hectare)
//! - Volume (L, gal, quart, pint)
//! - Pressure (Pa, bar, psi, atm, mmHg, etc.)
//!
//! ```
//! let newtons = dimconv_units::convert("kg*m/s^2", "N", 1.0).unwrap();
//! assert_eq!(newtons, 1.0);
//! ```

mod analysis;
mod convert;
mod parse;
mod quantity;
mod registry;
mod temperature;
mod unit;

pub use convert::{convert, Converter, ConvertOptions};
pub use parse::{parse_composite, CompositeUnit, Factor};
pub use quantity::Quantity;
pub use registry::{UnitRegistry, UNITS};
pub use temperature::{convert_temperature, TemperatureMatching, TemperatureScale, TEMPERATURE_SYMBOLS};
pub use unit::UnitDef;

pub use dimconv_core::{ConversionError, DimensionVector, ErrorReport};
