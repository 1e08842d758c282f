//! dimconv Core - Fundamental types
//!
//! This crate provides the types shared by the dimconv crates:
//! - `DimensionVector`: exponents over base dimensions
//! - `ConversionError`: typed conversion failures
//! - `ErrorReport`: structured errors for host consumption

mod dimension;
mod error;

pub use dimension::{DimensionVector, LENGTH, MASS, TIME};
pub use error::{ConversionError, ErrorReport, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DimensionVector, ConversionError, ErrorReport};
    pub use crate::error::codes;
}
