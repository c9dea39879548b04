//! # Loanscope Core
//!
//! Value types and fixed-point conversions shared by the Loanscope crates.
//!
//! ## Module Overview
//!
//! - [`units`] - Basis-point, ray and base-unit converters
//! - [`types`] - Asset and loan positions, raw reserve records, price map
//! - [`error`] - Core error types
//!
//! All values are immutable snapshots: a refresh produces new values rather
//! than mutating old ones.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod types;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use types::{AssetPosition, LoanPosition, PriceMap, RawReserveRecord, ReserveMetadata};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        AssetPosition, LoanPosition, PriceMap, RawReserveRecord, ReserveMetadata,
    };
    pub use crate::units::{base_units_to_decimal, basis_points_to_fraction, ray_to_fraction};
}
