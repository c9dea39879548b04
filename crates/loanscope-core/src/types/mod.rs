//! Domain value types.
//!
//! - [`AssetPosition`]: one token supplied or owed in one market
//! - [`LoanPosition`]: one borrowed asset paired with its market's collateral
//! - [`RawReserveRecord`]: upstream per-reserve record
//! - [`PriceMap`]: ticker to USD price lookup

mod asset;
mod loan;
mod prices;
mod raw;

pub use asset::AssetPosition;
pub use loan::LoanPosition;
pub use prices::PriceMap;
pub use raw::{RawReserveRecord, ReserveMetadata};
