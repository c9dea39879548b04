//! Loanscope Configuration Layer
//!
//! Immutable configuration injected into the position builder and the
//! acquisition collaborators, instead of module-level constant tables.
//!
//! # Features
//!
//! - **Market Registry**: market tags, display names, ordered candidate endpoints
//! - **Price Feeds**: ticker to feed id, plus aliases for wrapped tokens
//! - **Risk Thresholds**: advisory alert and status thresholds
//! - **Loading**: TOML or JSON documents, validated on load
//!
//! # Example
//!
//! ```rust
//! use loanscope_config::{MarketConfig, MarketRegistry, PriceFeed, PriceFeedRegistry};
//!
//! let markets = MarketRegistry::new().with_market(
//!     MarketConfig::new("aave-v3-ethereum", "Aave V3 Ethereum")
//!         .with_endpoint("https://primary.example/graphql"),
//! );
//! let feeds = PriceFeedRegistry::new()
//!     .with_feed(PriceFeed::new("ETH", "0xff61"))
//!     .with_alias("WETH", "ETH");
//!
//! assert_eq!(markets.display_name("aave-v3-ethereum"), "Aave V3 Ethereum");
//! assert_eq!(feeds.canonical_symbol("weth"), "ETH");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod feeds;
mod market;
mod settings;
mod thresholds;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use feeds::{PriceFeed, PriceFeedRegistry};
pub use market::{MarketConfig, MarketRegistry};
pub use settings::LoanscopeConfig;
pub use thresholds::RiskThresholds;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::feeds::{PriceFeed, PriceFeedRegistry};
    pub use crate::market::{MarketConfig, MarketRegistry};
    pub use crate::settings::LoanscopeConfig;
    pub use crate::thresholds::RiskThresholds;
}
