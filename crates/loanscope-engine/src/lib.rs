//! # Loanscope Engine
//!
//! Wallet refresh lifecycle around the pure analytics crates.
//!
//! Data acquisition is injected through two async traits:
//!
//! - [`ReserveSource`] returns a wallet's raw reserve records for a market
//! - [`PriceSource`] returns USD prices for the configured feeds
//!
//! [`WalletMonitor::refresh`] fetches all markets concurrently, builds loan
//! positions and publishes an immutable [`WalletSnapshot`]. A failed refresh
//! leaves the previous snapshot in place.
//!
//! ## Example
//!
//! ```rust,ignore
//! use loanscope_engine::prelude::*;
//!
//! let monitor = WalletMonitor::new(config, reserves, prices);
//! let snapshot = monitor.refresh("0xAbC...").await?;
//!
//! let selected = monitor.metrics(snapshot.loans().first().map(|l| l.id()));
//! let summary = monitor.portfolio();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod monitor;
pub mod snapshot;
pub mod source;

pub use error::{EngineError, EngineResult, SourceError, SourceResult};
pub use monitor::WalletMonitor;
pub use snapshot::{SnapshotStore, WalletSnapshot};
pub use source::{FallbackReserveSource, PriceSource, ReserveSource};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{EngineError, EngineResult, SourceError, SourceResult};
    pub use crate::monitor::WalletMonitor;
    pub use crate::snapshot::{SnapshotStore, WalletSnapshot};
    pub use crate::source::{FallbackReserveSource, PriceSource, ReserveSource};

    pub use loanscope_analytics::{AnalyticsConfig, HealthStatus, LoanMetrics, PortfolioSummary};
    pub use loanscope_config::{LoanscopeConfig, MarketConfig, PriceFeed};
    pub use loanscope_core::{LoanPosition, PriceMap, RawReserveRecord};
}
