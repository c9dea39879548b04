//! # Loanscope Analytics
//!
//! Loan position building and risk/return metrics for lending protocol
//! wallets.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every metric is derived from explicit inputs, with no I/O
//! - **Never NaN**: Divisions are guarded; undefined ratios resolve to `0.0` or `+∞`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loanscope_analytics::prelude::*;
//!
//! let records = RawReserveRecord::from_json_list(payload)?;
//! let loans = PositionBuilder::new(&markets, &feeds).build(&records, &prices);
//!
//! let config = AnalyticsConfig::default();
//! let metrics = calculate_all(&loans, &config);
//! let summary = PortfolioSummary::from_metrics(&metrics, &config);
//! ```
//!
//! ## Module Overview
//!
//! - [`builder`] - Groups raw reserve records into loan positions
//! - [`weighting`] - Value-weighted collateral parameters
//! - [`metrics`] - Per-loan metrics
//! - [`portfolio`] - Wallet-level rollup
//! - [`status`] - Health factor classification
//! - [`config`] - Analytics configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod config;
pub mod metrics;
pub mod portfolio;
pub mod status;
pub mod weighting;

pub use builder::{build_loan_positions, PositionBuilder};
pub use config::AnalyticsConfig;
pub use metrics::{calculate_all, primary_collateral, LoanMetrics};
pub use portfolio::{calculate_portfolio, PortfolioSummary};
pub use status::HealthStatus;
pub use weighting::{
    weighted_average, weighted_liq_threshold, weighted_max_ltv, weighted_supply_rate,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::{build_loan_positions, PositionBuilder};
    pub use crate::config::AnalyticsConfig;
    pub use crate::metrics::{calculate_all, LoanMetrics};
    pub use crate::portfolio::{calculate_portfolio, PortfolioSummary};
    pub use crate::status::HealthStatus;
    pub use crate::weighting::{weighted_liq_threshold, weighted_max_ltv, weighted_supply_rate};

    pub use loanscope_config::{MarketRegistry, PriceFeedRegistry, RiskThresholds};
    pub use loanscope_core::{AssetPosition, LoanPosition, PriceMap, RawReserveRecord};
}
