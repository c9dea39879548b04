//! Configuration for loan and portfolio analytics computation.

use loanscope_config::RiskThresholds;
use serde::{Deserialize, Serialize};

/// Configuration for analytics computation.
///
/// Carries the advisory thresholds, the redeployment rate assumption and
/// how shared collateral is counted in portfolio rollups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Alert and status thresholds.
    pub thresholds: RiskThresholds,

    /// Annual yield earned on redeployed borrowed funds.
    ///
    /// The wallet's protocol data says nothing about where borrowed funds
    /// went, so this defaults to zero and is set by the caller.
    pub deploy_rate: f64,

    /// Count each market's shared collateral set once in portfolio sums.
    ///
    /// Off by default: every loan contributes its full collateral value.
    pub dedupe_shared_collateral: bool,
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the redeployment rate.
    #[must_use]
    pub fn with_deploy_rate(mut self, rate: f64) -> Self {
        self.deploy_rate = rate;
        self
    }

    /// Sets whether shared collateral is deduplicated per market.
    #[must_use]
    pub fn with_dedupe_shared_collateral(mut self, enabled: bool) -> Self {
        self.dedupe_shared_collateral = enabled;
        self
    }
}
