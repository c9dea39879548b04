//! Wallet refresh orchestration.

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use loanscope_analytics::{AnalyticsConfig, LoanMetrics, PortfolioSummary, PositionBuilder};
use loanscope_config::{LoanscopeConfig, MarketConfig};
use loanscope_core::{PriceMap, RawReserveRecord};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::snapshot::{SnapshotStore, WalletSnapshot};
use crate::source::{PriceSource, ReserveSource};

/// Refreshes a wallet's loans and publishes them as snapshots.
///
/// A refresh fetches every configured market concurrently and prices
/// independently of the markets. It either publishes a complete new
/// snapshot or fails and leaves the previous one in place. Only one
/// refresh runs at a time; overlapping calls fail fast with
/// [`EngineError::RefreshInProgress`].
pub struct WalletMonitor {
    config: LoanscopeConfig,
    analytics: AnalyticsConfig,
    reserves: Arc<dyn ReserveSource>,
    prices: Arc<dyn PriceSource>,
    store: SnapshotStore,
    refresh_guard: Mutex<()>,
}

impl WalletMonitor {
    /// Creates a monitor. Analytics use the thresholds from `config`.
    #[must_use]
    pub fn new(
        config: LoanscopeConfig,
        reserves: Arc<dyn ReserveSource>,
        prices: Arc<dyn PriceSource>,
    ) -> Self {
        let analytics = AnalyticsConfig::default().with_thresholds(config.thresholds);
        Self {
            config,
            analytics,
            reserves,
            prices,
            store: SnapshotStore::new(),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Replaces the analytics configuration.
    #[must_use]
    pub fn with_analytics(mut self, analytics: AnalyticsConfig) -> Self {
        self.analytics = analytics;
        self
    }

    /// Markets, feeds and thresholds in use.
    #[must_use]
    pub fn config(&self) -> &LoanscopeConfig {
        &self.config
    }

    /// Analytics configuration in use.
    #[must_use]
    pub fn analytics(&self) -> &AnalyticsConfig {
        &self.analytics
    }

    /// The last published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<WalletSnapshot>> {
        self.store.current()
    }

    /// Metrics for a loan of the current snapshot.
    ///
    /// Neutral when there is no snapshot, no selection or an unknown id.
    #[must_use]
    pub fn metrics(&self, loan_id: Option<&str>) -> LoanMetrics {
        match self.store.current() {
            Some(snapshot) => snapshot.metrics(loan_id, &self.analytics),
            None => LoanMetrics::neutral(&self.analytics),
        }
    }

    /// Portfolio rollup of the current snapshot.
    #[must_use]
    pub fn portfolio(&self) -> Option<PortfolioSummary> {
        self.store
            .current()
            .and_then(|snapshot| snapshot.portfolio(&self.analytics))
    }

    /// Fetches fresh data for `wallet` and publishes a new snapshot.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidWallet`] for an empty address
    /// - [`EngineError::RefreshInProgress`] while another refresh runs
    /// - [`EngineError::Reserves`] if any market fails on every candidate
    /// - [`EngineError::Prices`] if prices cannot be fetched
    ///
    /// On error the stored snapshot is unchanged.
    pub async fn refresh(&self, wallet: &str) -> EngineResult<Arc<WalletSnapshot>> {
        let wallet = normalize_wallet(wallet)?;
        let _guard = self
            .refresh_guard
            .try_lock()
            .map_err(|_| EngineError::RefreshInProgress)?;

        info!(wallet = %wallet, markets = self.config.markets.len(), "Refreshing wallet");

        let reserves = try_join_all(
            self.config
                .markets
                .iter()
                .map(|market| self.fetch_market(market, &wallet)),
        );
        let prices = async {
            self.prices
                .fetch_prices(self.config.price_feeds.feeds())
                .await
                .map_err(EngineError::Prices)
        };

        let (per_market, prices) = match futures::try_join!(reserves, prices) {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(wallet = %wallet, error = %e, "Refresh failed; keeping previous snapshot");
                return Err(e);
            }
        };

        let records: Vec<RawReserveRecord> = per_market.into_iter().flatten().collect();
        self.report_missing_prices(&records, &prices);

        let loans = PositionBuilder::new(&self.config.markets, &self.config.price_feeds)
            .build(&records, &prices);
        let snapshot = Arc::new(WalletSnapshot::new(wallet, loans, Utc::now()));
        self.store.replace(Arc::clone(&snapshot));

        info!(
            wallet = %snapshot.wallet(),
            records = records.len(),
            loans = snapshot.loans().len(),
            "Wallet snapshot published"
        );
        Ok(snapshot)
    }

    async fn fetch_market(
        &self,
        market: &MarketConfig,
        wallet: &str,
    ) -> EngineResult<Vec<RawReserveRecord>> {
        let records = self
            .reserves
            .fetch_reserves(market, wallet)
            .await
            .map_err(|source| EngineError::Reserves {
                market: market.id.clone(),
                source,
            })?;

        debug!(market = %market.id, records = records.len(), "Fetched reserves");
        Ok(records
            .into_iter()
            .map(|record| record.with_market(market.id.as_str()))
            .collect())
    }

    /// Held positions without a price are valued at zero; surface them.
    fn report_missing_prices(&self, records: &[RawReserveRecord], prices: &PriceMap) {
        let held: Vec<String> = records
            .iter()
            .filter(|r| r.deposit_amount() > 0.0 || r.debt_amount() > 0.0)
            .map(|r| self.config.price_feeds.canonical_symbol(&r.reserve.symbol))
            .collect();

        let missing = prices.missing(held.iter().map(String::as_str));
        if !missing.is_empty() {
            warn!(symbols = ?missing, "No price for held assets; valuing them at zero");
        }
    }
}

impl std::fmt::Debug for WalletMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMonitor")
            .field("markets", &self.config.markets.len())
            .field("analytics", &self.analytics)
            .field("snapshot", &self.store.current().map(|s| s.wallet().to_string()))
            .finish()
    }
}

fn normalize_wallet(wallet: &str) -> EngineResult<String> {
    let trimmed = wallet.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidWallet(wallet.to_string()));
    }
    Ok(trimmed.to_lowercase())
}
