//! Immutable wallet snapshots and the store that publishes them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use loanscope_analytics::{calculate_all, AnalyticsConfig, LoanMetrics, PortfolioSummary};
use loanscope_core::LoanPosition;
use parking_lot::RwLock;
use serde::Serialize;

/// The result of one successful wallet refresh.
///
/// Never mutated after construction; a refresh publishes a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    wallet: String,
    loans: Vec<LoanPosition>,
    fetched_at: DateTime<Utc>,
}

impl WalletSnapshot {
    /// Creates a snapshot. The wallet address is lower-cased.
    #[must_use]
    pub fn new(
        wallet: impl Into<String>,
        loans: Vec<LoanPosition>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            wallet: wallet.into().to_lowercase(),
            loans,
            fetched_at,
        }
    }

    /// Wallet address.
    #[must_use]
    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    /// Loans in builder order.
    #[must_use]
    pub fn loans(&self) -> &[LoanPosition] {
        &self.loans
    }

    /// When the underlying data was fetched.
    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Looks up a loan by id.
    #[must_use]
    pub fn loan(&self, loan_id: &str) -> Option<&LoanPosition> {
        self.loans.iter().find(|loan| loan.id() == loan_id)
    }

    /// Metrics for the selected loan.
    ///
    /// Returns the neutral record when nothing is selected or the id is not
    /// part of this snapshot.
    #[must_use]
    pub fn metrics(&self, loan_id: Option<&str>, config: &AnalyticsConfig) -> LoanMetrics {
        LoanMetrics::calculate(loan_id.and_then(|id| self.loan(id)), config)
    }

    /// Metrics for every loan, in loan order.
    #[must_use]
    pub fn all_metrics(&self, config: &AnalyticsConfig) -> Vec<LoanMetrics> {
        calculate_all(&self.loans, config)
    }

    /// Portfolio rollup, or `None` for a wallet without loans.
    #[must_use]
    pub fn portfolio(&self, config: &AnalyticsConfig) -> Option<PortfolioSummary> {
        PortfolioSummary::from_metrics(&self.all_metrics(config), config)
    }
}

/// Holds the current snapshot.
///
/// Readers get a cheap `Arc` clone; a refresh swaps the whole snapshot in
/// one write, so readers never observe a half-updated wallet.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<WalletSnapshot>>>,
}

impl SnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<WalletSnapshot>> {
        self.current.read().clone()
    }

    /// Publishes `snapshot`, returning the one it replaced.
    pub fn replace(&self, snapshot: Arc<WalletSnapshot>) -> Option<Arc<WalletSnapshot>> {
        self.current.write().replace(snapshot)
    }
}
