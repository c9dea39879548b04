//! Acquisition seams.
//!
//! The engine never talks to the network itself. Callers plug in:
//! - [`ReserveSource`]: a wallet's raw reserve records for one market
//! - [`PriceSource`]: current USD prices for a set of feeds
//!
//! [`FallbackReserveSource`] chains several reserve sources, typically one
//! per endpoint of a market, and returns the first clean answer.

use std::sync::Arc;

use async_trait::async_trait;
use loanscope_config::{MarketConfig, PriceFeed};
use loanscope_core::{PriceMap, RawReserveRecord};
use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};

// =============================================================================
// TRAITS
// =============================================================================

/// Provider of raw reserve records.
#[async_trait]
pub trait ReserveSource: Send + Sync {
    /// Fetches every reserve record of `wallet` in `market`.
    ///
    /// The engine tags the returned records with the market id, so sources
    /// need not fill in [`RawReserveRecord::market`].
    async fn fetch_reserves(
        &self,
        market: &MarketConfig,
        wallet: &str,
    ) -> SourceResult<Vec<RawReserveRecord>>;
}

/// Provider of USD prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches current prices for `feeds`, keyed by feed symbol.
    ///
    /// Feeds without a price may simply be absent from the result.
    async fn fetch_prices(&self, feeds: &[PriceFeed]) -> SourceResult<PriceMap>;
}

// =============================================================================
// FALLBACK
// =============================================================================

/// Tries candidate sources in order and returns the first success.
///
/// Candidates are attempted one at a time. Any error (transport failure,
/// non-success status, application-level error) moves on to the next.
pub struct FallbackReserveSource {
    candidates: Vec<Arc<dyn ReserveSource>>,
}

impl FallbackReserveSource {
    /// Creates a fallback chain over `candidates`, highest priority first.
    #[must_use]
    pub fn new(candidates: Vec<Arc<dyn ReserveSource>>) -> Self {
        Self { candidates }
    }

    /// Appends a lower-priority candidate.
    #[must_use]
    pub fn with_candidate(mut self, candidate: Arc<dyn ReserveSource>) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl std::fmt::Debug for FallbackReserveSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackReserveSource")
            .field("candidates", &self.candidates.len())
            .finish()
    }
}

#[async_trait]
impl ReserveSource for FallbackReserveSource {
    async fn fetch_reserves(
        &self,
        market: &MarketConfig,
        wallet: &str,
    ) -> SourceResult<Vec<RawReserveRecord>> {
        let mut last_error = None;

        for (index, candidate) in self.candidates.iter().enumerate() {
            match candidate.fetch_reserves(market, wallet).await {
                Ok(records) => {
                    debug!(
                        market = %market.id,
                        candidate = index,
                        records = records.len(),
                        "Reserve fetch succeeded"
                    );
                    return Ok(records);
                }
                Err(e) => {
                    warn!(market = %market.id, candidate = index, error = %e, "Reserve fetch failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(SourceError::AllCandidatesFailed {
                attempts: self.candidates.len(),
                last: Box::new(last),
            }),
            None => Err(SourceError::NoCandidates),
        }
    }
}
