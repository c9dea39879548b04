//! Builds loan positions from raw per-reserve records.
//!
//! Records are grouped by market tag in order of first appearance. Within
//! each market every record yields a supplied and a borrowed asset; entries
//! with a non-positive amount are dropped. Each remaining borrowed asset
//! becomes one [`LoanPosition`] paired with the market's full set of
//! collateral-enabled deposits. A market with deposits but no debt yields
//! no loans.

use loanscope_config::{MarketRegistry, PriceFeedRegistry};
use loanscope_core::{AssetPosition, LoanPosition, PriceMap, RawReserveRecord};
use tracing::debug;

/// Turns raw reserve records into loan positions.
///
/// Market display names and symbol aliases come from injected registries;
/// unknown markets keep their raw tag and unknown symbols are priced as-is.
///
/// # Example
///
/// ```ignore
/// let builder = PositionBuilder::new(&config.markets, &config.price_feeds);
/// let loans = builder.build(&records, &prices);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PositionBuilder<'a> {
    markets: &'a MarketRegistry,
    feeds: &'a PriceFeedRegistry,
}

impl<'a> PositionBuilder<'a> {
    /// Creates a builder over the given registries.
    #[must_use]
    pub fn new(markets: &'a MarketRegistry, feeds: &'a PriceFeedRegistry) -> Self {
        Self { markets, feeds }
    }

    /// Builds all loan positions for one wallet.
    ///
    /// Loan identifiers carry a sequence number that is unique across the
    /// whole result.
    #[must_use]
    pub fn build(&self, records: &[RawReserveRecord], prices: &PriceMap) -> Vec<LoanPosition> {
        let mut loans = Vec::new();

        for (market, group) in group_by_market(records) {
            let market_name = self.markets.display_name(market);
            let mut supplied = Vec::new();
            let mut borrowed = Vec::new();

            for record in group {
                let price = self.price_for(&record.reserve.symbol, prices);

                let deposit = self.asset_from(record, record.deposit_amount(), price);
                if deposit.is_positive() {
                    supplied.push(deposit);
                }

                let debt = self.asset_from(record, record.debt_amount(), price);
                if debt.is_positive() {
                    borrowed.push(debt);
                }
            }

            let collateral: Vec<AssetPosition> = supplied
                .into_iter()
                .filter(AssetPosition::is_eligible_collateral)
                .collect();

            debug!(
                market = market_name,
                collateral = collateral.len(),
                debts = borrowed.len(),
                "grouped market reserves"
            );

            for debt in borrowed {
                let sequence = loans.len();
                loans.push(
                    LoanPosition::new(market_name, debt, collateral.clone(), sequence)
                        .with_market_id(market),
                );
            }
        }

        loans
    }

    fn price_for(&self, symbol: &str, prices: &PriceMap) -> f64 {
        let canonical = self.feeds.canonical_symbol(symbol);
        match prices.get(&canonical) {
            Some(price) => price,
            None => {
                debug!(symbol, canonical = %canonical, "no usable price, valuing at zero");
                0.0
            }
        }
    }

    fn asset_from(&self, record: &RawReserveRecord, amount: f64, price: f64) -> AssetPosition {
        AssetPosition::new(
            record.reserve.symbol.as_str(),
            record.reserve.underlying_asset.as_str(),
            amount,
            price,
        )
        .with_collateral_enabled(record.collateral_enabled)
        .with_max_ltv(record.max_ltv())
        .with_liq_threshold(record.liq_threshold())
        .with_supply_rate(record.supply_rate())
        .with_borrow_rate(record.borrow_rate())
    }
}

/// Builds loan positions without market names or symbol aliases.
#[must_use]
pub fn build_loan_positions(records: &[RawReserveRecord], prices: &PriceMap) -> Vec<LoanPosition> {
    let markets = MarketRegistry::new();
    let feeds = PriceFeedRegistry::new();
    PositionBuilder::new(&markets, &feeds).build(records, prices)
}

/// Groups records by market tag, keeping first-appearance order.
fn group_by_market(records: &[RawReserveRecord]) -> Vec<(&str, Vec<&RawReserveRecord>)> {
    let mut groups: Vec<(&str, Vec<&RawReserveRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(m, _)| *m == record.market) {
            Some((_, group)) => group.push(record),
            None => groups.push((record.market.as_str(), vec![record])),
        }
    }
    groups
}
