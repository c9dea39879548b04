//! A borrowed-asset exposure paired with its market's collateral.

use super::AssetPosition;
use crate::error::{CoreError, CoreResult};
use serde::Serialize;

/// One borrowed asset within one market, paired with the wallet's eligible
/// collateral in that market.
///
/// Several loans in the same market share one collateral set: each loan
/// carries the full set and the full `total_supplied_usd`, it is not split
/// between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPosition {
    id: String,
    market_id: String,
    market_name: String,
    borrowed: AssetPosition,
    supplied: Vec<AssetPosition>,
    total_supplied_usd: f64,
    total_borrowed_usd: f64,
}

impl LoanPosition {
    /// Creates a loan position.
    ///
    /// Supplied assets that are not eligible collateral (disabled or with a
    /// non-positive amount) are dropped; the order of the rest is kept.
    /// The identifier is `"{market}:{borrowed address}:{sequence}"`. The
    /// market tag defaults to the market name; see [`Self::with_market_id`].
    #[must_use]
    pub fn new(
        market_name: impl Into<String>,
        borrowed: AssetPosition,
        supplied: Vec<AssetPosition>,
        sequence: usize,
    ) -> Self {
        let market_name = market_name.into();
        let supplied: Vec<AssetPosition> = supplied
            .into_iter()
            .filter(AssetPosition::is_eligible_collateral)
            .collect();

        let total_supplied_usd = supplied.iter().map(AssetPosition::usd_value).sum();
        let total_borrowed_usd = borrowed.usd_value();
        let id = format!("{}:{}:{}", market_name, borrowed.address(), sequence);

        Self {
            id,
            market_id: market_name.clone(),
            market_name,
            borrowed,
            supplied,
            total_supplied_usd,
            total_borrowed_usd,
        }
    }

    /// Unique identifier within one wallet snapshot.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the market tag the loan was built from.
    #[must_use]
    pub fn with_market_id(mut self, market_id: impl Into<String>) -> Self {
        self.market_id = market_id.into();
        self
    }

    /// Market tag; distinct markets may share a display name.
    #[must_use]
    pub fn market_id(&self) -> &str {
        &self.market_id
    }

    /// Display name of the market.
    #[must_use]
    pub fn market_name(&self) -> &str {
        &self.market_name
    }

    /// The borrowed asset.
    #[must_use]
    pub fn borrowed(&self) -> &AssetPosition {
        &self.borrowed
    }

    /// Eligible collateral, in the order it was supplied.
    #[must_use]
    pub fn supplied(&self) -> &[AssetPosition] {
        &self.supplied
    }

    /// Sum of collateral USD value.
    #[must_use]
    pub fn total_supplied_usd(&self) -> f64 {
        self.total_supplied_usd
    }

    /// USD value of the debt.
    #[must_use]
    pub fn total_borrowed_usd(&self) -> f64 {
        self.total_borrowed_usd
    }

    /// Checks that the borrowed side carries positive debt.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPosition`] if the borrowed amount is not
    /// strictly positive.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.borrowed.is_positive() {
            return Err(CoreError::invalid_position(
                &self.id,
                "borrowed amount must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collateral(symbol: &str, amount: f64, price: f64, enabled: bool) -> AssetPosition {
        AssetPosition::new(symbol, format!("0x{}", symbol.to_lowercase()), amount, price)
            .with_collateral_enabled(enabled)
            .with_liq_threshold(0.8)
    }

    fn usdc_debt(amount: f64) -> AssetPosition {
        AssetPosition::new("USDC", "0xA0B8", amount, 1.0).with_borrow_rate(0.05)
    }

    #[test]
    fn test_totals_and_id() {
        let loan = LoanPosition::new(
            "Aave V3 Ethereum",
            usdc_debt(15_000.0),
            vec![collateral("WETH", 10.0, 3_000.0, true)],
            0,
        );

        assert_eq!(loan.id(), "Aave V3 Ethereum:0xa0b8:0");
        assert_eq!(loan.total_supplied_usd(), 30_000.0);
        assert_eq!(loan.total_borrowed_usd(), 15_000.0);
        assert!(loan.validate().is_ok());
    }

    #[test]
    fn test_drops_ineligible_collateral() {
        let loan = LoanPosition::new(
            "m",
            usdc_debt(1.0),
            vec![
                collateral("WETH", 1.0, 2_000.0, true),
                collateral("WBTC", 1.0, 60_000.0, false),
                collateral("DAI", 0.0, 1.0, true),
                collateral("LINK", 10.0, 15.0, true),
            ],
            3,
        );

        let symbols: Vec<&str> = loan.supplied().iter().map(AssetPosition::symbol).collect();
        assert_eq!(symbols, vec!["WETH", "LINK"]);
        assert_eq!(loan.total_supplied_usd(), 2_150.0);
    }

    #[test]
    fn test_validate_rejects_zero_debt() {
        let loan = LoanPosition::new("m", usdc_debt(0.0), vec![], 0);
        let err = loan.validate().unwrap_err();
        assert!(err.to_string().contains("borrowed amount"));
    }
}
