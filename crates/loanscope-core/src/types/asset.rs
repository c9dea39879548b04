//! A single token supplied or owed within one market.

use crate::units::MAX_RISK_FRACTION;
use serde::Serialize;

/// One token held or owed within one market for one wallet.
///
/// The USD value is always derived from `amount × usd_price`; every setter
/// that touches either input recomputes it, so the stored value can never
/// drift from its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPosition {
    symbol: String,
    address: String,
    amount: f64,
    usd_price: f64,
    usd_value: f64,
    collateral_enabled: bool,
    max_ltv: f64,
    liq_threshold: f64,
    supply_rate: f64,
    borrow_rate: f64,
}

impl AssetPosition {
    /// Creates a position with zeroed risk parameters.
    ///
    /// The symbol is upper-cased and the address lower-cased.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        address: impl Into<String>,
        amount: f64,
        usd_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            address: address.into().to_lowercase(),
            amount,
            usd_price,
            usd_value: usd_value_of(amount, usd_price),
            collateral_enabled: false,
            max_ltv: 0.0,
            liq_threshold: 0.0,
            supply_rate: 0.0,
            borrow_rate: 0.0,
        }
    }

    /// Sets whether the wallet uses this asset as collateral.
    #[must_use]
    pub fn with_collateral_enabled(mut self, enabled: bool) -> Self {
        self.collateral_enabled = enabled;
        self
    }

    /// Sets the maximum LTV fraction, clamped to `[0, 0.99]`.
    #[must_use]
    pub fn with_max_ltv(mut self, max_ltv: f64) -> Self {
        self.max_ltv = clamp_risk_fraction(max_ltv);
        self
    }

    /// Sets the liquidation threshold fraction, clamped to `[0, 0.99]`.
    #[must_use]
    pub fn with_liq_threshold(mut self, liq_threshold: f64) -> Self {
        self.liq_threshold = clamp_risk_fraction(liq_threshold);
        self
    }

    /// Sets the annual supply rate, floored at zero.
    #[must_use]
    pub fn with_supply_rate(mut self, rate: f64) -> Self {
        self.supply_rate = floor_rate(rate);
        self
    }

    /// Sets the annual variable borrow rate, floored at zero.
    #[must_use]
    pub fn with_borrow_rate(mut self, rate: f64) -> Self {
        self.borrow_rate = floor_rate(rate);
        self
    }

    /// Returns a copy repriced at `usd_price`.
    #[must_use]
    pub fn with_price(mut self, usd_price: f64) -> Self {
        self.usd_price = usd_price;
        self.usd_value = usd_value_of(self.amount, usd_price);
        self
    }

    /// Returns a copy with a different token amount.
    #[must_use]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self.usd_value = usd_value_of(amount, self.usd_price);
        self
    }

    /// Upper-case ticker.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Lower-case on-chain address of the underlying token.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Amount in decimal token units.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// USD price per token.
    #[must_use]
    pub fn usd_price(&self) -> f64 {
        self.usd_price
    }

    /// `amount × usd_price`.
    #[must_use]
    pub fn usd_value(&self) -> f64 {
        self.usd_value
    }

    /// Whether the wallet has enabled this asset as collateral.
    #[must_use]
    pub fn collateral_enabled(&self) -> bool {
        self.collateral_enabled
    }

    /// Maximum borrowable LTV contributed by this asset.
    #[must_use]
    pub fn max_ltv(&self) -> f64 {
        self.max_ltv
    }

    /// Liquidation threshold of this asset.
    #[must_use]
    pub fn liq_threshold(&self) -> f64 {
        self.liq_threshold
    }

    /// Annual supply rate as a fraction.
    #[must_use]
    pub fn supply_rate(&self) -> f64 {
        self.supply_rate
    }

    /// Annual variable borrow rate as a fraction.
    #[must_use]
    pub fn borrow_rate(&self) -> f64 {
        self.borrow_rate
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > 0.0
    }

    /// Returns true if this asset counts toward the market's collateral set.
    #[must_use]
    pub fn is_eligible_collateral(&self) -> bool {
        self.collateral_enabled && self.is_positive()
    }
}

fn usd_value_of(amount: f64, usd_price: f64) -> f64 {
    let value = amount * usd_price;
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

fn clamp_risk_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_RISK_FRACTION)
    }
}

fn floor_rate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}
