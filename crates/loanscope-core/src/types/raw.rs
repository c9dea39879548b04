//! Raw per-reserve records as returned by the lending subgraph.
//!
//! Field names follow the upstream camelCase JSON. Numeric fields may
//! arrive either as JSON strings or as JSON numbers; both decode into the
//! string form expected by [`crate::units`].

use crate::error::CoreResult;
use crate::units::{base_units_to_decimal, basis_points_to_fraction, ray_to_fraction};
use serde::{Deserialize, Deserializer, Serialize};

/// A wallet's balance in one reserve of one market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReserveRecord {
    /// Market tag attached by the acquisition layer.
    #[serde(default)]
    pub market: String,

    /// Deposit balance in base units.
    #[serde(rename = "currentATokenBalance", default, deserialize_with = "string_or_number")]
    pub deposit_balance: String,

    /// Total debt balance in base units.
    #[serde(rename = "currentTotalDebt", default, deserialize_with = "string_or_number")]
    pub debt_balance: String,

    /// Whether the wallet uses the deposit as collateral.
    #[serde(rename = "usageAsCollateralEnabledOnUser", default)]
    pub collateral_enabled: bool,

    /// Reserve metadata.
    pub reserve: ReserveMetadata,
}

/// Static and rate data of one reserve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReserveMetadata {
    /// Token ticker.
    #[serde(default)]
    pub symbol: String,

    /// Token decimals.
    #[serde(default, deserialize_with = "decimals_from_any")]
    pub decimals: u32,

    /// Underlying token address.
    #[serde(rename = "underlyingAsset", default)]
    pub underlying_asset: String,

    /// Max LTV in basis points.
    #[serde(rename = "baseLTVasCollateral", default, deserialize_with = "string_or_number")]
    pub base_ltv_bps: String,

    /// Liquidation threshold in basis points.
    #[serde(
        rename = "reserveLiquidationThreshold",
        default,
        deserialize_with = "string_or_number"
    )]
    pub liquidation_threshold_bps: String,

    /// Supply rate in ray.
    #[serde(rename = "liquidityRate", default, deserialize_with = "string_or_number")]
    pub liquidity_rate_ray: String,

    /// Variable borrow rate in ray.
    #[serde(rename = "variableBorrowRate", default, deserialize_with = "string_or_number")]
    pub variable_borrow_rate_ray: String,
}

impl RawReserveRecord {
    /// Decodes a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Deserialization`] if the payload is not a
    /// JSON array of reserve records.
    pub fn from_json_list(json: &str) -> CoreResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Tags this record with its source market.
    #[must_use]
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// Deposit balance in decimal token units.
    #[must_use]
    pub fn deposit_amount(&self) -> f64 {
        base_units_to_decimal(&self.deposit_balance, self.reserve.decimals)
    }

    /// Debt balance in decimal token units.
    #[must_use]
    pub fn debt_amount(&self) -> f64 {
        base_units_to_decimal(&self.debt_balance, self.reserve.decimals)
    }

    /// Max LTV as a fraction in `[0, 0.99]`.
    #[must_use]
    pub fn max_ltv(&self) -> f64 {
        basis_points_to_fraction(&self.reserve.base_ltv_bps)
    }

    /// Liquidation threshold as a fraction in `[0, 0.99]`.
    #[must_use]
    pub fn liq_threshold(&self) -> f64 {
        basis_points_to_fraction(&self.reserve.liquidation_threshold_bps)
    }

    /// Annual supply rate.
    #[must_use]
    pub fn supply_rate(&self) -> f64 {
        ray_to_fraction(&self.reserve.liquidity_rate_ray)
    }

    /// Annual variable borrow rate.
    #[must_use]
    pub fn borrow_rate(&self) -> f64 {
        ray_to_fraction(&self.reserve.variable_borrow_rate_ray)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
    Null(()),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Number(n) => n.to_string(),
            Self::Null(()) => String::new(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into_string())
}

/// Unparseable decimals decode as 0 rather than failing the payload.
fn decimals_from_any<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = StringOrNumber::deserialize(deserializer)?.into_string();
    Ok(raw.trim().parse().unwrap_or(0))
}
