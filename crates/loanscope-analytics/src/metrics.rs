//! Risk and return metrics for a single loan.
//!
//! Every metric is a pure function of one [`LoanPosition`] and the
//! [`AnalyticsConfig`]. Divisions are guarded and no field is ever NaN:
//! undefined ratios resolve to `0.0` or `+∞` as documented per field.
//!
//! ## Liquidation price approximation
//!
//! The liquidation price is solved for the *primary* collateral (the asset
//! with the largest USD value) alone, holding every other collateral asset
//! at its current USD value. With several volatile collateral assets the
//! true liquidation surface depends on all prices jointly; this figure is a
//! single-asset linear approximation of it.

use crate::config::AnalyticsConfig;
use crate::status::HealthStatus;
use crate::weighting::{weighted_liq_threshold, weighted_max_ltv, weighted_supply_rate};
use loanscope_config::RiskThresholds;
use loanscope_core::{AssetPosition, LoanPosition};
use serde::Serialize;

/// Derived metrics for one loan.
///
/// A "no selection" record is built with [`LoanMetrics::neutral`]: zero
/// debt, zero rates, `health_factor = +∞`. It is a fully populated value,
/// so callers never branch on a missing record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanMetrics {
    /// Loan identifier, `None` for the neutral record.
    pub loan_id: Option<String>,

    /// Market tag, `None` for the neutral record.
    pub market_id: Option<String>,

    /// Market display name, `None` for the neutral record.
    pub market_name: Option<String>,

    // =========================================================================
    // BALANCES
    // =========================================================================
    /// Total collateral value in USD.
    pub collateral_usd: f64,

    /// Debt value in USD.
    pub debt_usd: f64,

    /// `collateral_usd − debt_usd`.
    pub equity_usd: f64,

    // =========================================================================
    // WEIGHTED COLLATERAL PARAMETERS
    // =========================================================================
    /// USD-weighted max LTV of the collateral.
    pub ltv_max: f64,

    /// USD-weighted liquidation threshold of the collateral.
    pub liq_threshold: f64,

    /// USD-weighted supply rate of the collateral.
    pub supply_rate: f64,

    /// Variable borrow rate of the borrowed asset.
    pub borrow_rate: f64,

    /// Assumed yield on redeployed borrowed funds.
    pub deploy_rate: f64,

    // =========================================================================
    // SOLVENCY
    // =========================================================================
    /// `debt / collateral`, 0 without collateral.
    pub ltv: f64,

    /// `collateral / equity`, +∞ when equity is not positive.
    pub leverage: f64,

    /// `collateral × liq_threshold / debt`, +∞ without debt.
    pub health_factor: f64,

    // =========================================================================
    // LIQUIDATION
    // =========================================================================
    /// Ticker of the largest collateral asset.
    pub primary_collateral: Option<String>,

    /// Current USD price of the primary collateral, 0 without one.
    pub primary_price: f64,

    /// Total collateral value at which the health factor is exactly 1.
    pub collateral_usd_at_liq: f64,

    /// Primary collateral value at liquidation, others held constant.
    pub primary_usd_at_liq: f64,

    /// Primary collateral price at liquidation, +∞ without one.
    pub liq_price: f64,

    /// LTV at the liquidation point.
    pub ltv_at_liq: f64,

    /// Fractional primary price decline that triggers liquidation.
    ///
    /// Unclamped; see [`price_drop_to_liq_clamped`](Self::price_drop_to_liq_clamped).
    pub price_drop_to_liq: f64,

    /// `collateral_usd − collateral_usd_at_liq`.
    pub collateral_buffer_usd: f64,

    // =========================================================================
    // CARRY (annual, USD)
    // =========================================================================
    /// `collateral × supply_rate`.
    pub supply_earn_usd: f64,

    /// `debt × borrow_rate`.
    pub borrow_cost_usd: f64,

    /// `debt × deploy_rate`.
    pub deploy_earn_usd: f64,

    /// Supply earn plus deploy earn minus borrow cost.
    pub net_earn_usd: f64,

    /// `net_earn / equity`, 0 when equity is not positive.
    pub net_apy_on_equity: f64,

    // =========================================================================
    // CAPACITY AND SENSITIVITY
    // =========================================================================
    /// `collateral × ltv_max`.
    pub max_borrow_by_ltv: f64,

    /// `max_borrow_by_ltv − debt`.
    pub borrow_headroom: f64,

    /// `debt / max_borrow_by_ltv`, 0 without borrowing power.
    pub borrow_power_used: f64,

    /// First-order equity move for a collateral price move of `price_shock`.
    pub equity_move_for_shock: f64,

    // =========================================================================
    // ALERTS
    // =========================================================================
    /// Health factor below the alert threshold.
    pub alert_hf: bool,

    /// LTV above the alert fraction of the liquidation threshold.
    pub alert_ltv: bool,
}

impl LoanMetrics {
    /// Calculates metrics for a selected loan, or the neutral record for `None`.
    #[must_use]
    pub fn calculate(loan: Option<&LoanPosition>, config: &AnalyticsConfig) -> Self {
        match loan {
            Some(loan) => Self::for_loan(loan, config),
            None => Self::neutral(config),
        }
    }

    /// Calculates metrics for one loan.
    #[must_use]
    pub fn for_loan(loan: &LoanPosition, config: &AnalyticsConfig) -> Self {
        Self::derive(
            LoanInputs {
                loan_id: Some(loan.id().to_string()),
                market_id: Some(loan.market_id().to_string()),
                market_name: Some(loan.market_name().to_string()),
                collateral: loan.supplied(),
                collateral_usd: loan.total_supplied_usd(),
                debt_usd: loan.total_borrowed_usd(),
                borrow_rate: loan.borrowed().borrow_rate(),
            },
            config,
        )
    }

    /// The "no selection" record.
    ///
    /// Runs the same derivation over an empty loan, so every field follows
    /// the documented zero-input rules.
    #[must_use]
    pub fn neutral(config: &AnalyticsConfig) -> Self {
        Self::derive(
            LoanInputs {
                loan_id: None,
                market_id: None,
                market_name: None,
                collateral: &[],
                collateral_usd: 0.0,
                debt_usd: 0.0,
                borrow_rate: 0.0,
            },
            config,
        )
    }

    fn derive(inputs: LoanInputs<'_>, config: &AnalyticsConfig) -> Self {
        let thresholds = &config.thresholds;
        let collateral = inputs.collateral_usd;
        let debt = inputs.debt_usd;
        let equity = collateral - debt;

        let ltv_max = weighted_max_ltv(inputs.collateral);
        let lt = weighted_liq_threshold(inputs.collateral);
        let supply_rate = weighted_supply_rate(inputs.collateral);
        let borrow_rate = inputs.borrow_rate;
        let deploy_rate = config.deploy_rate;

        let ltv = not_nan(if collateral > 0.0 { debt / collateral } else { 0.0 });
        let leverage = if equity > 0.0 {
            collateral / equity
        } else {
            f64::INFINITY
        };
        let health_factor = not_nan(if debt > 0.0 {
            collateral * lt / debt
        } else {
            f64::INFINITY
        });

        let primary = primary_collateral(inputs.collateral);
        let primary_usd = primary.map_or(0.0, AssetPosition::usd_value);
        let primary_price = primary.map_or(0.0, AssetPosition::usd_price);

        let collateral_usd_at_liq = if lt > 0.0 { debt / lt } else { f64::INFINITY };
        let primary_usd_at_liq = collateral_usd_at_liq - (collateral - primary_usd);
        let liq_price = match primary {
            Some(asset) if asset.amount() > 0.0 => primary_usd_at_liq / asset.amount(),
            _ => f64::INFINITY,
        };
        let ltv_at_liq = if collateral_usd_at_liq > 0.0 {
            debt / collateral_usd_at_liq
        } else {
            0.0
        };
        let price_drop_to_liq = if primary_price > 0.0 && liq_price.is_finite() {
            (primary_price - liq_price) / primary_price
        } else {
            0.0
        };

        let supply_earn_usd = collateral * supply_rate;
        let borrow_cost_usd = debt * borrow_rate;
        let deploy_earn_usd = debt * deploy_rate;
        let net_earn_usd = supply_earn_usd + deploy_earn_usd - borrow_cost_usd;
        let net_apy_on_equity = if equity > 0.0 {
            net_earn_usd / equity
        } else {
            0.0
        };

        let max_borrow_by_ltv = collateral * ltv_max;
        let borrow_headroom = max_borrow_by_ltv - debt;
        let borrow_power_used = if max_borrow_by_ltv > 0.0 {
            debt / max_borrow_by_ltv
        } else {
            0.0
        };

        let equity_move_for_shock = if leverage.is_finite() {
            leverage * thresholds.price_shock
        } else {
            0.0
        };

        Self {
            loan_id: inputs.loan_id,
            market_id: inputs.market_id,
            market_name: inputs.market_name,
            collateral_usd: not_nan(collateral),
            debt_usd: not_nan(debt),
            equity_usd: not_nan(equity),
            ltv_max: not_nan(ltv_max),
            liq_threshold: not_nan(lt),
            supply_rate: not_nan(supply_rate),
            borrow_rate: not_nan(borrow_rate),
            deploy_rate: not_nan(deploy_rate),
            ltv,
            leverage: not_nan(leverage),
            health_factor,
            primary_collateral: primary.map(|a| a.symbol().to_string()),
            primary_price: not_nan(primary_price),
            collateral_usd_at_liq: not_nan(collateral_usd_at_liq),
            primary_usd_at_liq: not_nan(primary_usd_at_liq),
            liq_price: not_nan(liq_price),
            ltv_at_liq: not_nan(ltv_at_liq),
            price_drop_to_liq: not_nan(price_drop_to_liq),
            collateral_buffer_usd: not_nan(collateral - collateral_usd_at_liq),
            supply_earn_usd: not_nan(supply_earn_usd),
            borrow_cost_usd: not_nan(borrow_cost_usd),
            deploy_earn_usd: not_nan(deploy_earn_usd),
            net_earn_usd: not_nan(net_earn_usd),
            net_apy_on_equity: not_nan(net_apy_on_equity),
            max_borrow_by_ltv: not_nan(max_borrow_by_ltv),
            borrow_headroom: not_nan(borrow_headroom),
            borrow_power_used: not_nan(borrow_power_used),
            equity_move_for_shock: not_nan(equity_move_for_shock),
            alert_hf: health_factor < thresholds.alert_health_factor,
            alert_ltv: ltv > thresholds.alert_ltv_fraction * lt,
        }
    }

    /// Health status under `thresholds`.
    #[must_use]
    pub fn health_status(&self, thresholds: &RiskThresholds) -> HealthStatus {
        HealthStatus::classify(self.health_factor, thresholds)
    }

    /// [`price_drop_to_liq`](Self::price_drop_to_liq) clamped to `[0, 1]` for display.
    #[must_use]
    pub fn price_drop_to_liq_clamped(&self) -> f64 {
        self.price_drop_to_liq.clamp(0.0, 1.0)
    }

    /// Returns true if any alert flag is set.
    #[must_use]
    pub fn has_alert(&self) -> bool {
        self.alert_hf || self.alert_ltv
    }

    /// Returns true for the "no selection" record.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.loan_id.is_none()
    }
}

impl Default for LoanMetrics {
    fn default() -> Self {
        Self::neutral(&AnalyticsConfig::default())
    }
}

/// Calculates metrics for every loan, preserving order.
#[must_use]
pub fn calculate_all(loans: &[LoanPosition], config: &AnalyticsConfig) -> Vec<LoanMetrics> {
    loans
        .iter()
        .map(|loan| LoanMetrics::for_loan(loan, config))
        .collect()
}

/// Returns the collateral asset with the largest USD value.
///
/// On an exact tie the first asset in input order wins.
#[must_use]
pub fn primary_collateral(assets: &[AssetPosition]) -> Option<&AssetPosition> {
    assets.iter().fold(None, |best: Option<&AssetPosition>, asset| match best {
        Some(current) if asset.usd_value() <= current.usd_value() => Some(current),
        _ => Some(asset),
    })
}

struct LoanInputs<'a> {
    loan_id: Option<String>,
    market_id: Option<String>,
    market_name: Option<String>,
    collateral: &'a [AssetPosition],
    collateral_usd: f64,
    debt_usd: f64,
    borrow_rate: f64,
}

fn not_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eth(amount: f64, price: f64) -> AssetPosition {
        AssetPosition::new("WETH", "0xc02a", amount, price)
            .with_collateral_enabled(true)
            .with_max_ltv(0.80)
            .with_liq_threshold(0.825)
            .with_supply_rate(0.02)
    }

    fn usdc_debt(amount: f64) -> AssetPosition {
        AssetPosition::new("USDC", "0xa0b8", amount, 1.0).with_borrow_rate(0.05)
    }

    fn scenario_a() -> LoanPosition {
        LoanPosition::new("Aave V3 Ethereum", usdc_debt(15_000.0), vec![eth(10.0, 3_000.0)], 0)
    }

    #[test]
    fn test_single_collateral_loan() {
        let m = LoanMetrics::for_loan(&scenario_a(), &AnalyticsConfig::default());

        assert_relative_eq!(m.collateral_usd, 30_000.0, epsilon = 1e-9);
        assert_relative_eq!(m.debt_usd, 15_000.0, epsilon = 1e-9);
        assert_relative_eq!(m.equity_usd, 15_000.0, epsilon = 1e-9);
        assert_relative_eq!(m.ltv, 0.50, epsilon = 1e-9);
        assert_relative_eq!(m.health_factor, 1.65, epsilon = 1e-12);
        assert_relative_eq!(m.leverage, 2.0, epsilon = 1e-9);
        assert_relative_eq!(m.ltv_max, 0.80, epsilon = 1e-12);
        assert_relative_eq!(m.liq_threshold, 0.825, epsilon = 1e-12);
        assert_eq!(m.primary_collateral.as_deref(), Some("WETH"));
        assert_eq!(m.loan_id.as_deref(), Some("Aave V3 Ethereum:0xa0b8:0"));
    }

    #[test]
    fn test_liquidation_figures() {
        let m = LoanMetrics::for_loan(&scenario_a(), &AnalyticsConfig::default());

        // 15,000 / 0.825
        let at_liq = 15_000.0 / 0.825;
        assert_relative_eq!(m.collateral_usd_at_liq, at_liq, epsilon = 1e-6);
        // single collateral: primary carries the whole value
        assert_relative_eq!(m.primary_usd_at_liq, at_liq, epsilon = 1e-6);
        assert_relative_eq!(m.liq_price, at_liq / 10.0, epsilon = 1e-6);
        assert_relative_eq!(m.ltv_at_liq, 0.825, epsilon = 1e-12);
        assert_relative_eq!(
            m.price_drop_to_liq,
            (3_000.0 - at_liq / 10.0) / 3_000.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(m.collateral_buffer_usd, 30_000.0 - at_liq, epsilon = 1e-6);
    }

    #[test]
    fn test_carry_and_capacity() {
        let config = AnalyticsConfig::default().with_deploy_rate(0.04);
        let m = LoanMetrics::for_loan(&scenario_a(), &config);

        assert_relative_eq!(m.supply_earn_usd, 600.0, epsilon = 1e-9);
        assert_relative_eq!(m.borrow_cost_usd, 750.0, epsilon = 1e-9);
        assert_relative_eq!(m.deploy_earn_usd, 600.0, epsilon = 1e-9);
        assert_relative_eq!(m.net_earn_usd, 450.0, epsilon = 1e-9);
        assert_relative_eq!(m.net_apy_on_equity, 0.03, epsilon = 1e-12);

        assert_relative_eq!(m.max_borrow_by_ltv, 24_000.0, epsilon = 1e-9);
        assert_relative_eq!(m.borrow_headroom, 9_000.0, epsilon = 1e-9);
        assert_relative_eq!(m.borrow_power_used, 0.625, epsilon = 1e-12);
        assert_relative_eq!(m.equity_move_for_shock, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_alerts() {
        let m = LoanMetrics::for_loan(&scenario_a(), &AnalyticsConfig::default());
        // HF 1.65 >= 1.5; LTV 0.5 < 0.7 × 0.825
        assert!(!m.alert_hf);
        assert!(!m.alert_ltv);
        assert_eq!(
            m.health_status(&RiskThresholds::default()),
            HealthStatus::Safe
        );

        let risky = LoanPosition::new("m", usdc_debt(20_000.0), vec![eth(10.0, 3_000.0)], 0);
        let m = LoanMetrics::for_loan(&risky, &AnalyticsConfig::default());
        // HF = 30,000 × 0.825 / 20,000 = 1.2375
        assert!(m.alert_hf);
        assert!(m.alert_ltv);
        assert!(m.has_alert());
        assert_eq!(
            m.health_status(&RiskThresholds::default()),
            HealthStatus::Warning
        );
    }

    #[test]
    fn test_zero_collateral_positive_debt() {
        let loan = LoanPosition::new("m", usdc_debt(1_000.0), vec![], 0);
        let m = LoanMetrics::for_loan(&loan, &AnalyticsConfig::default());

        assert_eq!(m.collateral_usd, 0.0);
        assert_eq!(m.ltv, 0.0);
        assert_eq!(m.health_factor, 0.0);
        assert_eq!(m.leverage, f64::INFINITY);
        assert!(m.primary_collateral.is_none());
        assert_eq!(m.liq_price, f64::INFINITY);
        assert_eq!(m.price_drop_to_liq, 0.0);
        assert_eq!(m.collateral_usd_at_liq, f64::INFINITY);
        assert_eq!(m.ltv_at_liq, 0.0);
        assert_eq!(
            m.health_status(&RiskThresholds::default()),
            HealthStatus::Invalid
        );
    }

    #[test]
    fn test_neutral_record() {
        let m = LoanMetrics::neutral(&AnalyticsConfig::default());

        assert!(m.is_neutral());
        assert_eq!(m.debt_usd, 0.0);
        assert_eq!(m.health_factor, f64::INFINITY);
        assert_eq!(m.supply_rate, 0.0);
        assert_eq!(m.borrow_rate, 0.0);
        assert_eq!(m.net_apy_on_equity, 0.0);
        assert_eq!(m.equity_move_for_shock, 0.0);
        assert!(!m.alert_hf);
        assert!(!m.alert_ltv);
        assert_eq!(m, LoanMetrics::calculate(None, &AnalyticsConfig::default()));
        assert_eq!(m, LoanMetrics::default());
    }

    #[test]
    fn test_no_field_is_nan_for_neutral() {
        let m = LoanMetrics::neutral(&AnalyticsConfig::default());
        let json = serde_json::to_value(&m).unwrap();
        // serde_json writes NaN and ±∞ as null; only the infinite fields may be null
        let nulls: Vec<&String> = json
            .as_object()
            .unwrap()
            .iter()
            .filter(|(_, v)| v.is_null())
            .map(|(k, _)| k)
            .collect();
        for key in nulls {
            let allowed = [
                "loanId",
                "marketId",
                "marketName",
                "primaryCollateral",
                "leverage",
                "healthFactor",
                "collateralUsdAtLiq",
                "primaryUsdAtLiq",
                "liqPrice",
                "collateralBufferUsd",
            ];
            assert!(allowed.contains(&key.as_str()), "unexpected null {key}");
        }
    }

    #[test]
    fn test_debt_free_loan() {
        let loan = LoanPosition::new("m", usdc_debt(0.0), vec![eth(1.0, 2_000.0)], 0);
        let m = LoanMetrics::for_loan(&loan, &AnalyticsConfig::default());

        assert_eq!(m.health_factor, f64::INFINITY);
        assert_relative_eq!(m.leverage, 1.0, epsilon = 1e-9);
        assert_eq!(m.borrow_cost_usd, 0.0);
        assert_relative_eq!(m.net_earn_usd, m.supply_earn_usd, epsilon = 1e-9);
        assert_eq!(m.ltv_at_liq, 0.0);
    }

    #[test]
    fn test_primary_tie_break_first_wins() {
        let a = AssetPosition::new("AAA", "0x1", 1.0, 500.0).with_collateral_enabled(true);
        let b = AssetPosition::new("BBB", "0x2", 5.0, 100.0).with_collateral_enabled(true);
        let c = AssetPosition::new("CCC", "0x3", 1.0, 100.0).with_collateral_enabled(true);
        let assets = vec![c, a, b];
        assert_eq!(primary_collateral(&assets).unwrap().symbol(), "AAA");
        assert!(primary_collateral(&[]).is_none());
    }

    #[test]
    fn test_multi_collateral_liq_price_holds_others_constant() {
        let wbtc = AssetPosition::new("WBTC", "0x2260", 0.1, 60_000.0)
            .with_collateral_enabled(true)
            .with_liq_threshold(0.80)
            .with_max_ltv(0.75);
        let loan = LoanPosition::new(
            "m",
            usdc_debt(20_000.0),
            vec![eth(10.0, 3_000.0), wbtc],
            0,
        );
        let m = LoanMetrics::for_loan(&loan, &AnalyticsConfig::default());

        // collateral 36,000; lt = (30k×0.825 + 6k×0.80)/36k
        let lt = (30_000.0 * 0.825 + 6_000.0 * 0.80) / 36_000.0;
        assert_relative_eq!(m.liq_threshold, lt, epsilon = 1e-12);
        let at_liq = 20_000.0 / lt;
        let primary_at_liq = at_liq - 6_000.0;
        assert_eq!(m.primary_collateral.as_deref(), Some("WETH"));
        assert_relative_eq!(m.primary_usd_at_liq, primary_at_liq, epsilon = 1e-6);
        assert_relative_eq!(m.liq_price, primary_at_liq / 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_infinite_inputs_never_nan() {
        let huge = AssetPosition::new("X", "0x9", f64::INFINITY, 1.0)
            .with_collateral_enabled(true)
            .with_liq_threshold(0.8);
        let loan = LoanPosition::new("m", usdc_debt(f64::MAX), vec![huge], 0);
        let m = LoanMetrics::for_loan(&loan, &AnalyticsConfig::default());

        let json = serde_json::to_value(&m).unwrap();
        assert!(json.is_object());
        for value in [
            m.equity_usd,
            m.ltv,
            m.leverage,
            m.health_factor,
            m.liq_price,
            m.primary_usd_at_liq,
            m.collateral_buffer_usd,
            m.net_apy_on_equity,
            m.borrow_power_used,
        ] {
            assert!(!value.is_nan());
        }
    }

    #[test]
    fn test_alert_flags_follow_stored_values() {
        let huge = AssetPosition::new("X", "0x9", f64::INFINITY, 1.0)
            .with_collateral_enabled(true)
            .with_liq_threshold(0.8);
        let loan = LoanPosition::new("m", usdc_debt(1_000.0), vec![huge], 0);
        let config = AnalyticsConfig::default();
        let m = LoanMetrics::for_loan(&loan, &config);
        let thresholds = &config.thresholds;

        assert_eq!(m.health_factor, 0.0);
        assert_eq!(m.health_status(thresholds), HealthStatus::Invalid);
        assert_eq!(m.alert_hf, m.health_factor < thresholds.alert_health_factor);
        assert!(m.alert_hf);
        assert_eq!(
            m.alert_ltv,
            m.ltv > thresholds.alert_ltv_fraction * m.liq_threshold
        );
    }

    #[test]
    fn test_idempotent() {
        let config = AnalyticsConfig::default();
        let loan = scenario_a();
        assert_eq!(
            LoanMetrics::for_loan(&loan, &config),
            LoanMetrics::for_loan(&loan, &config)
        );
    }

    #[test]
    fn test_calculate_all_preserves_order() {
        let loans = vec![
            scenario_a(),
            LoanPosition::new("m", usdc_debt(1.0), vec![eth(1.0, 1.0)], 1),
        ];
        let all = calculate_all(&loans, &AnalyticsConfig::default());
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].loan_id.as_deref(), Some(loans[0].id()));
        assert_eq!(all[1].loan_id.as_deref(), Some(loans[1].id()));
    }

    #[test]
    fn test_price_drop_clamped() {
        let safe = LoanPosition::new("m", usdc_debt(1.0), vec![eth(10.0, 3_000.0)], 0);
        let m = LoanMetrics::for_loan(&safe, &AnalyticsConfig::default());
        assert!(m.price_drop_to_liq > 0.99);
        assert!(m.price_drop_to_liq_clamped() <= 1.0);

        let underwater = LoanPosition::new("m", usdc_debt(40_000.0), vec![eth(10.0, 3_000.0)], 0);
        let m = LoanMetrics::for_loan(&underwater, &AnalyticsConfig::default());
        assert!(m.price_drop_to_liq < 0.0);
        assert_eq!(m.price_drop_to_liq_clamped(), 0.0);
    }
}
