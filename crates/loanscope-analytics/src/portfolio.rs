//! Wallet-level rollup of per-loan metrics.

use crate::config::AnalyticsConfig;
use crate::metrics::LoanMetrics;
use serde::Serialize;

/// Aggregated metrics across every loan of one wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Number of loans.
    pub loan_count: usize,

    /// Sum of debt.
    pub total_debt: f64,

    /// Sum of collateral.
    pub total_collateral: f64,

    /// Sum of equity.
    pub total_net_worth: f64,

    /// Sum of annual supply earnings.
    pub total_supply_earn: f64,

    /// Sum of annual borrow cost.
    pub total_borrow_cost: f64,

    /// Sum of annual redeployment earnings.
    pub total_deploy_earn: f64,

    /// Sum of annual net earnings.
    pub total_net_earn: f64,

    /// Mean health factor over loans with a finite health factor.
    ///
    /// +∞ when no loan has one. Debt-free loans are excluded so their
    /// infinite health factor cannot mask risk elsewhere.
    pub average_health_factor: f64,

    /// Lowest health factor across loans.
    pub lowest_health_factor: f64,

    /// `total_supply_earn / total_collateral`.
    pub average_supply_apy: f64,

    /// `total_borrow_cost / total_debt`.
    pub average_borrow_apy: f64,

    /// `total_net_earn / total_net_worth`.
    pub portfolio_net_apy: f64,

    /// `total_debt / Σ max_borrow_by_ltv`.
    pub borrow_power_used: f64,

    /// Number of loans with at least one alert flag.
    pub alert_count: usize,
}

impl PortfolioSummary {
    /// Rolls up per-loan metrics.
    ///
    /// # Returns
    ///
    /// Returns `None` for an empty list: a wallet without loans has no
    /// portfolio.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let metrics = calculate_all(&loans, &config);
    /// if let Some(summary) = PortfolioSummary::from_metrics(&metrics, &config) {
    ///     println!("avg HF: {:.2}", summary.average_health_factor);
    /// }
    /// ```
    #[must_use]
    pub fn from_metrics(metrics: &[LoanMetrics], config: &AnalyticsConfig) -> Option<Self> {
        if metrics.is_empty() {
            return None;
        }

        let total_debt: f64 = metrics.iter().map(|m| m.debt_usd).sum();
        let total_borrow_cost: f64 = metrics.iter().map(|m| m.borrow_cost_usd).sum();
        let total_deploy_earn: f64 = metrics.iter().map(|m| m.deploy_earn_usd).sum();

        let collateral_side = if config.dedupe_shared_collateral {
            CollateralTotals::deduplicated(metrics)
        } else {
            CollateralTotals::summed(metrics)
        };

        let (total_net_worth, total_net_earn) = if config.dedupe_shared_collateral {
            (
                collateral_side.collateral - total_debt,
                collateral_side.supply_earn + total_deploy_earn - total_borrow_cost,
            )
        } else {
            (
                metrics.iter().map(|m| m.equity_usd).sum(),
                metrics.iter().map(|m| m.net_earn_usd).sum(),
            )
        };

        let finite_hfs: Vec<f64> = metrics
            .iter()
            .map(|m| m.health_factor)
            .filter(|hf| hf.is_finite())
            .collect();
        let average_health_factor = if finite_hfs.is_empty() {
            f64::INFINITY
        } else {
            finite_hfs.iter().sum::<f64>() / finite_hfs.len() as f64
        };
        let lowest_health_factor = metrics
            .iter()
            .map(|m| m.health_factor)
            .fold(f64::INFINITY, f64::min);
        let alert_count = metrics.iter().filter(|m| m.has_alert()).count();

        Some(Self {
            loan_count: metrics.len(),
            total_debt,
            total_collateral: collateral_side.collateral,
            total_net_worth,
            total_supply_earn: collateral_side.supply_earn,
            total_borrow_cost,
            total_deploy_earn,
            total_net_earn,
            average_health_factor,
            lowest_health_factor,
            average_supply_apy: ratio(collateral_side.supply_earn, collateral_side.collateral),
            average_borrow_apy: ratio(total_borrow_cost, total_debt),
            portfolio_net_apy: ratio(total_net_earn, total_net_worth),
            borrow_power_used: ratio(total_debt, collateral_side.max_borrow),
            alert_count,
        })
    }
}

/// Convenience function to roll up per-loan metrics.
#[must_use]
pub fn calculate_portfolio(
    metrics: &[LoanMetrics],
    config: &AnalyticsConfig,
) -> Option<PortfolioSummary> {
    PortfolioSummary::from_metrics(metrics, config)
}

#[derive(Debug, Default)]
struct CollateralTotals {
    collateral: f64,
    supply_earn: f64,
    max_borrow: f64,
}

impl CollateralTotals {
    fn add(&mut self, m: &LoanMetrics) {
        self.collateral += m.collateral_usd;
        self.supply_earn += m.supply_earn_usd;
        self.max_borrow += m.max_borrow_by_ltv;
    }

    fn summed(metrics: &[LoanMetrics]) -> Self {
        let mut totals = Self::default();
        for m in metrics {
            totals.add(m);
        }
        totals
    }

    /// Counts the first loan of each market tag only; loans without a tag
    /// each count on their own.
    fn deduplicated(metrics: &[LoanMetrics]) -> Self {
        let mut totals = Self::default();
        let mut seen: Vec<&str> = Vec::new();
        for m in metrics {
            match m.market_id.as_deref() {
                Some(market) if seen.contains(&market) => {}
                Some(market) => {
                    seen.push(market);
                    totals.add(m);
                }
                None => totals.add(m),
            }
        }
        totals
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        let value = numerator / denominator;
        if value.is_nan() {
            0.0
        } else {
            value
        }
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use loanscope_core::{AssetPosition, LoanPosition};

    fn collateral(amount: f64, price: f64) -> AssetPosition {
        AssetPosition::new("WETH", "0xc02a", amount, price)
            .with_collateral_enabled(true)
            .with_max_ltv(0.80)
            .with_liq_threshold(0.90)
            .with_supply_rate(0.02)
    }

    fn loan(market: &str, debt: f64, seq: usize) -> LoanPosition {
        let borrowed = AssetPosition::new("USDC", "0xa0b8", debt, 1.0).with_borrow_rate(0.05);
        LoanPosition::new(market, borrowed, vec![collateral(10.0, 3_000.0)], seq)
    }

    #[test]
    fn test_empty_is_none() {
        assert!(PortfolioSummary::from_metrics(&[], &AnalyticsConfig::default()).is_none());
    }

    #[test]
    fn test_average_hf_excludes_infinite() {
        let config = AnalyticsConfig::default();
        // HF = 30,000 × 0.9 / 15,000 = 1.8
        let leveraged = LoanMetrics::for_loan(&loan("a", 15_000.0, 0), &config);
        let debt_free = LoanMetrics::for_loan(&loan("b", 0.0, 1), &config);
        assert_eq!(debt_free.health_factor, f64::INFINITY);

        let summary = PortfolioSummary::from_metrics(&[leveraged, debt_free], &config).unwrap();
        assert_eq!(summary.loan_count, 2);
        assert_relative_eq!(summary.average_health_factor, 1.8, epsilon = 1e-12);
        assert_relative_eq!(summary.lowest_health_factor, 1.8, epsilon = 1e-12);
    }

    #[test]
    fn test_all_infinite_hf() {
        let config = AnalyticsConfig::default();
        let m = LoanMetrics::for_loan(&loan("a", 0.0, 0), &config);
        let summary = PortfolioSummary::from_metrics(&[m], &config).unwrap();
        assert_eq!(summary.average_health_factor, f64::INFINITY);
        assert_eq!(summary.average_borrow_apy, 0.0);
    }

    #[test]
    fn test_sums_and_apys() {
        let config = AnalyticsConfig::default();
        let metrics = vec![
            LoanMetrics::for_loan(&loan("a", 15_000.0, 0), &config),
            LoanMetrics::for_loan(&loan("b", 5_000.0, 1), &config),
        ];
        let s = PortfolioSummary::from_metrics(&metrics, &config).unwrap();

        assert_relative_eq!(s.total_debt, 20_000.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_collateral, 60_000.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_net_worth, 40_000.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_supply_earn, 1_200.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_borrow_cost, 1_000.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_net_earn, 200.0, epsilon = 1e-9);
        assert_relative_eq!(s.average_supply_apy, 0.02, epsilon = 1e-12);
        assert_relative_eq!(s.average_borrow_apy, 0.05, epsilon = 1e-12);
        assert_relative_eq!(s.portfolio_net_apy, 0.005, epsilon = 1e-12);
        // 20,000 / (24,000 + 24,000)
        assert_relative_eq!(s.borrow_power_used, 20_000.0 / 48_000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dedupe_shared_collateral() {
        let config = AnalyticsConfig::default().with_dedupe_shared_collateral(true);
        let metrics = vec![
            LoanMetrics::for_loan(&loan("a", 15_000.0, 0), &config),
            LoanMetrics::for_loan(&loan("a", 5_000.0, 1), &config),
            LoanMetrics::for_loan(&loan("b", 1_000.0, 2), &config),
        ];
        let s = PortfolioSummary::from_metrics(&metrics, &config).unwrap();

        // market "a" collateral counted once
        assert_relative_eq!(s.total_collateral, 60_000.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_debt, 21_000.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_net_worth, 39_000.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_supply_earn, 1_200.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_net_earn, 1_200.0 - 1_050.0, epsilon = 1e-9);
        assert_relative_eq!(s.borrow_power_used, 21_000.0 / 48_000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dedupe_keys_on_market_tag() {
        let config = AnalyticsConfig::default().with_dedupe_shared_collateral(true);
        // two deployments sharing one display name
        let metrics = vec![
            LoanMetrics::for_loan(&loan("Aave", 15_000.0, 0).with_market_id("aave-eth"), &config),
            LoanMetrics::for_loan(&loan("Aave", 5_000.0, 1).with_market_id("aave-base"), &config),
            LoanMetrics::for_loan(&loan("Aave", 1_000.0, 2).with_market_id("aave-base"), &config),
        ];
        let s = PortfolioSummary::from_metrics(&metrics, &config).unwrap();

        assert_relative_eq!(s.total_collateral, 60_000.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_debt, 21_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_alert_count() {
        let config = AnalyticsConfig::default();
        let metrics = vec![
            // HF 1.08 < 1.5
            LoanMetrics::for_loan(&loan("a", 25_000.0, 0), &config),
            LoanMetrics::for_loan(&loan("b", 1_000.0, 1), &config),
        ];
        let s = calculate_portfolio(&metrics, &config).unwrap();
        assert_eq!(s.alert_count, 1);
    }

    #[test]
    fn test_non_positive_net_worth_apy_is_zero() {
        let config = AnalyticsConfig::default();
        let underwater = LoanMetrics::for_loan(&loan("a", 40_000.0, 0), &config);
        let s = PortfolioSummary::from_metrics(&[underwater], &config).unwrap();
        assert!(s.total_net_worth < 0.0);
        assert_eq!(s.portfolio_net_apy, 0.0);
    }
}
