//! USD-value weighted averages over collateral sets.

use loanscope_core::AssetPosition;

/// Calculates the USD-value weighted average of `selector` over `assets`.
///
/// ## Formula
///
/// ```text
/// avg = Σ(usd_i × x_i) / Σ(usd_i)
/// ```
///
/// A weight that is negative or non-finite counts as zero, so the result
/// always lies within the range of the selected values.
///
/// # Returns
///
/// Returns `0.0` when the total weight is not positive (empty set, or every
/// asset priced at zero).
#[must_use]
pub fn weighted_average<F>(assets: &[AssetPosition], selector: F) -> f64
where
    F: Fn(&AssetPosition) -> f64,
{
    let (sum_weighted, sum_weights) =
        assets
            .iter()
            .fold((0.0_f64, 0.0_f64), |(sum_w, sum_wt), asset| {
                let weight = weight_of(asset);
                if weight > 0.0 {
                    (sum_w + selector(asset) * weight, sum_wt + weight)
                } else {
                    (sum_w, sum_wt)
                }
            });

    if sum_weights > 0.0 {
        let avg = sum_weighted / sum_weights;
        if avg.is_nan() {
            0.0
        } else {
            avg
        }
    } else {
        0.0
    }
}

/// Weighted average max LTV.
#[must_use]
pub fn weighted_max_ltv(assets: &[AssetPosition]) -> f64 {
    weighted_average(assets, AssetPosition::max_ltv)
}

/// Weighted average liquidation threshold.
#[must_use]
pub fn weighted_liq_threshold(assets: &[AssetPosition]) -> f64 {
    weighted_average(assets, AssetPosition::liq_threshold)
}

/// Weighted average supply rate.
#[must_use]
pub fn weighted_supply_rate(assets: &[AssetPosition]) -> f64 {
    weighted_average(assets, AssetPosition::supply_rate)
}

fn weight_of(asset: &AssetPosition) -> f64 {
    let value = asset.usd_value();
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
