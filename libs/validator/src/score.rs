//! Quality metrics and the 0-100 score
//!
//! The metric definitions and weights are a fixed contract: tests pin exact
//! scores, so any change here is a breaking change to the validation
//! surface.

use serde::{Deserialize, Serialize};

use crate::checks::StepTrace;

const WEIGHT_OUTPUT_EFFICIENCY: f64 = 0.35;
const WEIGHT_GAS_EFFICIENCY: f64 = 0.15;
const WEIGHT_PRICE_IMPACT: f64 = 0.25;
const WEIGHT_LIQUIDITY: f64 = 0.10;
const WEIGHT_DIVERSIFICATION: f64 = 0.05;
const WEIGHT_RISK: f64 = 0.05;
const WEIGHT_TIME: f64 = 0.05;

/// All metrics are in `[0, 1]` except `gas_efficiency`, which is capped at
/// 100 and divided by 100 when weighted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Realized output over the zero-impact output.
    pub output_efficiency: f64,
    /// Output units bought per USD of gas, capped at 100.
    pub gas_efficiency: f64,
    /// `1 -` total price impact across steps.
    pub price_impact_score: f64,
    /// Log-scaled average pool depth.
    pub liquidity_score: f64,
    /// Distinct venues over a target of three.
    pub diversification_score: f64,
    /// Penalty for bridge crossings and shallow pools.
    pub risk_score: f64,
    /// Linear decay over a ten-minute budget.
    pub time_score: f64,
}

pub(crate) fn compute_metrics(input_amount: f64, traces: &[StepTrace]) -> QualityMetrics {
    let final_output = traces.last().map_or(input_amount, |t| t.amount_out);

    let theoretical_output =
        input_amount * traces.iter().map(|t| t.theoretical_rate).product::<f64>();
    let output_efficiency = if theoretical_output > 0.0 {
        final_output / theoretical_output
    } else {
        0.0
    };

    let total_gas_usd: f64 = traces.iter().map(|t| t.gas_usd).sum();
    let gas_efficiency = if total_gas_usd > 0.0 {
        (final_output / total_gas_usd).min(100.0)
    } else {
        100.0
    };

    let total_slippage: f64 = traces.iter().map(|t| t.price_impact).sum();
    let price_impact_score = (1.0 - total_slippage).max(0.0);

    let depths: Vec<f64> = traces.iter().filter_map(|t| t.pool_depth).collect();
    let avg_pool_depth = if depths.is_empty() {
        0.0
    } else {
        depths.iter().sum::<f64>() / depths.len() as f64
    };
    let liquidity_score = ((avg_pool_depth + 1.0).log10() / 6.0).min(1.0);

    let mut venues: Vec<&str> = traces
        .iter()
        .filter_map(|t| t.venue.as_deref())
        .collect();
    venues.sort_unstable();
    venues.dedup();
    let diversification_score = (venues.len() as f64 / 3.0).min(1.0);

    let bridge_count = traces.iter().filter(|t| t.is_bridge).count();
    let risk_score =
        (1.0 - (bridge_count as f64 * 0.2 + (1.0 - liquidity_score) * 0.3)).max(0.0);

    let total_time_ms: f64 = traces.iter().map(|t| t.exec_time_ms).sum();
    let time_score = (1.0 - total_time_ms / 600_000.0).max(0.0);

    QualityMetrics {
        output_efficiency,
        gas_efficiency,
        price_impact_score,
        liquidity_score,
        diversification_score,
        risk_score,
        time_score,
    }
}

/// Weighted sum scaled to 0-100, one decimal.
pub(crate) fn overall_score(metrics: &QualityMetrics) -> f64 {
    let weighted = WEIGHT_OUTPUT_EFFICIENCY * metrics.output_efficiency
        + WEIGHT_GAS_EFFICIENCY * (metrics.gas_efficiency / 100.0)
        + WEIGHT_PRICE_IMPACT * metrics.price_impact_score
        + WEIGHT_LIQUIDITY * metrics.liquidity_score
        + WEIGHT_DIVERSIFICATION * metrics.diversification_score
        + WEIGHT_RISK * metrics.risk_score
        + WEIGHT_TIME * metrics.time_score;
    (weighted * 100.0 * 10.0).round() / 10.0
}
