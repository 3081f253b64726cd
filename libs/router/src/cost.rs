//! Edge cost model
//!
//! Maps a carried amount and an edge to a scalar weight plus the amount that
//! leaves the edge. Weights live in log-space: `-ln(rate)` per hop makes the
//! path sum equal `-ln` of the product of rates, so minimizing weight
//! maximizes multiplicative output. Gas (divided by the normalizer) and
//! bridge latency (scaled by the time coefficient) are added into the same
//! units so one ordering captures every axis.

use omniroute_amm::quote_pool;
use omniroute_config::EngineSettings;
use omniroute_types::{Edge, EdgeKind};
use tracing::{trace, warn};

/// Weight assigned to edges that cannot price the trade at all. Infinite, so
/// a relaxation against it can never succeed.
pub const UNUSABLE_WEIGHT: f64 = f64::INFINITY;

/// Result of costing one edge at one carried amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCost {
    pub weight: f64,
    pub amount_out: f64,
}

impl EdgeCost {
    const UNUSABLE: Self = Self {
        weight: UNUSABLE_WEIGHT,
        amount_out: 0.0,
    };

    pub fn is_usable(&self) -> bool {
        self.weight.is_finite()
    }
}

/// Evaluates edges against the engine's cost constants.
#[derive(Debug, Clone)]
pub struct CostModel {
    settings: EngineSettings,
}

impl CostModel {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Cost one edge for a trade of `amount_in` entering it.
    ///
    /// Swap edges price through the AMM kernel; on kernel failure the edge's
    /// nominal rate takes over, and with neither the edge is unusable.
    /// Bridge edges charge their flat fee plus a latency penalty.
    pub fn evaluate(&self, amount_in: f64, edge: &Edge) -> EdgeCost {
        let gas_term = edge.gas_cost / self.settings.gas_normalizer;

        match &edge.kind {
            EdgeKind::Swap { pool, rate } => {
                if let Some(pool) = pool {
                    match quote_pool(pool, amount_in, &self.settings.amm) {
                        Ok(quote) => {
                            return EdgeCost {
                                weight: -quote.effective_rate.ln() + gas_term,
                                amount_out: quote.amount_out,
                            };
                        }
                        Err(err) => {
                            trace!(from = %edge.from, to = %edge.to, %err, "pool quote failed, trying nominal rate");
                        }
                    }
                }
                match rate {
                    Some(rate) if *rate > 0.0 => EdgeCost {
                        weight: -rate.ln() + gas_term,
                        amount_out: amount_in * rate,
                    },
                    _ => {
                        warn!(from = %edge.from, to = %edge.to, "edge has no usable pricing");
                        EdgeCost::UNUSABLE
                    }
                }
            }
            EdgeKind::Bridge {
                fee_fraction,
                time_delay_s,
            } => {
                let retained = 1.0 - fee_fraction;
                EdgeCost {
                    weight: -retained.ln()
                        + time_delay_s * self.settings.bridge_time_coefficient
                        + gas_term,
                    amount_out: amount_in * retained,
                }
            }
        }
    }
}
