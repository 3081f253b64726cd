//! Per-step route checks
//!
//! Walks the route in step order carrying the running amount through the
//! same AMM/bridge math the solver used, and files failures and warnings
//! against caller limits. Liquidity thresholds are fractions of the pool's
//! base reserve: above 10% consumed is a warning, above 30% the route is
//! rejected outright.

use omniroute_amm::quote_pool;
use omniroute_config::EngineSettings;
use omniroute_types::{EdgeKind, RouteResult};
use serde::{Deserialize, Serialize};

/// Share of the base reserve above which a trade is rejected.
const LIQUIDITY_CRITICAL_FRACTION: f64 = 0.30;
/// Share of the base reserve above which a trade draws a warning.
const LIQUIDITY_WARN_FRACTION: f64 = 0.10;
/// Fraction of a limit at which "approaching limit" warnings fire.
const WARN_AT_FRACTION_OF_LIMIT: f64 = 0.50;
/// Gwei per native token unit.
const GWEI_PER_NATIVE: f64 = 1e9;

/// Caller budgets for a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Largest acceptable per-step price impact, as a fraction.
    pub max_slippage: f64,
    /// Largest acceptable per-step gas cost, in USD.
    pub max_gas_usd: f64,
    /// Largest acceptable total execution time, in milliseconds.
    pub max_time_ms: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_slippage: 0.05,
            max_gas_usd: 50.0,
            max_time_ms: 600_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PoolUnavailable,
    InsufficientLiquidity,
    ExcessiveSlippage,
    GasTooHigh,
}

/// One failed check, tied to the step that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFailure {
    pub kind: FailureKind,
    pub severity: Severity,
    /// Whether shrinking the trade could clear the failure.
    pub recoverable: bool,
    pub step: usize,
    pub message: String,
}

/// Soft finding; `step` is absent for route-level warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteWarning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
    pub message: String,
}

/// Recomputed per-step figures, consumed by the scorer.
#[derive(Debug, Clone)]
pub(crate) struct StepTrace {
    pub amount_out: f64,
    pub price_impact: f64,
    /// Zero-impact rate for the step: spot net of fee, nominal rate, or
    /// `1 - bridge_fee`.
    pub theoretical_rate: f64,
    pub gas_usd: f64,
    pub exec_time_ms: f64,
    pub is_bridge: bool,
    /// Pool TVL for pool-backed steps.
    pub pool_depth: Option<f64>,
    /// Venue label for pool-backed steps (pool kind when unlabeled).
    pub venue: Option<String>,
}

pub(crate) struct RouteWalk {
    pub traces: Vec<StepTrace>,
    pub failures: Vec<RouteFailure>,
    pub warnings: Vec<RouteWarning>,
}

/// Re-run the pricing math over the route and collect findings.
pub(crate) fn walk_route(
    route: &RouteResult,
    input_amount: f64,
    native_price_usd: f64,
    limits: &ValidationLimits,
    settings: &EngineSettings,
) -> RouteWalk {
    let mut traces = Vec::with_capacity(route.steps.len());
    let mut failures = Vec::new();
    let mut warnings = Vec::new();
    let mut amount = input_amount;

    for (step_idx, step) in route.steps.iter().enumerate() {
        let edge = &step.edge;
        let gas_usd = edge.gas_cost / GWEI_PER_NATIVE * native_price_usd;

        let (amount_out, price_impact, theoretical_rate) = match &edge.kind {
            EdgeKind::Bridge { fee_fraction, .. } => {
                let retained = 1.0 - fee_fraction;
                (amount * retained, 0.0, retained)
            }
            EdgeKind::Swap { pool, rate } => {
                let mut priced = None;
                if let Some(pool) = pool {
                    let consumed = amount / pool.reserve_base;
                    if consumed > LIQUIDITY_CRITICAL_FRACTION {
                        failures.push(RouteFailure {
                            kind: FailureKind::InsufficientLiquidity,
                            severity: Severity::Critical,
                            recoverable: false,
                            step: step_idx,
                            message: format!(
                                "trade consumes {:.1}% of the base reserve",
                                consumed * 100.0
                            ),
                        });
                    } else if consumed > LIQUIDITY_WARN_FRACTION {
                        warnings.push(RouteWarning {
                            step: Some(step_idx),
                            message: format!(
                                "trade consumes {:.1}% of the base reserve",
                                consumed * 100.0
                            ),
                        });
                    }
                    if let Ok(quote) = quote_pool(pool, amount, &settings.amm) {
                        let spot_net = pool.spot_rate() * (1.0 - pool.fee_fraction);
                        priced = Some((quote.amount_out, quote.price_impact, spot_net));
                    }
                }
                match (priced, rate) {
                    (Some(p), _) => p,
                    (None, Some(rate)) if *rate > 0.0 => (amount * rate, 0.0, *rate),
                    (None, _) => {
                        failures.push(RouteFailure {
                            kind: FailureKind::PoolUnavailable,
                            severity: Severity::Critical,
                            recoverable: false,
                            step: step_idx,
                            message: "no pool quote and no nominal rate".to_string(),
                        });
                        // Carry the amount through unchanged so later steps
                        // still get evaluated.
                        (amount, 0.0, 1.0)
                    }
                }
            }
        };

        if price_impact > limits.max_slippage {
            failures.push(RouteFailure {
                kind: FailureKind::ExcessiveSlippage,
                severity: Severity::High,
                recoverable: true,
                step: step_idx,
                message: format!(
                    "price impact {:.4} exceeds limit {:.4}",
                    price_impact, limits.max_slippage
                ),
            });
        } else if price_impact >= WARN_AT_FRACTION_OF_LIMIT * limits.max_slippage {
            warnings.push(RouteWarning {
                step: Some(step_idx),
                message: format!(
                    "price impact {:.4} is over half the limit {:.4}",
                    price_impact, limits.max_slippage
                ),
            });
        }

        if gas_usd > limits.max_gas_usd {
            failures.push(RouteFailure {
                kind: FailureKind::GasTooHigh,
                severity: Severity::Medium,
                recoverable: true,
                step: step_idx,
                message: format!(
                    "step gas ${:.2} exceeds limit ${:.2}",
                    gas_usd, limits.max_gas_usd
                ),
            });
        } else if gas_usd >= WARN_AT_FRACTION_OF_LIMIT * limits.max_gas_usd {
            warnings.push(RouteWarning {
                step: Some(step_idx),
                message: format!(
                    "step gas ${:.2} is over half the limit ${:.2}",
                    gas_usd, limits.max_gas_usd
                ),
            });
        }

        let (pool_depth, venue) = match &edge.kind {
            EdgeKind::Swap { pool: Some(pool), .. } => (
                Some(pool.liquidity_usd),
                Some(
                    pool.venue
                        .clone()
                        .unwrap_or_else(|| pool.kind.as_str().to_string()),
                ),
            ),
            _ => (None, None),
        };
        traces.push(StepTrace {
            amount_out,
            price_impact,
            theoretical_rate,
            gas_usd,
            exec_time_ms: edge.exec_time_ms,
            is_bridge: edge.is_bridge(),
            pool_depth,
            venue,
        });
        amount = amount_out;
    }

    let total_time_ms: f64 = traces.iter().map(|t| t.exec_time_ms).sum();
    if total_time_ms > limits.max_time_ms {
        warnings.push(RouteWarning {
            step: None,
            message: format!(
                "estimated execution time {:.0} ms exceeds budget {:.0} ms",
                total_time_ms, limits.max_time_ms
            ),
        });
    }

    RouteWalk {
        traces,
        failures,
        warnings,
    }
}
