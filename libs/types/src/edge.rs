//! Directed graph edges
//!
//! Two edge families: same-chain swaps priced by an AMM pool (with an
//! optional nominal-rate fallback) and cross-chain bridges with a flat fee
//! and a latency. Bridges never carry a pool; the enum shape enforces that.
//! JSON forms live in [`crate::wire`].

use crate::pool::LiquidityPool;
use crate::token::TokenKey;

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    Swap {
        /// AMM pool backing the edge; `None` means the nominal rate is the
        /// only pricing available.
        pool: Option<LiquidityPool>,
        /// Fallback quote-per-base rate when the pool cannot price a trade.
        rate: Option<f64>,
    },
    Bridge {
        /// Flat fee taken by the bridge, as a fraction of the amount.
        fee_fraction: f64,
        /// Settlement delay in seconds.
        time_delay_s: f64,
    },
}

/// One directed edge of the routing graph. Immutable once added to a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: TokenKey,
    pub to: TokenKey,
    pub kind: EdgeKind,
    /// Gas cost in gwei of the origin chain's native token.
    pub gas_cost: f64,
    /// Estimated wall-clock execution time in milliseconds.
    pub exec_time_ms: f64,
}

impl Edge {
    pub fn swap(
        from: TokenKey,
        to: TokenKey,
        pool: Option<LiquidityPool>,
        rate: Option<f64>,
        gas_cost: f64,
        exec_time_ms: f64,
    ) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Swap { pool, rate },
            gas_cost,
            exec_time_ms,
        }
    }

    pub fn bridge(
        from: TokenKey,
        to: TokenKey,
        fee_fraction: f64,
        time_delay_s: f64,
        gas_cost: f64,
        exec_time_ms: f64,
    ) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Bridge {
                fee_fraction,
                time_delay_s,
            },
            gas_cost,
            exec_time_ms,
        }
    }

    pub fn is_bridge(&self) -> bool {
        matches!(self.kind, EdgeKind::Bridge { .. })
    }

    /// The pool backing a swap edge, if any.
    pub fn pool(&self) -> Option<&LiquidityPool> {
        match &self.kind {
            EdgeKind::Swap { pool, .. } => pool.as_ref(),
            EdgeKind::Bridge { .. } => None,
        }
    }

    /// Wire label for the edge family.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            EdgeKind::Swap { .. } => "swap",
            EdgeKind::Bridge { .. } => "bridge",
        }
    }
}
