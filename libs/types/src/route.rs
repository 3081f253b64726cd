//! Route results produced by the solvers
//!
//! The stable JSON form lives in [`crate::wire`].

use crate::edge::Edge;
use crate::token::TokenKey;

/// One traversed edge with the amounts observed at relaxation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub from: TokenKey,
    pub to: TokenKey,
    /// The matched edge, cloned out of the graph.
    pub edge: Edge,
    /// Log-space weight this step contributed to the path cost.
    pub weight: f64,
    /// Amount entering the edge, in `from` units.
    pub input_amount: f64,
    /// Amount leaving the edge, in `to` units.
    pub output_amount: f64,
}

/// A complete source-to-target route. Produced per query, never retained by
/// the core.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Vertex sequence, source first, target last.
    pub path: Vec<TokenKey>,
    pub steps: Vec<Step>,
    /// Sum of per-step weights.
    pub total_weight: f64,
    /// Estimated amount received at the target.
    pub estimated_output: f64,
}

impl RouteResult {
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    pub fn source(&self) -> Option<&TokenKey> {
        self.path.first()
    }

    pub fn target(&self) -> Option<&TokenKey> {
        self.path.last()
    }

    /// Number of bridge crossings on the route.
    pub fn bridge_count(&self) -> usize {
        self.steps.iter().filter(|s| s.edge.is_bridge()).count()
    }

    /// Total estimated execution time across steps, in milliseconds.
    pub fn total_time_ms(&self) -> f64 {
        self.steps.iter().map(|s| s.edge.exec_time_ms).sum()
    }

    /// Total gas across steps, in gwei.
    pub fn total_gas(&self) -> f64 {
        self.steps.iter().map(|s| s.edge.gas_cost).sum()
    }
}
