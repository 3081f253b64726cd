//! # Omniroute Router Library
//!
//! ## Purpose
//!
//! The single-path route solvers: given an immutable token graph, a source
//! and target vertex, and an input amount, find the path that maximizes the
//! trader's output net of slippage, fees, gas, and bridge latency.
//!
//! Two interchangeable engines solve the same instance:
//!
//! - [`classic`]: heap-based Dijkstra with lazy stale-entry deletion; the
//!   baseline, and the faster choice on small graphs.
//! - [`bmssp`]: bounded multi-source SSSP with recursive pivot reduction;
//!   asymptotically ahead on large sparse graphs.
//!
//! [`Router`] wraps both behind engine settings and picks one by graph size
//! when asked to.
//!
//! ## Concurrency
//!
//! Solvers borrow the graph read-only and own all per-query state, so one
//! graph can serve concurrent queries from multiple threads.

pub mod bmssp;
pub mod classic;
pub mod cost;
mod state;

pub use cost::{CostModel, EdgeCost, UNUSABLE_WEIGHT};

use omniroute_config::EngineSettings;
use omniroute_graph::TokenGraph;
use omniroute_types::{RouteResult, RoutingError, TokenKey};
use tracing::debug;

/// Which solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    Classic,
    Bmssp,
    /// Classic below the configured vertex threshold, BMSSP above.
    Auto,
}

/// Entry point bundling the cost model and solver selection.
#[derive(Debug, Clone)]
pub struct Router {
    cost: CostModel,
}

impl Router {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            cost: CostModel::new(settings),
        }
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost
    }

    /// Solve with an explicit engine. `max_hops` falls back to the
    /// configured default when `None`.
    pub fn solve_with(
        &self,
        kind: SolverKind,
        graph: &TokenGraph,
        source: &TokenKey,
        target: &TokenKey,
        input_amount: f64,
        max_hops: Option<usize>,
    ) -> Result<RouteResult, RoutingError> {
        let settings = self.cost.settings();
        let max_hops = max_hops.unwrap_or(settings.default_max_hops);
        let kind = match kind {
            SolverKind::Auto => {
                if graph.vertex_count() < settings.classic_solver_threshold {
                    SolverKind::Classic
                } else {
                    SolverKind::Bmssp
                }
            }
            explicit => explicit,
        };
        debug!(?kind, max_hops, vertices = graph.vertex_count(), "dispatching solve");
        match kind {
            SolverKind::Classic => {
                classic::solve(graph, source, target, input_amount, max_hops, &self.cost)
            }
            SolverKind::Bmssp => {
                bmssp::solve(graph, source, target, input_amount, max_hops, &self.cost)
            }
            SolverKind::Auto => unreachable!("auto resolved above"),
        }
    }

    pub fn solve_classic(
        &self,
        graph: &TokenGraph,
        source: &TokenKey,
        target: &TokenKey,
        input_amount: f64,
        max_hops: Option<usize>,
    ) -> Result<RouteResult, RoutingError> {
        self.solve_with(SolverKind::Classic, graph, source, target, input_amount, max_hops)
    }

    pub fn solve_bmssp(
        &self,
        graph: &TokenGraph,
        source: &TokenKey,
        target: &TokenKey,
        input_amount: f64,
        max_hops: Option<usize>,
    ) -> Result<RouteResult, RoutingError> {
        self.solve_with(SolverKind::Bmssp, graph, source, target, input_amount, max_hops)
    }

    /// Size-based engine selection.
    pub fn solve(
        &self,
        graph: &TokenGraph,
        source: &TokenKey,
        target: &TokenKey,
        input_amount: f64,
        max_hops: Option<usize>,
    ) -> Result<RouteResult, RoutingError> {
        self.solve_with(SolverKind::Auto, graph, source, target, input_amount, max_hops)
    }
}
