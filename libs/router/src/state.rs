//! Search state shared by both solvers
//!
//! Flat arrays indexed by the graph's dense vertex indices: best known
//! distance, predecessor edge, hop depth, and the carried trade amount at
//! the moment the label was set. Both solvers write labels through
//! [`SearchState::improve`] and reconstruct routes the same way, so a route
//! never depends on which solver produced it.

use omniroute_graph::TokenGraph;
use omniroute_types::{RouteResult, RoutingError, Step};

use crate::cost::CostModel;

/// Predecessor reference: origin vertex index and position of the matched
/// edge in its adjacency list.
pub(crate) type PrevEdge = (usize, usize);

#[derive(Debug)]
pub(crate) struct SearchState {
    pub dist: Vec<f64>,
    pub prev: Vec<Option<PrevEdge>>,
    pub hops: Vec<usize>,
    pub amount: Vec<f64>,
    source: usize,
}

impl SearchState {
    pub fn new(vertex_count: usize, source: usize, input_amount: f64) -> Self {
        let mut state = Self {
            dist: vec![f64::INFINITY; vertex_count],
            prev: vec![None; vertex_count],
            hops: vec![0; vertex_count],
            amount: vec![0.0; vertex_count],
            source,
        };
        state.dist[source] = 0.0;
        state.amount[source] = input_amount;
        state
    }

    /// Install a strictly better label on `v` reached from `u` via the edge
    /// at `edge_pos`.
    pub fn improve(&mut self, v: usize, u: usize, edge_pos: usize, dist: f64, amount_out: f64) {
        self.dist[v] = dist;
        self.prev[v] = Some((u, edge_pos));
        self.hops[v] = self.hops[u] + 1;
        self.amount[v] = amount_out;
    }

    /// Rebuild the route by walking predecessors from the target. Weights
    /// are recomputed from the stored per-vertex amounts so the reported
    /// steps agree with what relaxation saw.
    pub fn reconstruct(
        &self,
        graph: &TokenGraph,
        cost: &CostModel,
        target: usize,
    ) -> Result<RouteResult, RoutingError> {
        if !self.dist[target].is_finite() {
            return Err(RoutingError::NoRoute {
                from: graph.key(self.source).clone(),
                target: graph.key(target).clone(),
            });
        }

        let mut hops_reversed = Vec::with_capacity(self.hops[target]);
        let mut cursor = target;
        // The predecessor graph is a tree under strict-improvement labeling;
        // the bound is a guard against ever walking a malformed chain.
        for _ in 0..=graph.vertex_count() {
            if cursor == self.source {
                break;
            }
            let (u, edge_pos) = self.prev[cursor].ok_or_else(|| RoutingError::NoRoute {
                from: graph.key(self.source).clone(),
                target: graph.key(target).clone(),
            })?;
            hops_reversed.push((u, edge_pos, cursor));
            cursor = u;
        }
        if cursor != self.source {
            return Err(RoutingError::NoRoute {
                from: graph.key(self.source).clone(),
                target: graph.key(target).clone(),
            });
        }

        let mut path = Vec::with_capacity(hops_reversed.len() + 1);
        let mut steps = Vec::with_capacity(hops_reversed.len());
        path.push(graph.key(self.source).clone());
        for (u, edge_pos, v) in hops_reversed.into_iter().rev() {
            let edge = &graph.neighbors_by_index(u)[edge_pos];
            let edge_cost = cost.evaluate(self.amount[u], edge);
            steps.push(Step {
                from: graph.key(u).clone(),
                to: graph.key(v).clone(),
                edge: edge.clone(),
                weight: edge_cost.weight,
                input_amount: self.amount[u],
                output_amount: self.amount[v],
            });
            path.push(graph.key(v).clone());
        }

        Ok(RouteResult {
            path,
            steps,
            total_weight: self.dist[target],
            estimated_output: self.amount[target],
        })
    }
}
