//! Classic heap-based Dijkstra solver
//!
//! The baseline solver: a binary heap with lazy stale-entry deletion instead
//! of decrease-key. Weights depend on the carried amount at the edge's
//! origin, so this is not a textbook stationary-weight instance; storing the
//! per-vertex amount at labeling time keeps the result a correct dominant
//! path as long as every pool family prices larger trades at a per-unit rate
//! no better than smaller ones.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use omniroute_graph::TokenGraph;
use omniroute_types::{RouteResult, RoutingError, TokenKey};
use tracing::debug;

use crate::cost::CostModel;
use crate::state::SearchState;

/// Heap entry ordered min-first by distance; insertion sequence breaks ties
/// so pop order is deterministic and the first-discovered label wins.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    dist: f64,
    seq: u64,
    vertex: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Solve a single-path routing query with heap Dijkstra.
pub fn solve(
    graph: &TokenGraph,
    source: &TokenKey,
    target: &TokenKey,
    input_amount: f64,
    max_hops: usize,
    cost: &CostModel,
) -> Result<RouteResult, RoutingError> {
    let source_idx = graph
        .index_of(source)
        .ok_or_else(|| RoutingError::SourceNotFound { key: source.clone() })?;
    let target_idx = graph
        .index_of(target)
        .ok_or_else(|| RoutingError::TargetNotFound { key: target.clone() })?;

    let n = graph.vertex_count();
    let mut state = SearchState::new(n, source_idx, input_amount);
    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::with_capacity(n);
    let mut seq = 0u64;

    heap.push(HeapEntry {
        dist: 0.0,
        seq,
        vertex: source_idx,
    });

    while let Some(entry) = heap.pop() {
        let u = entry.vertex;
        // Stale entry from before a better label landed.
        if entry.dist > state.dist[u] {
            continue;
        }
        if u == target_idx {
            break;
        }
        if visited[u] || state.hops[u] >= max_hops {
            continue;
        }
        visited[u] = true;

        for (edge_pos, edge) in graph.neighbors_by_index(u).iter().enumerate() {
            let edge_cost = cost.evaluate(state.amount[u], edge);
            if !edge_cost.is_usable() {
                continue;
            }
            let v = match graph.index_of(&edge.to) {
                Some(v) => v,
                None => continue,
            };
            let candidate = state.dist[u] + edge_cost.weight;
            if candidate < state.dist[v] && state.hops[u] + 1 <= max_hops {
                state.improve(v, u, edge_pos, candidate, edge_cost.amount_out);
                seq += 1;
                heap.push(HeapEntry {
                    dist: candidate,
                    seq,
                    vertex: v,
                });
            }
        }
    }

    debug!(
        source = %source,
        target = %target,
        dist = state.dist[target_idx],
        hops = state.hops[target_idx],
        "classic solve finished"
    );
    state.reconstruct(graph, cost, target_idx)
}
