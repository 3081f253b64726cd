//! Bounded multi-source SSSP solver (PSB-Dijkstra)
//!
//! Works the same label space as the Classic solver but avoids a global
//! priority queue: the search proceeds in bounded multi-source waves, and at
//! each recursion level `FindPivots` shrinks the frontier to the small set
//! of sources whose predecessor subtrees grew past `k`, giving the
//! sub-sorting-barrier bound on large sparse graphs.
//!
//! The wave structure may close a recursion level while some labels are
//! still improvable (a relaxation suppressed by the level bound, or an
//! improvement landing on an already-completed vertex). Every such vertex is
//! parked on a residual frontier and drained with the same relaxation rule
//! after the recursion, so no eligible improvement is ever lost to a wave
//! boundary and the settled labels agree with the Classic solver whenever
//! the hop budget is not the binding constraint.

use omniroute_graph::TokenGraph;
use omniroute_types::{RouteResult, RoutingError, TokenKey};
use tracing::{debug, trace};

use crate::cost::CostModel;
use crate::state::SearchState;

/// `2^bits` clamped to `usize::MAX`; the wave caps overflow fast for deep
/// recursion levels and only their saturation matters.
fn pow2_saturating(bits: usize) -> usize {
    if bits >= usize::BITS as usize - 1 {
        usize::MAX
    } else {
        1usize << bits
    }
}

/// Solve a single-path routing query with the bounded multi-source solver.
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
    let ln_n = (n.max(2) as f64).ln();
    let k = (ln_n.powf(1.0 / 3.0).floor() as usize).max(2);
    let t = (ln_n.powf(2.0 / 3.0).floor() as usize).max(2);
    let levels = (((n.max(2) as f64).log2() / t as f64).ceil() as usize).max(1);
    debug!(n, k, t, levels, "bmssp parameters");

    let mut search = BmsspSearch {
        graph,
        cost,
        max_hops,
        k,
        t,
        target: target_idx,
        state: SearchState::new(n, source_idx, input_amount),
        completed: vec![false; n],
        dirty: vec![false; n],
        pending: Vec::new(),
    };

    search.bmssp(levels, f64::INFINITY, vec![source_idx]);
    search.drain_residual();

    debug!(
        source = %source,
        target = %target,
        dist = search.state.dist[target_idx],
        hops = search.state.hops[target_idx],
        "bmssp solve finished"
    );
    search.state.reconstruct(graph, cost, target_idx)
}

struct BmsspSearch<'a> {
    graph: &'a TokenGraph,
    cost: &'a CostModel,
    max_hops: usize,
    k: usize,
    t: usize,
    target: usize,
    state: SearchState,
    completed: Vec<bool>,
    /// Label changed since the vertex's edges were last expanded.
    dirty: Vec<bool>,
    /// Queue of dirty vertices awaiting (re-)expansion.
    pending: Vec<usize>,
}

impl BmsspSearch<'_> {
    fn park(&mut self, v: usize) {
        if !self.dirty[v] {
            self.dirty[v] = true;
            self.pending.push(v);
        }
    }

    /// Relax every out-edge of `u`, admitting only labels strictly below
    /// `bound`. Returns the vertices whose labels improved. An improvement
    /// blocked purely by the bound re-parks `u` so the residual drain can
    /// finish the job unbounded.
    fn relax_from(&mut self, u: usize, bound: f64) -> Vec<usize> {
        self.dirty[u] = false;
        let mut improved = Vec::new();
        if !self.state.dist[u].is_finite() || self.state.hops[u] + 1 > self.max_hops {
            return improved;
        }

        let mut suppressed = false;
        for (edge_pos, edge) in self.graph.neighbors_by_index(u).iter().enumerate() {
            let edge_cost = self.cost.evaluate(self.state.amount[u], edge);
            if !edge_cost.is_usable() {
                continue;
            }
            let v = match self.graph.index_of(&edge.to) {
                Some(v) => v,
                None => continue,
            };
            let candidate = self.state.dist[u] + edge_cost.weight;
            if candidate < self.state.dist[v] {
                if candidate < bound {
                    self.state.improve(v, u, edge_pos, candidate, edge_cost.amount_out);
                    self.park(v);
                    improved.push(v);
                } else {
                    suppressed = true;
                }
            }
        }
        if suppressed {
            self.park(u);
        }
        improved
    }

    /// `k` rounds of bounded relaxation from `S`, then pivot extraction from
    /// the predecessor forest. Returns `(pivots, W)`; aborts early with
    /// `pivots = S` once `|W| > k·|S|`.
    fn find_pivots(&mut self, bound: f64, sources: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let n = self.graph.vertex_count();
        let mut in_w = vec![false; n];
        let mut w: Vec<usize> = Vec::new();
        for &s in sources {
            if !in_w[s] {
                in_w[s] = true;
                w.push(s);
            }
        }

        let grow_cap = self.k.saturating_mul(sources.len().max(1));
        let mut frontier = w.clone();
        for round in 0..self.k {
            let mut in_next = vec![false; n];
            let mut next = Vec::new();
            for idx in 0..frontier.len() {
                let u = frontier[idx];
                for v in self.relax_from(u, bound) {
                    if !in_w[v] {
                        in_w[v] = true;
                        w.push(v);
                    }
                    if !in_next[v] {
                        in_next[v] = true;
                        next.push(v);
                    }
                }
            }
            if w.len() > grow_cap {
                trace!(round, frontier = w.len(), "pivot search aborted, frontier too wide");
                return (sources.to_vec(), w);
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        // Subtree sizes in the predecessor forest restricted to W: each W
        // vertex credits the source its chain terminates at.
        let mut in_sources = vec![false; n];
        for &s in sources {
            in_sources[s] = true;
        }
        let mut subtree = vec![0usize; n];
        for &v in &w {
            let mut cursor = v;
            for _ in 0..=n {
                if in_sources[cursor] {
                    subtree[cursor] += 1;
                    break;
                }
                match self.state.prev[cursor] {
                    Some((parent, _)) if in_w[parent] => cursor = parent,
                    _ => break,
                }
            }
        }

        let pivots: Vec<usize> = sources
            .iter()
            .copied()
            .filter(|&s| subtree[s] >= self.k)
            .collect();
        trace!(
            sources = sources.len(),
            pivots = pivots.len(),
            touched = w.len(),
            "pivot reduction"
        );
        (pivots, w)
    }

    /// One bounded multi-source wave. Returns the (possibly shrunk) bound
    /// and the vertices completed by this call.
    fn bmssp(&mut self, level: usize, bound: f64, sources: Vec<usize>) -> (f64, Vec<usize>) {
        if level == 0 || sources.is_empty() {
            let mut completed_now = Vec::new();
            for &s in &sources {
                if self.state.dist[s] < bound && !self.completed[s] {
                    self.completed[s] = true;
                    completed_now.push(s);
                    self.relax_from(s, bound);
                }
            }
            return (bound, completed_now);
        }

        let (mut pivots, w) = self.find_pivots(bound, &sources);

        let mut completed_set = Vec::new();
        for &v in &w {
            if self.state.dist[v] < bound && !self.completed[v] {
                self.completed[v] = true;
                completed_set.push(v);
            }
        }

        let wave_cap = self.k.saturating_mul(pow2_saturating(level * self.t));
        let chunk = pow2_saturating((level - 1) * self.t);
        let max_pulls = pow2_saturating(self.t);

        // Lowest tentative distance first, so waves expand in roughly the
        // order a priority queue would.
        pivots.sort_by(|&a, &b| self.state.dist[a].total_cmp(&self.state.dist[b]));

        let mut b_current = bound;
        let mut offset = 0;
        let mut pulls = 0;
        while completed_set.len() < wave_cap && offset < pivots.len() && pulls < max_pulls {
            let end = (offset + chunk).min(pivots.len());
            let subset = pivots[offset..end].to_vec();
            offset = end;

            let (b_sub, wave) = self.bmssp(level - 1, b_current, subset);
            for &v in &wave {
                self.relax_from(v, b_current);
            }
            completed_set.extend(wave);
            b_current = b_current.min(b_sub);
            if self.state.dist[self.target] < b_current {
                break;
            }
            pulls += 1;
        }

        (b_current, completed_set)
    }

    /// Finish any label improvements the bounded waves left behind. Runs
    /// the same relaxation rule with no bound until nothing is dirty.
    fn drain_residual(&mut self) {
        let mut expansions = 0usize;
        while let Some(u) = self.pending.pop() {
            if !self.dirty[u] {
                continue;
            }
            self.relax_from(u, f64::INFINITY);
            expansions += 1;
        }
        if expansions > 0 {
            trace!(expansions, "residual frontier drained");
        }
    }
}
