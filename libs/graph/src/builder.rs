//! Graph construction with invariant enforcement
//!
//! Every structural rule is checked at insertion, so `build` cannot fail and
//! a `TokenGraph` never carries a self-loop, dangling edge, malformed pool,
//! or malformed bridge. The builder is single-threaded; construction
//! finishes before any solver sees the graph.

use std::collections::HashMap;

use omniroute_types::{Edge, EdgeKind, GraphError, LiquidityPool, TokenKey, TokenMeta};
use tracing::debug;

use crate::graph::TokenGraph;

#[derive(Debug, Default)]
pub struct GraphBuilder {
    keys: Vec<TokenKey>,
    meta: Vec<TokenMeta>,
    index: HashMap<TokenKey, usize>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, key: TokenKey) -> Result<(), GraphError> {
        self.add_vertex_with_meta(key, TokenMeta::default())
    }

    pub fn add_vertex_with_meta(
        &mut self,
        key: TokenKey,
        meta: TokenMeta,
    ) -> Result<(), GraphError> {
        if self.index.contains_key(&key) {
            return Err(GraphError::DuplicateVertex { key });
        }
        self.index.insert(key.clone(), self.keys.len());
        self.keys.push(key);
        self.meta.push(meta);
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Add one directed edge. Parallel edges between the same ordered pair
    /// are allowed; the solvers keep whichever relaxes best.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if edge.from == edge.to {
            return Err(GraphError::SelfLoop { key: edge.from });
        }
        let Some(from_idx) = self.index.get(&edge.from).copied() else {
            return Err(GraphError::DanglingEdge {
                from: edge.from,
                to: edge.to,
            });
        };
        if !self.index.contains_key(&edge.to) {
            return Err(GraphError::DanglingEdge {
                from: edge.from,
                to: edge.to,
            });
        }

        match &edge.kind {
            EdgeKind::Swap { pool, rate } => {
                if edge.from.chain != edge.to.chain {
                    return Err(GraphError::InvalidPool {
                        from: edge.from,
                        to: edge.to,
                        reason: "swap edges must stay on one chain".to_string(),
                    });
                }
                if let Some(pool) = pool {
                    if let Err(reason) = pool.check() {
                        return Err(GraphError::InvalidPool {
                            from: edge.from,
                            to: edge.to,
                            reason,
                        });
                    }
                }
                if let Some(rate) = rate {
                    if !rate.is_finite() || *rate <= 0.0 {
                        return Err(GraphError::InvalidPool {
                            from: edge.from,
                            to: edge.to,
                            reason: format!("nominal rate {rate} must be positive"),
                        });
                    }
                }
            }
            EdgeKind::Bridge {
                fee_fraction,
                time_delay_s,
            } => {
                // Same symbol plus the self-loop rule above already forces
                // the endpoints onto different chains.
                if edge.from.symbol != edge.to.symbol {
                    return Err(GraphError::InvalidBridge {
                        from: edge.from,
                        to: edge.to,
                        reason: "bridges connect the same symbol across chains".to_string(),
                    });
                }
                if !(0.0..1.0).contains(fee_fraction) {
                    return Err(GraphError::InvalidBridge {
                        from: edge.from,
                        to: edge.to,
                        reason: format!("fee fraction {fee_fraction} outside [0, 1)"),
                    });
                }
                if *time_delay_s < 0.0 {
                    return Err(GraphError::InvalidBridge {
                        from: edge.from,
                        to: edge.to,
                        reason: format!("negative time delay {time_delay_s}"),
                    });
                }
            }
        }

        self.adjacency[from_idx].push(edge);
        self.edge_count += 1;
        Ok(())
    }

    /// Add a pool-backed swap in both directions, mirroring the reserves for
    /// the return edge. This is how undirected pool semantics are emulated
    /// on a directed graph.
    pub fn add_swap_pair(
        &mut self,
        a: TokenKey,
        b: TokenKey,
        pool: LiquidityPool,
        gas_cost: f64,
        exec_time_ms: f64,
    ) -> Result<(), GraphError> {
        let mirrored = LiquidityPool {
            reserve_base: pool.reserve_quote,
            reserve_quote: pool.reserve_base,
            ..pool.clone()
        };
        self.add_edge(Edge::swap(
            a.clone(),
            b.clone(),
            Some(pool),
            None,
            gas_cost,
            exec_time_ms,
        ))?;
        self.add_edge(Edge::swap(b, a, Some(mirrored), None, gas_cost, exec_time_ms))
    }

    pub fn vertex_count(&self) -> usize {
        self.keys.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn build(self) -> TokenGraph {
        debug!(
            vertices = self.keys.len(),
            edges = self.edge_count,
            "built token graph"
        );
        TokenGraph {
            keys: self.keys,
            meta: self.meta,
            index: self.index,
            adjacency: self.adjacency,
            edge_count: self.edge_count,
        }
    }
}
