//! External data contracts consumed at build time
//!
//! The solvers never touch these: by the time a query runs, every reserve
//! and rate is baked into the graph. The assembler is the glue that turns a
//! vertex universe plus the three source contracts into a built graph.

use omniroute_types::{Edge, GraphError, LiquidityPool, TokenKey, TokenMeta};
use tracing::{debug, warn};

use crate::builder::GraphBuilder;
use crate::graph::TokenGraph;

/// Spot USD prices for token symbols.
pub trait PriceFeed {
    fn price_usd(&self, symbol: &str) -> Option<f64>;
}

/// Pool reserve snapshots, keyed by chain and ordered token pair. The
/// returned pool is oriented base = `base`, quote = `quote`.
pub trait PoolSource {
    fn pool(&self, chain: &str, base: &str, quote: &str) -> Option<LiquidityPool>;
}

/// One available bridge lane for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeDescriptor {
    pub from_chain: String,
    pub to_chain: String,
    pub fee_fraction: f64,
    pub time_delay_s: f64,
    /// Gas in gwei on the origin chain.
    pub gas_cost: f64,
}

/// Bridge lanes available for a symbol.
pub trait BridgeSource {
    fn bridge_routes(&self, symbol: &str) -> Vec<BridgeDescriptor>;
}

/// Builds a graph from a vertex universe and the three source contracts.
pub struct GraphAssembler<'a> {
    pools: &'a dyn PoolSource,
    bridges: &'a dyn BridgeSource,
    prices: &'a dyn PriceFeed,
    swap_gas_cost: f64,
    swap_exec_time_ms: f64,
}

impl<'a> GraphAssembler<'a> {
    pub fn new(
        pools: &'a dyn PoolSource,
        bridges: &'a dyn BridgeSource,
        prices: &'a dyn PriceFeed,
    ) -> Self {
        Self {
            pools,
            bridges,
            prices,
            swap_gas_cost: 0.0,
            swap_exec_time_ms: 0.0,
        }
    }

    /// Gas and execution-time estimates stamped onto every swap edge.
    pub fn with_swap_costs(mut self, gas_cost: f64, exec_time_ms: f64) -> Self {
        self.swap_gas_cost = gas_cost;
        self.swap_exec_time_ms = exec_time_ms;
        self
    }

    /// Assemble a graph over the given vertices: every same-chain ordered
    /// pair is offered to the pool source, every symbol to the bridge
    /// source. Lanes pointing at vertices outside the universe are skipped.
    pub fn assemble(&self, vertices: &[TokenKey]) -> Result<TokenGraph, GraphError> {
        let mut builder = GraphBuilder::new();

        for key in vertices {
            let meta = TokenMeta {
                usd_price: self.prices.price_usd(&key.symbol),
                ..TokenMeta::default()
            };
            builder.add_vertex_with_meta(key.clone(), meta)?;
        }

        for from in vertices {
            for to in vertices {
                if from == to || from.chain != to.chain {
                    continue;
                }
                if let Some(pool) = self.pools.pool(&from.chain, &from.symbol, &to.symbol) {
                    builder.add_edge(Edge::swap(
                        from.clone(),
                        to.clone(),
                        Some(pool),
                        None,
                        self.swap_gas_cost,
                        self.swap_exec_time_ms,
                    ))?;
                }
            }
        }

        let mut symbols: Vec<&str> = vertices.iter().map(|k| k.symbol.as_str()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        for symbol in symbols {
            for lane in self.bridges.bridge_routes(symbol) {
                let from = TokenKey::new(symbol, lane.from_chain.as_str());
                let to = TokenKey::new(symbol, lane.to_chain.as_str());
                if !vertices.contains(&from) || !vertices.contains(&to) {
                    warn!(%from, %to, "skipping bridge lane outside vertex universe");
                    continue;
                }
                builder.add_edge(Edge::bridge(
                    from,
                    to,
                    lane.fee_fraction,
                    lane.time_delay_s,
                    lane.gas_cost,
                    lane.time_delay_s * 1_000.0,
                ))?;
            }
        }

        debug!(
            vertices = builder.vertex_count(),
            edges = builder.edge_count(),
            "assembled graph from sources"
        );
        Ok(builder.build())
    }
}
