//! Stable JSON wire forms
//!
//! These shapes are the contract pinned by golden-file tests: a graph is an
//! object mapping each canonical vertex key to an array of edge objects, and
//! a route is `{path, total_weight, estimated_output, steps}`. Field names
//! here do not track internal struct names (`gas` vs `gas_cost`,
//! `fee_percent` vs `fee_fraction`); the conversion functions own that
//! mapping. Execution-time estimates ride along as an optional `time_ms`
//! field.

use serde::{Deserialize, Serialize};

use crate::edge::{Edge, EdgeKind};
use crate::errors::KeyParseError;
use crate::pool::{LiquidityPool, PoolKind};
use crate::route::{RouteResult, Step};
use crate::token::TokenKey;

/// Pool object inside a swap edge. `fee_percent` is the fee fraction
/// multiplied by 100 (30 bp pools carry `0.3`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePool {
    pub reserve_base: f64,
    pub reserve_quote: f64,
    pub liquidity_usd: f64,
    pub fee_percent: f64,
    pub pool_type: PoolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl WirePool {
    pub fn from_pool(pool: &LiquidityPool) -> Self {
        Self {
            reserve_base: pool.reserve_base,
            reserve_quote: pool.reserve_quote,
            liquidity_usd: pool.liquidity_usd,
            fee_percent: pool.fee_fraction * 100.0,
            pool_type: pool.kind,
            volume_24h: pool.volume_24h,
            venue: pool.venue.clone(),
        }
    }

    pub fn into_pool(self) -> LiquidityPool {
        LiquidityPool {
            kind: self.pool_type,
            reserve_base: self.reserve_base,
            reserve_quote: self.reserve_quote,
            fee_fraction: self.fee_percent / 100.0,
            liquidity_usd: self.liquidity_usd,
            volume_24h: self.volume_24h,
            venue: self.venue,
        }
    }
}

/// Edge object inside a graph's adjacency array. The origin vertex is the
/// enclosing map key, so only `target` appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEdge {
    pub kind: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    pub gas: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<WirePool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<f64>,
}

impl WireEdge {
    pub fn from_edge(edge: &Edge) -> Self {
        let time_ms = (edge.exec_time_ms != 0.0).then_some(edge.exec_time_ms);
        match &edge.kind {
            EdgeKind::Swap { pool, rate } => Self {
                kind: "swap".to_string(),
                target: edge.to.canonical(),
                rate: *rate,
                gas: edge.gas_cost,
                bridge_fee: None,
                time_delay: None,
                liquidity: pool.as_ref().map(WirePool::from_pool),
                time_ms,
            },
            EdgeKind::Bridge {
                fee_fraction,
                time_delay_s,
            } => Self {
                kind: "bridge".to_string(),
                target: edge.to.canonical(),
                rate: None,
                gas: edge.gas_cost,
                bridge_fee: Some(*fee_fraction),
                time_delay: Some(*time_delay_s),
                liquidity: None,
                time_ms,
            },
        }
    }

    /// Rebuild the in-memory edge. Unknown `kind` strings are treated as
    /// swaps with whatever pricing fields are present.
    pub fn into_edge(self, from: TokenKey) -> Result<Edge, KeyParseError> {
        let to: TokenKey = self.target.parse()?;
        let kind = if self.kind == "bridge" {
            EdgeKind::Bridge {
                fee_fraction: self.bridge_fee.unwrap_or(0.0),
                time_delay_s: self.time_delay.unwrap_or(0.0),
            }
        } else {
            EdgeKind::Swap {
                pool: self.liquidity.map(WirePool::into_pool),
                rate: self.rate,
            }
        };
        Ok(Edge {
            from,
            to,
            kind,
            gas_cost: self.gas,
            exec_time_ms: self.time_ms.unwrap_or(0.0),
        })
    }
}

/// Step object inside a serialized route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireStep {
    pub from: String,
    pub to: String,
    pub kind: String,
    pub weight: f64,
    pub input_amount: f64,
    pub output_amount: f64,
    pub edge: WireEdge,
}

/// `{path, total_weight, estimated_output, steps}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRoute {
    pub path: Vec<String>,
    pub total_weight: f64,
    pub estimated_output: f64,
    pub steps: Vec<WireStep>,
}

impl WireRoute {
    pub fn from_route(route: &RouteResult) -> Self {
        Self {
            path: route.path.iter().map(TokenKey::canonical).collect(),
            total_weight: route.total_weight,
            estimated_output: route.estimated_output,
            steps: route
                .steps
                .iter()
                .map(|step| WireStep {
                    from: step.from.canonical(),
                    to: step.to.canonical(),
                    kind: step.edge.kind_label().to_string(),
                    weight: step.weight,
                    input_amount: step.input_amount,
                    output_amount: step.output_amount,
                    edge: WireEdge::from_edge(&step.edge),
                })
                .collect(),
        }
    }

    pub fn into_route(self) -> Result<RouteResult, KeyParseError> {
        let path = self
            .path
            .iter()
            .map(|raw| raw.parse())
            .collect::<Result<Vec<TokenKey>, _>>()?;
        let steps = self
            .steps
            .into_iter()
            .map(|step| {
                let from: TokenKey = step.from.parse()?;
                let to: TokenKey = step.to.parse()?;
                let edge = step.edge.into_edge(from.clone())?;
                Ok(Step {
                    from,
                    to,
                    edge,
                    weight: step.weight,
                    input_amount: step.input_amount,
                    output_amount: step.output_amount,
                })
            })
            .collect::<Result<Vec<Step>, KeyParseError>>()?;
        Ok(RouteResult {
            path,
            steps,
            total_weight: self.total_weight,
            estimated_output: self.estimated_output,
        })
    }
}

impl RouteResult {
    /// Serialize to the stable JSON form.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(WireRoute::from_route(self)).expect("route wire form is serializable")
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let wire: WireRoute = serde_json::from_value(value)?;
        wire.into_route().map_err(serde::de::Error::custom)
    }
}
