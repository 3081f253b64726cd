//! JSON adjacency codec
//!
//! The graph's stable wire form is an object mapping each canonical vertex
//! key to its outgoing edge array. Keys are emitted in sorted order so the
//! output is byte-stable for golden tests. Decoding re-runs the builder, so
//! a graph parsed from JSON satisfies the same invariants as one built in
//! code.

use std::collections::BTreeMap;

use omniroute_types::wire::WireEdge;
use omniroute_types::{GraphError, KeyParseError, TokenKey};
use thiserror::Error;

use crate::builder::GraphBuilder;
use crate::graph::TokenGraph;

/// Failures while decoding a serialized graph.
#[derive(Debug, Error)]
pub enum GraphCodecError {
    #[error("malformed graph JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Key(#[from] KeyParseError),

    #[error(transparent)]
    Invalid(#[from] GraphError),
}

impl TokenGraph {
    /// Serialize to the stable JSON adjacency form.
    pub fn to_json(&self) -> serde_json::Value {
        let map: BTreeMap<String, Vec<WireEdge>> = self
            .vertices()
            .map(|key| {
                let edges = self
                    .neighbors(key)
                    .iter()
                    .map(WireEdge::from_edge)
                    .collect();
                (key.canonical(), edges)
            })
            .collect();
        serde_json::to_value(map).expect("graph wire form is serializable")
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).expect("graph wire form is serializable")
    }

    /// Decode from the JSON adjacency form, re-validating every invariant.
    pub fn from_json(value: serde_json::Value) -> Result<Self, GraphCodecError> {
        let map: BTreeMap<String, Vec<WireEdge>> = serde_json::from_value(value)?;

        let mut builder = GraphBuilder::new();
        let mut keys = Vec::with_capacity(map.len());
        for raw in map.keys() {
            let key: TokenKey = raw.parse()?;
            builder.add_vertex(key.clone())?;
            keys.push(key);
        }
        for (key, edges) in keys.iter().zip(map.into_values()) {
            for wire in edges {
                builder.add_edge(wire.into_edge(key.clone())?)?;
            }
        }
        Ok(builder.build())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GraphCodecError> {
        Self::from_json(serde_json::from_str(raw)?)
    }
}
