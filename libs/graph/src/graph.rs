//! Read-only adjacency storage
//!
//! Vertices get a dense index in insertion order so solver state can live in
//! flat arrays; `neighbors` yields edges in insertion order. There is no
//! interior mutability: once built, a graph is `Send + Sync` and can back
//! any number of concurrent queries.

use std::collections::HashMap;

use omniroute_types::{Edge, TokenKey, TokenMeta};

/// Immutable multi-chain routing graph. Built by
/// [`GraphBuilder`](crate::builder::GraphBuilder).
#[derive(Debug, Clone)]
pub struct TokenGraph {
    pub(crate) keys: Vec<TokenKey>,
    pub(crate) meta: Vec<TokenMeta>,
    pub(crate) index: HashMap<TokenKey, usize>,
    pub(crate) adjacency: Vec<Vec<Edge>>,
    pub(crate) edge_count: usize,
}

impl TokenGraph {
    pub fn vertex_count(&self) -> usize {
        self.keys.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, key: &TokenKey) -> bool {
        self.index.contains_key(key)
    }

    /// Dense index assigned at insertion, if the vertex exists.
    pub fn index_of(&self, key: &TokenKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Vertex key for a dense index.
    ///
    /// # Panics
    /// Panics when the index is out of range; indices only come from
    /// [`Self::index_of`] on the same graph.
    pub fn key(&self, index: usize) -> &TokenKey {
        &self.keys[index]
    }

    pub fn meta(&self, key: &TokenKey) -> Option<&TokenMeta> {
        self.index_of(key).map(|i| &self.meta[i])
    }

    /// Outgoing edges in insertion order; empty for unknown vertices.
    pub fn neighbors(&self, key: &TokenKey) -> &[Edge] {
        match self.index_of(key) {
            Some(i) => &self.adjacency[i],
            None => &[],
        }
    }

    /// Outgoing edges for a dense index.
    pub fn neighbors_by_index(&self, index: usize) -> &[Edge] {
        &self.adjacency[index]
    }

    /// Vertex keys in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &TokenKey> {
        self.keys.iter()
    }
}
