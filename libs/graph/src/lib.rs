//! # Omniroute Graph Library
//!
//! ## Purpose
//!
//! The multi-chain token graph the solvers run over: vertices are
//! `(symbol, chain)` pairs, edges are same-chain swaps or cross-chain
//! bridges. Construction goes through [`GraphBuilder`], which enforces the
//! structural invariants (no self-loops, no dangling edges, no duplicate
//! vertices, well-formed pools and bridges); a built [`TokenGraph`] is
//! read-only and safe to share across concurrent route queries.
//!
//! ## Integration Points
//!
//! - **Input Sources**: caller-provided vertices and edges, or the
//!   [`sources`] trait contracts (price feed, pool source, bridge list)
//!   driven by [`GraphAssembler`](sources::GraphAssembler)
//! - **Output Destinations**: the Classic and BMSSP solvers, the validator
//! - **Serialized Form**: JSON adjacency object, stable for golden tests

pub mod builder;
pub mod graph;
pub mod serialize;
pub mod sources;

pub use builder::GraphBuilder;
pub use graph::TokenGraph;
pub use serialize::GraphCodecError;
pub use sources::{BridgeDescriptor, BridgeSource, GraphAssembler, PoolSource, PriceFeed};
