//! # Omniroute Types Library
//!
//! ## Purpose
//!
//! Unified type system for the omniroute cross-chain routing engine: token
//! vertices, liquidity pools, swap/bridge edges, route results, the error
//! taxonomy, and the stable JSON wire forms used for golden-file testing.
//!
//! ## Design Philosophy
//!
//! - **One vocabulary**: every crate in the workspace speaks these types;
//!   nothing here depends on graph storage or solver internals.
//! - **Immutable at the seams**: edges and pools are plain data, cloned into
//!   the graph at build time and never mutated afterwards.
//! - **Typed failures**: builder, AMM, and routing failures are distinct
//!   enums so callers can match on exactly the case they can recover from.
//!
//! ## Quick Start
//!
//! ```rust
//! use omniroute_types::{Edge, LiquidityPool, PoolKind, TokenKey};
//!
//! let usdc_eth = TokenKey::new("USDC", "ethereum");
//! let weth_eth = TokenKey::new("WETH", "ethereum");
//!
//! let pool = LiquidityPool::new(PoolKind::ConstantProduct, 5_000_000.0, 1_500.0, 0.003);
//! let edge = Edge::swap(usdc_eth, weth_eth, Some(pool), None, 120_000.0, 3_000.0);
//! assert!(!edge.is_bridge());
//! ```

pub mod edge;
pub mod errors;
pub mod pool;
pub mod route;
pub mod token;
pub mod wire;

pub use edge::{Edge, EdgeKind};
pub use errors::{AmmError, GraphError, KeyParseError, RoutingError};
pub use pool::{LiquidityPool, PoolKind, MAX_FEE_FRACTION};
pub use route::{RouteResult, Step};
pub use token::{TokenKey, TokenMeta};
