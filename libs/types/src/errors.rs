//! Error taxonomy for the routing core
//!
//! Three layers with distinct recovery policies: AMM kernel failures are
//! recovered locally by the edge-cost function (nominal-rate fallback or
//! unusable edge), graph-build failures are fatal to the builder, and solver
//! failures surface to the caller. Validator findings are data, not errors.

use thiserror::Error;

use crate::token::TokenKey;

/// Failures raised inside the AMM quote kernel.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmmError {
    /// Input amount was zero or negative.
    #[error("input amount {amount} is not positive")]
    NonPositiveInput { amount: f64 },

    /// A pool reserve was zero or negative.
    #[error("pool reserve not positive (base {reserve_base}, quote {reserve_quote})")]
    NonPositiveReserve {
        reserve_base: f64,
        reserve_quote: f64,
    },

    /// Trade would consume too large a share of the base reserve.
    #[error("trade of {amount} exceeds {max_fraction} of base reserve {reserve_base}")]
    TradeTooLarge {
        amount: f64,
        reserve_base: f64,
        max_fraction: f64,
    },
}

/// Fatal failures during graph construction. None of these reach a solver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("duplicate vertex {key}")]
    DuplicateVertex { key: TokenKey },

    #[error("self-loop on {key}")]
    SelfLoop { key: TokenKey },

    #[error("edge {from} -> {to} references a vertex missing from the graph")]
    DanglingEdge { from: TokenKey, to: TokenKey },

    #[error("invalid pool on {from} -> {to}: {reason}")]
    InvalidPool {
        from: TokenKey,
        to: TokenKey,
        reason: String,
    },

    #[error("invalid bridge {from} -> {to}: {reason}")]
    InvalidBridge {
        from: TokenKey,
        to: TokenKey,
        reason: String,
    },
}

/// Failures surfaced by the solvers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    #[error("source vertex {key} not found in graph")]
    SourceNotFound { key: TokenKey },

    #[error("target vertex {key} not found in graph")]
    TargetNotFound { key: TokenKey },

    #[error("no route from {from} to {target} within the hop budget")]
    NoRoute { from: TokenKey, target: TokenKey },
}

/// Malformed canonical token key.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid token key '{input}': expected SYMBOL.chain")]
pub struct KeyParseError {
    pub input: String,
}
