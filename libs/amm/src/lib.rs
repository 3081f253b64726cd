//! # Omniroute AMM Library - Pool Quote Kernels
//!
//! ## Purpose
//!
//! Closed-form output, effective-rate, and price-impact calculations for the
//! three pool families the router prices against: constant-product
//! (Uniswap-V2 style), stable-swap (Curve style), and concentrated liquidity
//! (Uniswap-V3 style, active-range approximation).
//!
//! ## Integration Points
//!
//! - **Input Sources**: pool reserve snapshots baked into graph edges
//! - **Output Destinations**: the edge cost model and the route validator
//! - **Configuration**: `AmmSettings` (amplification, active range, trade cap)
//!
//! ## Guarantees
//!
//! Every kernel is a pure function: no I/O, no allocation beyond the returned
//! quote. For a fixed pool the per-unit rate is monotone non-increasing in
//! trade size; the solvers' per-vertex amount bookkeeping is only sound while
//! that holds, so any new pool family added here must preserve it.

pub mod concentrated;
pub mod constant_product;
pub mod quote;
pub mod stable_swap;

pub use concentrated::ConcentratedLiquidityMath;
pub use constant_product::ConstantProductMath;
pub use quote::{quote_pool, SwapQuote};
pub use stable_swap::StableSwapMath;
