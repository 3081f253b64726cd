//! Liquidity pool state attached to swap edges
//!
//! Reserves are in each token's native units. `liquidity_usd` and
//! `volume_24h` are advisory fields read by the validator; the solvers only
//! look at reserves, the fee, and the pool kind.

use serde::{Deserialize, Serialize};

/// Upper bound accepted for a pool fee fraction (5%).
pub const MAX_FEE_FRACTION: f64 = 0.05;

/// Which closed-form pricing curve the pool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    ConstantProduct,
    StableSwap,
    ConcentratedLiquidity,
}

impl PoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolKind::ConstantProduct => "constant_product",
            PoolKind::StableSwap => "stable_swap",
            PoolKind::ConcentratedLiquidity => "concentrated_liquidity",
        }
    }
}

/// Reserve snapshot for one directed pool edge.
///
/// `reserve_base` is the side the trade enters, `reserve_quote` the side it
/// leaves; a pool quoted in the opposite direction is a second edge with the
/// reserves swapped. JSON forms live in [`crate::wire`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityPool {
    pub kind: PoolKind,
    pub reserve_base: f64,
    pub reserve_quote: f64,
    /// Fee as a fraction, e.g. `0.003` for 30 bp.
    pub fee_fraction: f64,
    /// Total value locked in USD; advisory.
    pub liquidity_usd: f64,
    /// 24h volume in USD; advisory.
    pub volume_24h: Option<f64>,
    /// DEX label (e.g. `uniswap_v2`); advisory, used by the validator's
    /// diversification metric.
    pub venue: Option<String>,
}

impl LiquidityPool {
    pub fn new(kind: PoolKind, reserve_base: f64, reserve_quote: f64, fee_fraction: f64) -> Self {
        Self {
            kind,
            reserve_base,
            reserve_quote,
            fee_fraction,
            liquidity_usd: 0.0,
            volume_24h: None,
            venue: None,
        }
    }

    pub fn with_liquidity_usd(mut self, liquidity_usd: f64) -> Self {
        self.liquidity_usd = liquidity_usd;
        self
    }

    pub fn with_volume_24h(mut self, volume_24h: f64) -> Self {
        self.volume_24h = Some(volume_24h);
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Mid price before any trade, quote per base.
    pub fn spot_rate(&self) -> f64 {
        self.reserve_quote / self.reserve_base
    }

    /// Field-range check used by the graph builder. Returns the first
    /// violation as a human-readable reason.
    pub fn check(&self) -> Result<(), String> {
        if !self.reserve_base.is_finite() || !self.reserve_quote.is_finite() {
            return Err("reserves must be finite".to_string());
        }
        if self.reserve_base < 0.0 || self.reserve_quote < 0.0 {
            return Err(format!(
                "reserves must be non-negative (base {}, quote {})",
                self.reserve_base, self.reserve_quote
            ));
        }
        if !(0.0..=MAX_FEE_FRACTION).contains(&self.fee_fraction) {
            return Err(format!(
                "fee fraction {} outside [0, {}]",
                self.fee_fraction, MAX_FEE_FRACTION
            ));
        }
        if self.liquidity_usd < 0.0 {
            return Err(format!("negative liquidity_usd {}", self.liquidity_usd));
        }
        Ok(())
    }
}
