//! Pool-kind dispatch and the quote type

use omniroute_config::AmmSettings;
use omniroute_types::{AmmError, LiquidityPool, PoolKind};
use tracing::trace;

use crate::concentrated::ConcentratedLiquidityMath;
use crate::constant_product::ConstantProductMath;
use crate::stable_swap::StableSwapMath;

/// Result of pricing one trade against one pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapQuote {
    /// Amount received, quote-token units.
    pub amount_out: f64,
    /// Realized `amount_out / amount_in`.
    pub effective_rate: f64,
    /// Shortfall versus the fee-adjusted spot rate, in `[0, 1]`.
    pub price_impact: f64,
}

/// Price a trade against a pool, selecting the kernel by pool kind.
pub fn quote_pool(
    pool: &LiquidityPool,
    amount_in: f64,
    settings: &AmmSettings,
) -> Result<SwapQuote, AmmError> {
    let quote = match pool.kind {
        PoolKind::ConstantProduct => ConstantProductMath::quote(
            amount_in,
            pool.reserve_base,
            pool.reserve_quote,
            pool.fee_fraction,
            settings.max_trade_fraction,
        ),
        PoolKind::StableSwap => StableSwapMath::quote(
            amount_in,
            pool.reserve_base,
            pool.reserve_quote,
            pool.fee_fraction,
            settings.stable_amplification,
            settings.max_trade_fraction,
        ),
        PoolKind::ConcentratedLiquidity => ConcentratedLiquidityMath::quote(
            amount_in,
            pool.reserve_base,
            pool.reserve_quote,
            pool.fee_fraction,
            settings.active_range_fraction,
            settings.max_trade_fraction,
        ),
    }?;

    trace!(
        kind = pool.kind.as_str(),
        amount_in,
        amount_out = quote.amount_out,
        price_impact = quote.price_impact,
        "pool quote"
    );
    Ok(quote)
}
