//! Concentrated-liquidity math (Uniswap-V3 style)
//!
//! Full tick-walking is overkill for route costing: within the active range
//! a V3 position behaves like a constant-product pool over its virtual
//! reserves. The kernel scales both reserves by the active-range fraction
//! and prices against that, which makes impact steeper than a full-range
//! pool of the same size.

use omniroute_types::AmmError;

use crate::constant_product::ConstantProductMath;
use crate::quote::SwapQuote;

pub struct ConcentratedLiquidityMath;

impl ConcentratedLiquidityMath {
    /// Quote a trade against the active range of a concentrated pool.
    ///
    /// `active_range_fraction` is the share of reserves live at the current
    /// price; the trade cap applies to the scaled base reserve.
    pub fn quote(
        amount_in: f64,
        reserve_in: f64,
        reserve_out: f64,
        fee_fraction: f64,
        active_range_fraction: f64,
        max_trade_fraction: f64,
    ) -> Result<SwapQuote, AmmError> {
        let effective_in = reserve_in * active_range_fraction;
        let effective_out = reserve_out * active_range_fraction;

        ConstantProductMath::quote(
            amount_in,
            effective_in,
            effective_out,
            fee_fraction,
            max_trade_fraction,
        )
    }
}
