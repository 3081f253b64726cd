//! Stable-swap math (Curve-style)
//!
//! Approximates the StableSwap invariant by blending a constant-sum output
//! with the constant-product output. The blend weight grows with the
//! amplification coefficient and shrinks as the pool drifts from balance, so
//! a depegged pool degrades toward constant-product pricing.

use omniroute_types::AmmError;

use crate::constant_product::ConstantProductMath;
use crate::quote::SwapQuote;

/// Amplification at which a perfectly balanced pool would price fully
/// constant-sum.
const FULL_BLEND_AMPLIFICATION: f64 = 200.0;

pub struct StableSwapMath;

impl StableSwapMath {
    /// Quote a trade against a stable-swap pool.
    ///
    /// `amplification` is the pool's A coefficient (typically 100 for major
    /// stable pairs); other arguments as in
    /// [`ConstantProductMath::quote`].
    pub fn quote(
        amount_in: f64,
        reserve_in: f64,
        reserve_out: f64,
        fee_fraction: f64,
        amplification: f64,
        max_trade_fraction: f64,
    ) -> Result<SwapQuote, AmmError> {
        // Validation and the constant-product leg in one shot.
        let cp = ConstantProductMath::quote(
            amount_in,
            reserve_in,
            reserve_out,
            fee_fraction,
            max_trade_fraction,
        )?;

        let balance = reserve_in.min(reserve_out) / reserve_in.max(reserve_out);
        let blend = (amplification / FULL_BLEND_AMPLIFICATION).min(1.0) * balance;

        let constant_sum_out = amount_in * (1.0 - fee_fraction);
        let amount_out = blend * constant_sum_out + (1.0 - blend) * cp.amount_out;

        let effective_rate = amount_out / amount_in;
        let spot_rate_net = (reserve_out / reserve_in) * (1.0 - fee_fraction);
        let price_impact = (1.0 - effective_rate / spot_rate_net).clamp(0.0, 1.0);

        Ok(SwapQuote {
            amount_out,
            effective_rate,
            price_impact,
        })
    }
}
