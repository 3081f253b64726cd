//! Constant-product (x·y = k) swap math
//!
//! The reference curve for the other two kernels: stable-swap blends against
//! it and concentrated liquidity applies it to range-scaled reserves.

use omniroute_types::AmmError;

use crate::quote::SwapQuote;

/// Constant-product math with exact closed forms.
pub struct ConstantProductMath;

impl ConstantProductMath {
    /// Quote a trade against a constant-product pool.
    ///
    /// # Arguments
    /// * `amount_in` - input amount in base-token units
    /// * `reserve_in` - base-side reserve
    /// * `reserve_out` - quote-side reserve
    /// * `fee_fraction` - pool fee as a fraction (0.003 = 30 bp)
    /// * `max_trade_fraction` - largest accepted `amount_in / reserve_in`
    ///
    /// # Returns
    /// Output amount, realized rate, and price impact relative to the
    /// fee-adjusted spot rate.
    pub fn quote(
        amount_in: f64,
        reserve_in: f64,
        reserve_out: f64,
        fee_fraction: f64,
        max_trade_fraction: f64,
    ) -> Result<SwapQuote, AmmError> {
        if amount_in <= 0.0 || !amount_in.is_finite() {
            return Err(AmmError::NonPositiveInput { amount: amount_in });
        }
        if reserve_in <= 0.0 || reserve_out <= 0.0 {
            return Err(AmmError::NonPositiveReserve {
                reserve_base: reserve_in,
                reserve_quote: reserve_out,
            });
        }
        if amount_in >= max_trade_fraction * reserve_in {
            return Err(AmmError::TradeTooLarge {
                amount: amount_in,
                reserve_base: reserve_in,
                max_fraction: max_trade_fraction,
            });
        }

        let amount_in_after_fee = amount_in * (1.0 - fee_fraction);
        let amount_out =
            (reserve_out * amount_in_after_fee) / (reserve_in + amount_in_after_fee);

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
