//! Cotação pura de swap (CPMM x·y=k, sem taxa).
//! - get_amount_out: `floor(amount_in * reserve_out / (reserve_in + amount_in))`
//! - não depende de estado: o chamador informa as reservas

use super::errors::{from_quote_inputs, PoolError};
use super::guardrails::u256_to_u128_checked;
use super::types::{Amount, U256};

/// Quanto de `token_out` sai ao entrar `amount_in` de `token_in`.
///
/// Como `out < reserve_out` e a divisão é floor, o produto das reservas após a
/// troca nunca diminui: `(r_in + dx) * (r_out - out) >= r_in * r_out`.
pub fn get_amount_out(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount, PoolError> {
    if let Some(code) = from_quote_inputs(amount_in, reserve_in, reserve_out) {
        return Err(crate::pool_err!(
            code,
            amount_in => amount_in,
            reserve_in => reserve_in,
            reserve_out => reserve_out,
        ));
    }

    let num = U256::from(amount_in) * U256::from(reserve_out);
    let den = U256::from(reserve_in) + U256::from(amount_in);
    let out = u256_to_u128_checked(num / den)?; // floor
    tracing::trace!(amount_in, reserve_in, reserve_out, out, "quote");
    Ok(out)
}
