//! Utilitários para UI/roteadores: spot price, preço de execução, slippage e cotações.
//! Tudo em ponto fixo com escala [`PRICE_SCALE`] (1e18) e divisão floor.
//! Preços saem em [`U256`]: `reserve * 1e18` cabe em 256 bits para qualquer
//! reserva `u128`, então um pool desbalanceado ainda tem preço.

use super::errors::PoolError;
use super::guardrails::{ensure_nonzero, ensure_reserves};
use super::swap::get_amount_out;
use super::types::{Amount, Ppm, PPM_SCALE, PRICE_SCALE, U256};

// --------- Spot price ---------
/// Preço à vista de 1 X em Y: **p = reserve_y / reserve_x** (escala 1e18).
pub fn spot_price(reserve_x: Amount, reserve_y: Amount) -> Result<U256, PoolError> {
    ensure_reserves(reserve_x, reserve_y)?;
    Ok(scaled_ratio(reserve_y, reserve_x))
}

fn scaled_ratio(num: Amount, den: Amount) -> U256 {
    U256::from(num) * U256::from(PRICE_SCALE) / U256::from(den)
}

// --------- Execução e slippage ---------
/// Preço efetivo da troca X→Y para `amount_in`: **p_exec = out / amount_in** (escala 1e18).
pub fn execution_price(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<U256, PoolError> {
    ensure_nonzero(amount_in)?;
    let out = get_amount_out(amount_in, reserve_in, reserve_out)?;
    Ok(scaled_ratio(out, amount_in))
}

/// Slippage relativo em **PPM** comparando `p_exec` vs `spot` (sempre ≥0):
/// slippage_ppm = ((spot - p_exec) / spot) * 1e6
pub fn slippage_ppm(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Ppm, PoolError> {
    let spot = spot_price(reserve_in, reserve_out)?;
    let exec = execution_price(amount_in, reserve_in, reserve_out)?;
    if exec >= spot || spot.is_zero() { return Ok(0); }
    let q = (spot - exec) * U256::from(PPM_SCALE as u64) / spot;
    // q <= 1e6 porque exec < spot
    Ok(q.as_u32().min(PPM_SCALE))
}

// --------- Cotas com tolerância de slippage ---------
/// Retorna **min_out** para montar `amount_out_min` considerando `tolerance_ppm` (0..1e6)
/// min_out = floor( out * (1 - tol) )
pub fn min_out_with_tolerance(
    amount_in: Amount, reserve_in: Amount, reserve_out: Amount, tolerance_ppm: Ppm,
) -> Result<Amount, PoolError> {
    let out = get_amount_out(amount_in, reserve_in, reserve_out)?;
    let tol = tolerance_ppm.min(PPM_SCALE) as u64;
    let factor = (PPM_SCALE as u64) - tol; // (1 - tol)
    let n = U256::from(out) * U256::from(factor);
    Ok((n / U256::from(PPM_SCALE as u64)).as_u128())
}
