//! Liquidez (CPMM): mint inicial, depósito proporcional e burn de shares.
//! Políticas:
//! - shares_mint: **floor** (raiz inteira no primeiro depósito, min das razões depois)
//! - amounts_out em burn: **floor**, sobre o `total_shares` anterior ao burn
//! - o lado que limita o depósito entra integralmente; o outro é a contrapartida proporcional

use super::errors::{PoolError, PoolErrorCode};
use super::guardrails::{
    ensure_min, ensure_nonzero, ensure_reserves, isqrt_u256, mul_div_floor, mul_u128_to_u256,
    u256_to_u128_checked,
};
use super::types::{Amount, MINIMUM_LOCKED_SHARES};

/// Montantes efetivamente usados num depósito, na ordem canônica.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositAmounts {
    pub amount_a: Amount,
    pub amount_b: Amount,
}

/// Mint **inicial** de shares: `floor(sqrt(x*y))`.
/// Precisa superar [`MINIMUM_LOCKED_SHARES`], que ficam travadas no pool.
pub fn initial_mint(x: Amount, y: Amount) -> Result<Amount, PoolError> {
    let k = mul_u128_to_u256(x, y);
    let shares = u256_to_u128_checked(isqrt_u256(k))?;
    if shares <= MINIMUM_LOCKED_SHARES {
        return Err(crate::pool_err!(
            PoolErrorCode::ZeroInitialLiquidity,
            shares => shares,
            locked => MINIMUM_LOCKED_SHARES,
        ));
    }
    Ok(shares)
}

/// Contrapartida proporcional: `floor(amount_x * reserve_y / reserve_x)`.
pub fn quote(amount_x: Amount, reserve_x: Amount, reserve_y: Amount) -> Result<Amount, PoolError> {
    ensure_nonzero(amount_x)?;
    ensure_reserves(reserve_x, reserve_y)?;
    mul_div_floor(amount_x, reserve_y, reserve_x)
}

/// Escolhe os montantes de um depósito num pool já financiado.
///
/// Se a contrapartida de `desired_a` cabe em `desired_b`, A limita e entra
/// inteiro; senão B limita. Os mínimos são checados nos dois lados.
pub fn optimal_deposit(
    desired_a: Amount,
    desired_b: Amount,
    min_a: Amount,
    min_b: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
) -> Result<DepositAmounts, PoolError> {
    ensure_reserves(reserve_a, reserve_b)?;

    let b_optimal = mul_div_floor(desired_a, reserve_b, reserve_a)?;
    let used = if b_optimal <= desired_b {
        DepositAmounts { amount_a: desired_a, amount_b: b_optimal }
    } else {
        let a_optimal = mul_div_floor(desired_b, reserve_a, reserve_b)?;
        DepositAmounts { amount_a: a_optimal, amount_b: desired_b }
    };

    ensure_min(used.amount_a, min_a, PoolErrorCode::InsufficientAmountA)?;
    ensure_min(used.amount_b, min_b, PoolErrorCode::InsufficientAmountB)?;
    Ok(used)
}

/// Mint em pool existente. Fórmula: `min(da * S / a, db * S / b)` com floor.
pub fn shares_for_deposit(
    used: DepositAmounts,
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Amount,
) -> Result<Amount, PoolError> {
    ensure_reserves(reserve_a, reserve_b)?;
    let sa = mul_div_floor(used.amount_a, total_shares, reserve_a)?;
    let sb = mul_div_floor(used.amount_b, total_shares, reserve_b)?;
    let shares = sa.min(sb);
    if shares == 0 {
        return Err(crate::pool_err!(
            PoolErrorCode::InsufficientLiquidity,
            amount_a => used.amount_a,
            amount_b => used.amount_b,
        ));
    }
    Ok(shares)
}

/// Burn de shares (proporcional). Retorna `(amount_a, amount_b)` com **floor**.
pub fn amounts_for_burn(
    shares: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Amount,
) -> Result<(Amount, Amount), PoolError> {
    if shares == 0 || shares > total_shares {
        return Err(crate::pool_err!(
            PoolErrorCode::InvalidLiquidity,
            shares => shares,
            total_shares => total_shares,
        ));
    }
    let out_a = mul_div_floor(shares, reserve_a, total_shares)?;
    let out_b = mul_div_floor(shares, reserve_b, total_shares)?;
    if out_a == 0 && out_b == 0 {
        return Err(crate::pool_err!(PoolErrorCode::InsufficientLiquidity, shares => shares));
    }
    Ok((out_a, out_b))
}
