//! Validações e helpers numéricos seguros para o pool.
//! Objetivo: entradas seguras e divisões/multiplicações sem estouro.

use super::errors::{PoolError, PoolErrorCode};
use super::types::{Address, Amount, Timestamp, TokenPair, U256};

#[inline]
pub fn ensure_nonzero(amount: Amount) -> Result<(), PoolError> {
    if amount == 0 {
        Err(PoolError::new(PoolErrorCode::ZeroInputAmount))
    } else {
        Ok(())
    }
}

#[inline]
pub fn ensure_reserves(reserve_in: Amount, reserve_out: Amount) -> Result<(), PoolError> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(crate::pool_err!(
            PoolErrorCode::InsufficientLiquidity,
            reserve_in => reserve_in,
            reserve_out => reserve_out,
        ));
    }
    Ok(())
}

/// Rejeita chamadas cujo prazo já passou (`now > deadline`).
#[inline]
pub fn ensure_deadline(now: Timestamp, deadline: Timestamp) -> Result<(), PoolError> {
    if now > deadline {
        return Err(crate::pool_err!(PoolErrorCode::Expired, deadline => deadline, now => now));
    }
    Ok(())
}

/// Canonicaliza o par informado; tokens iguais são rejeitados.
#[inline]
pub fn ensure_distinct(x: Address, y: Address) -> Result<TokenPair, PoolError> {
    TokenPair::sorted(x, y).ok_or_else(|| crate::pool_err!(PoolErrorCode::IdenticalTokens, token => x))
}

#[inline]
pub fn ensure_min(amount: Amount, min: Amount, code: PoolErrorCode) -> Result<(), PoolError> {
    if amount < min {
        return Err(crate::pool_err!(code, amount => amount, min => min));
    }
    Ok(())
}

#[inline]
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount, PoolError> {
    a.checked_add(b).ok_or(PoolError::new(PoolErrorCode::Overflow))
}

#[inline]
pub fn checked_sub(a: Amount, b: Amount) -> Result<Amount, PoolError> {
    a.checked_sub(b).ok_or(PoolError::new(PoolErrorCode::Overflow))
}

#[inline]
pub fn mul_u128_to_u256(a: Amount, b: Amount) -> U256 {
    U256::from(a) * U256::from(b)
}

#[inline]
pub fn u256_to_u128_checked(v: U256) -> Result<Amount, PoolError> {
    if v > U256::from(u128::MAX) {
        Err(PoolError::new(PoolErrorCode::Overflow))
    } else {
        Ok(v.as_u128())
    }
}

/// `floor(a * b / d)` com o produto em 256 bits.
pub fn mul_div_floor(a: Amount, b: Amount, d: Amount) -> Result<Amount, PoolError> {
    if d == 0 {
        return Err(PoolError::new(PoolErrorCode::Overflow));
    }
    u256_to_u128_checked(mul_u128_to_u256(a, b) / U256::from(d))
}

/// Raiz quadrada inteira (floor) por bisseção.
pub fn isqrt_u256(n: U256) -> U256 {
    if n.is_zero() { return U256::zero(); }
    let mut low = U256::zero();
    let mut high = n;
    while low < high {
        let mid = (low + high + U256::one()) >> 1; // ceil((low+high)/2)
        // evitar overflow: mid*mid <= n  <=>  mid <= n/mid
        if mid <= n / mid { low = mid; } else { high = mid - U256::one(); }
    }
    low
}
