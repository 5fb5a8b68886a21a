//! Referência de alta precisão ("goldens") baseada em **BigUint/BigRational**
//! para o pool CPMM (x·y=k) sem taxa.
//!
//! Objetivos desta referência:
//! 1. Calcular o resultado **contínuo/exato** do swap (sem quantização).
//! 2. Reproduzir a política de arredondamento do core (floor em out, mint e burn)
//!    com inteiros grandes, como **oráculo** independente do caminho em U256.
//! 3. Medir o desvio do invariante, `Δk/k`, do core discreto.
//!
//! Não entra no caminho de produção: serve para testes e geração de goldens.

use super::errors::{PoolError, PoolErrorCode};
use super::liquidity;
use super::swap;
use super::types::{Amount, MINIMUM_LOCKED_SHARES};

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::ToPrimitive;

// -------------------------
// Helpers de conversão
// -------------------------
#[inline]
fn bu(v: Amount) -> BigUint { BigUint::from(v) }
#[inline]
fn q_from_bu(n: &BigUint, d: &BigUint) -> BigRational {
    BigRational::new(BigInt::from(n.clone()), BigInt::from(d.clone()))
}
#[inline]
fn k_big(x: Amount, y: Amount) -> BigUint { bu(x) * bu(y) }

fn to_amount(v: &BigUint) -> Result<Amount, PoolError> {
    v.to_u128().ok_or_else(|| PoolError::new(PoolErrorCode::Overflow))
}

fn floor_rat_to_u128(r: &BigRational) -> Result<Amount, PoolError> {
    r.floor().to_integer().to_u128().ok_or_else(|| PoolError::new(PoolErrorCode::Overflow))
}

fn check_quote(dx: Amount, x: Amount, y: Amount) -> Result<(), PoolError> {
    if dx == 0 { return Err(PoolError::new(PoolErrorCode::ZeroInputAmount)); }
    if x == 0 || y == 0 { return Err(PoolError::new(PoolErrorCode::InsufficientLiquidity)); }
    Ok(())
}

// -------------------------
// Contínuo e política
// -------------------------
/// amountOut contínuo: `y - k / (x + dx)`, exato em racionais.
pub fn continuous_amount_out(x: Amount, y: Amount, dx: Amount) -> Result<BigRational, PoolError> {
    check_quote(dx, x, y)?;
    let k = q_from_bu(&k_big(x, y), &BigUint::from(1u8));
    let x1 = q_from_bu(&(bu(x) + bu(dx)), &BigUint::from(1u8));
    let y_q = q_from_bu(&bu(y), &BigUint::from(1u8));
    Ok(y_q - k / x1)
}

/// amountOut com a política do core: `floor(dx * y / (x + dx))`.
pub fn policy_amount_out(x: Amount, y: Amount, dx: Amount) -> Result<Amount, PoolError> {
    check_quote(dx, x, y)?;
    let (q, _r) = (bu(dx) * bu(y)).div_rem(&(bu(x) + bu(dx)));
    to_amount(&q)
}

/// Mint inicial: `floor(sqrt(x*y))`, rejeitado se não supera as shares travadas.
pub fn policy_initial_mint(x: Amount, y: Amount) -> Result<Amount, PoolError> {
    let s = to_amount(&k_big(x, y).sqrt())?;
    if s <= MINIMUM_LOCKED_SHARES {
        return Err(PoolError::new(PoolErrorCode::ZeroInitialLiquidity));
    }
    Ok(s)
}

/// Burn proporcional com floor em cada lado.
pub fn policy_burn(shares: Amount, x: Amount, y: Amount, total: Amount) -> Result<(Amount, Amount), PoolError> {
    if shares == 0 || shares > total {
        return Err(PoolError::new(PoolErrorCode::InvalidLiquidity));
    }
    let out_x = to_amount(&((bu(shares) * bu(x)) / bu(total)))?;
    let out_y = to_amount(&((bu(shares) * bu(y)) / bu(total)))?;
    Ok((out_x, out_y))
}

// -------------------------
// Estruturas de comparação (goldens)
// -------------------------
#[derive(Debug, Clone)]
pub struct RefOut {
    pub out_core: Amount,
    pub out_policy: Amount,
    pub out_cont_floor: Amount,
    pub out_cont: BigRational,
    /// `(k1 - k0) / k0` do core; nunca negativo.
    pub dk_over_k_core: BigRational,
}

fn dk_over_k_from_core(x: Amount, y: Amount, dx: Amount, out: Amount) -> BigRational {
    let k0 = k_big(x, y);
    let k1 = (bu(x) + bu(dx)) * (bu(y) - bu(out));
    if k1 >= k0 {
        q_from_bu(&(k1 - &k0), &k0)
    } else {
        -q_from_bu(&(&k0 - k1), &k0)
    }
}

/// Compara o core com a referência (swap X→Y).
pub fn golden_amount_out(x: Amount, y: Amount, dx: Amount) -> Result<RefOut, PoolError> {
    let out_core = swap::get_amount_out(dx, x, y)?;
    let out_policy = policy_amount_out(x, y, dx)?;
    let out_cont = continuous_amount_out(x, y, dx)?;
    let out_cont_floor = floor_rat_to_u128(&out_cont)?;
    let dk_over_k_core = dk_over_k_from_core(x, y, dx, out_core);
    Ok(RefOut { out_core, out_policy, out_cont_floor, out_cont, dk_over_k_core })
}

/// Compara mint inicial e burn do core com a referência.
pub fn golden_liquidity(x: Amount, y: Amount, burn: Amount) -> Result<((Amount, Amount), (Amount, Amount)), PoolError> {
    let minted_core = liquidity::initial_mint(x, y)?;
    let minted_ref = policy_initial_mint(x, y)?;
    let burn_core = liquidity::amounts_for_burn(burn, x, y, minted_core)?;
    let burn_ref = policy_burn(burn, x, y, minted_ref)?;
    Ok(((minted_core, minted_ref), (burn_core.0, burn_ref.0)))
}
