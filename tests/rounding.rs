//! Testes de direção de arredondamento: tudo é floor, sempre a favor do pool.

use swap_pool_core::amm::errors::PoolErrorCode;
use swap_pool_core::amm::liquidity::{amounts_for_burn, initial_mint, optimal_deposit, shares_for_deposit};
use swap_pool_core::amm::pricing::{min_out_with_tolerance, spot_price};
use swap_pool_core::amm::swap::get_amount_out;
use swap_pool_core::amm::types::{PRICE_SCALE, U256};

#[test]
fn r1_amount_out_is_floor_of_continuous_value() {
    let (x, y, dx) = (1_000_000u128 * PRICE_SCALE, 1_000_000u128 * PRICE_SCALE, 10_000u128 * PRICE_SCALE + 7);
    let out = get_amount_out(dx, x, y).unwrap();
    let num = U256::from(dx) * U256::from(y);
    let den = U256::from(x) + U256::from(dx);
    // out*den <= num < (out+1)*den
    assert!(U256::from(out) * den <= num);
    assert!(U256::from(out + 1) * den > num);
}

#[test]
fn r2_tiny_input_can_round_to_zero() {
    assert_eq!(get_amount_out(1, 100, 100).unwrap(), 0);
    assert_eq!(get_amount_out(1, 1_000_000, 1).unwrap(), 0);
}

#[test]
fn r3_quote_errors_are_classified() {
    assert_eq!(get_amount_out(0, 100, 100).unwrap_err(), PoolErrorCode::ZeroInputAmount);
    assert_eq!(get_amount_out(5, 0, 100).unwrap_err(), PoolErrorCode::InsufficientLiquidity);
    // entrada máxima ainda cota: floor(MAX * 100 / (MAX + 1)) = 99
    assert_eq!(get_amount_out(u128::MAX, 1, 100).unwrap(), 99);
}

#[test]
fn r4_mint_is_floor_of_sqrt_xy() {
    let (x, y) = (2_500_000u128 * PRICE_SCALE, 2_500_001u128 * PRICE_SCALE);
    let s = initial_mint(x, y).unwrap();
    let k = U256::from(x) * U256::from(y);
    assert!(U256::from(s) * U256::from(s) <= k);
    let s_plus = U256::from(s + 1);
    assert!(s_plus * s_plus > k);
}

#[test]
fn r5_burn_amounts_are_floor_of_proportion() {
    let (x, y, s) = (1_000_000u128 * PRICE_SCALE, 3_000_000u128 * PRICE_SCALE + 1, 1_000_000u128 * PRICE_SCALE);
    let burn = 123_456u128 * PRICE_SCALE + 3;
    let (xo, yo) = amounts_for_burn(burn, x, y, s).unwrap();
    let xo_theo = ((U256::from(x) * U256::from(burn)) / U256::from(s)).as_u128();
    let yo_theo = ((U256::from(y) * U256::from(burn)) / U256::from(s)).as_u128();
    assert_eq!(xo, xo_theo);
    assert_eq!(yo, yo_theo);
}

#[test]
fn r6_deposit_mint_never_exceeds_either_ratio() {
    let (ra, rb, total) = (1_000_003u128, 2_000_011u128, 1_414_217u128);
    let used = optimal_deposit(10_007, 40_000, 0, 0, ra, rb).unwrap();
    let minted = shares_for_deposit(used, ra, rb, total).unwrap();
    assert!(U256::from(minted) * U256::from(ra) <= U256::from(used.amount_a) * U256::from(total));
    assert!(U256::from(minted) * U256::from(rb) <= U256::from(used.amount_b) * U256::from(total));
}

#[test]
fn r7_prices_truncate() {
    assert_eq!(spot_price(3, 1).unwrap(), U256::from(PRICE_SCALE / 3));
    // 0,5% de tolerância sobre 9 -> floor(8.955) = 8
    assert_eq!(min_out_with_tolerance(5, 1_000, 2_000, 5_000).unwrap(), 8);
}
