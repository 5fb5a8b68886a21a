use anyhow::Result;
use tracing::{info, warn};

use swap_pool_core::amm::{
    AddLiquidity, Address, Host, MemoryHost, Pool, RemoveLiquidity, SwapExactIn, TokenLedger,
};
use swap_pool_core::amm::types::PRICE_SCALE;
use swap_pool_core::telemetry::{self, TelemetryConfig};

const POOL: Address = Address::from_low_u64(0xF00);
const OWNER: Address = Address::from_low_u64(0x1);
const ALICE: Address = Address::from_low_u64(0xA11CE);
const BOB: Address = Address::from_low_u64(0xB0B);
const WETH: Address = Address::from_low_u64(0xE7);
const USDC: Address = Address::from_low_u64(0xC0);

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = TelemetryConfig::from_env()?;
    let tel = telemetry::init("swap-pool-core", &cfg)?;

    let mut host = MemoryHost::new(1_700_000_000);
    for token in [WETH, USDC] {
        host.deploy_token(token, 18);
        for who in [ALICE, BOB] {
            host.mint(token, who, 1_000_000 * PRICE_SCALE)?;
            host.approve(token, who, POOL, u128::MAX)?;
        }
    }
    let mut pool = Pool::new(POOL, OWNER, WETH, USDC)?.with_share_metadata("WETH/USDC Pool Share", "WU-SPS");
    let deadline = host.now() + 600;

    let receipt = pool.add_liquidity(&mut host, ALICE, AddLiquidity {
        token_x: WETH,
        token_y: USDC,
        amount_x_desired: 100 * PRICE_SCALE,
        amount_y_desired: 300_000 * PRICE_SCALE,
        amount_x_min: 0,
        amount_y_min: 0,
        recipient: ALICE,
        deadline,
    })?;
    info!(shares = receipt.shares_minted, "pool financiado");

    for (i, amount_in) in [1u128, 5, 10].into_iter().enumerate() {
        let span = telemetry::make_info_span("swap", i as u32, &cfg.commit_sha);
        let _guard = span.enter();
        let out = pool.swap_exact_tokens_for_tokens(&mut host, BOB, SwapExactIn {
            amount_in: amount_in * PRICE_SCALE,
            amount_out_min: 0,
            path: vec![WETH, USDC],
            recipient: BOB,
            deadline,
        })?;
        let price = pool.get_price(WETH, USDC)?;
        info!(amount_in, out, %price, "swap executado");
    }

    // slippage apertado demais: revertido sem efeitos
    let (reserve_weth, reserve_usdc) = pool.get_reserves(WETH, USDC)?;
    let quote = Pool::get_amount_out(PRICE_SCALE, reserve_weth, reserve_usdc)?;
    if let Err(err) = pool.swap_exact_tokens_for_tokens(&mut host, BOB, SwapExactIn {
        amount_in: PRICE_SCALE,
        amount_out_min: quote + 1,
        path: vec![WETH, USDC],
        recipient: BOB,
        deadline,
    }) {
        warn!(error = %err.to_user_string(), "swap rejeitado");
    }

    let shares = pool.share_balance(ALICE);
    let (weth, usdc) = pool.remove_liquidity(&mut host, ALICE, RemoveLiquidity {
        token_x: WETH,
        token_y: USDC,
        shares,
        amount_x_min: 0,
        amount_y_min: 0,
        recipient: ALICE,
        deadline,
    })?;
    info!(weth, usdc, snapshot = ?pool.snapshot(), "liquidez removida");

    tel.shutdown();
    Ok(())
}
