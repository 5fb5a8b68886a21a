//! Pool de dois ativos: reservas, ledger de shares, dono e as operações.
//!
//! Toda operação mutável roda dentro de [`Pool::transact`]: trava de reentrada,
//! snapshot do estado do pool + checkpoint do host, e rollback completo em erro.
//! Dentro do corpo a ordem é sempre checagens → efeitos → interações.

use tracing::{debug, info, info_span, warn};

use super::errors::{from_ledger, PoolError, PoolErrorCode, Result};
use super::events::PoolEvent;
use super::guardrails::{checked_add, checked_sub, ensure_deadline, ensure_distinct, ensure_min, ensure_nonzero};
use super::ledger::Host;
use super::liquidity::{amounts_for_burn, initial_mint, optimal_deposit, quote, shares_for_deposit, DepositAmounts};
use super::pricing::spot_price;
use super::shares::ShareLedger;
use super::swap;
use super::types::{Address, Amount, Reserves, Timestamp, TokenPair, MINIMUM_LOCKED_SHARES, U256};
use crate::obs::wrap;

/// Parâmetros de `add_liquidity`, na ordem escolhida pelo chamador.
#[derive(Clone, Debug)]
pub struct AddLiquidity {
    pub token_x: Address,
    pub token_y: Address,
    pub amount_x_desired: Amount,
    pub amount_y_desired: Amount,
    pub amount_x_min: Amount,
    pub amount_y_min: Amount,
    pub recipient: Address,
    pub deadline: Timestamp,
}

#[derive(Clone, Debug)]
pub struct RemoveLiquidity {
    pub token_x: Address,
    pub token_y: Address,
    pub shares: Amount,
    pub amount_x_min: Amount,
    pub amount_y_min: Amount,
    pub recipient: Address,
    pub deadline: Timestamp,
}

/// Swap com entrada exata; `path` deve ser `[token_in, token_out]`.
#[derive(Clone, Debug)]
pub struct SwapExactIn {
    pub amount_in: Amount,
    pub amount_out_min: Amount,
    pub path: Vec<Address>,
    pub recipient: Address,
    pub deadline: Timestamp,
}

/// Resultado de um depósito, na orientação do chamador.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddLiquidityReceipt {
    pub amount_x: Amount,
    pub amount_y: Amount,
    pub shares_minted: Amount,
}

/// Visão somente-leitura do pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub address: Address,
    pub pair: TokenPair,
    pub reserves: Reserves,
    pub total_shares: Amount,
    pub owner: Address,
}

#[derive(Clone, Debug)]
struct PoolState {
    reserves: Reserves,
    shares: ShareLedger,
    owner: Address,
}

#[derive(Debug)]
pub struct Pool {
    address: Address,
    pair: TokenPair,
    state: PoolState,
    entered: bool,
}

impl Pool {
    /// Cria um pool vazio para o par `(token_x, token_y)` em qualquer ordem.
    pub fn new(address: Address, owner: Address, token_x: Address, token_y: Address) -> Result<Self> {
        let pair = ensure_distinct(token_x, token_y)?;
        if owner.is_zero() {
            return Err(PoolError::new(PoolErrorCode::InvalidOwner));
        }
        Ok(Self {
            address,
            pair,
            state: PoolState {
                reserves: Reserves::default(),
                shares: ShareLedger::new("Swap Pool Share", "SPS"),
                owner,
            },
            entered: false,
        })
    }

    /// Troca nome/símbolo do token de shares (só faz sentido antes do primeiro depósito).
    pub fn with_share_metadata(mut self, name: &str, symbol: &str) -> Self {
        self.state.shares = ShareLedger::new(name, symbol);
        self
    }

    pub fn address(&self) -> Address { self.address }
    pub fn pair(&self) -> TokenPair { self.pair }
    pub fn owner(&self) -> Address { self.state.owner }
    pub fn shares(&self) -> &ShareLedger { &self.state.shares }
    pub fn total_shares(&self) -> Amount { self.state.shares.total_supply() }
    pub fn share_balance(&self, owner: Address) -> Amount { self.state.shares.balance_of(owner) }
    pub const fn minimum_locked_shares() -> Amount { MINIMUM_LOCKED_SHARES }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            address: self.address,
            pair: self.pair,
            reserves: self.state.reserves,
            total_shares: self.total_shares(),
            owner: self.state.owner,
        }
    }

    // ---------------------------------------------------------------
    // Leitura
    // ---------------------------------------------------------------

    /// Reservas na ordem pedida, independente da ordem canônica.
    pub fn get_reserves(&self, token_x: Address, token_y: Address) -> Result<(Amount, Amount)> {
        let flipped = self.orientation(token_x, token_y)?;
        Ok(self.state.reserves.oriented(flipped))
    }

    /// Preço de 1 X em Y com escala 1e18.
    pub fn get_price(&self, token_x: Address, token_y: Address) -> Result<U256> {
        let (reserve_x, reserve_y) = self.get_reserves(token_x, token_y)?;
        let price = spot_price(reserve_x, reserve_y)?;
        debug!(%token_x, %token_y, %price, "get_price");
        Ok(price)
    }

    /// Cotação pura; não lê o estado do pool.
    pub fn get_amount_out(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
        swap::get_amount_out(amount_in, reserve_in, reserve_out)
    }

    /// Contrapartida de `amount_x` em Y que um depósito exigiria hoje.
    pub fn quote(&self, token_x: Address, token_y: Address, amount_x: Amount) -> Result<Amount> {
        let (reserve_x, reserve_y) = self.get_reserves(token_x, token_y)?;
        quote(amount_x, reserve_x, reserve_y)
    }

    // ---------------------------------------------------------------
    // Operações econômicas
    // ---------------------------------------------------------------

    pub fn add_liquidity<H: Host>(&mut self, host: &mut H, caller: Address, p: AddLiquidity) -> Result<AddLiquidityReceipt> {
        self.transact(host, "add_liquidity", |pool, host| {
            ensure_deadline(host.now(), p.deadline)?;
            let flipped = pool.orientation(p.token_x, p.token_y)?;
            let (desired_a, desired_b) = orient(flipped, p.amount_x_desired, p.amount_y_desired);
            let (min_a, min_b) = orient(flipped, p.amount_x_min, p.amount_y_min);

            let Reserves { a: reserve_a, b: reserve_b } = pool.state.reserves;
            let total = pool.total_shares();
            let (used, minted, locked) = if total == 0 {
                let used = DepositAmounts { amount_a: desired_a, amount_b: desired_b };
                ensure_min(used.amount_a, min_a, PoolErrorCode::InsufficientAmountA)?;
                ensure_min(used.amount_b, min_b, PoolErrorCode::InsufficientAmountB)?;
                let minted = initial_mint(desired_a, desired_b)?;
                (used, minted - MINIMUM_LOCKED_SHARES, MINIMUM_LOCKED_SHARES)
            } else {
                let used = optimal_deposit(desired_a, desired_b, min_a, min_b, reserve_a, reserve_b)?;
                (used, shares_for_deposit(used, reserve_a, reserve_b, total)?, 0)
            };
            let next = Reserves::new(checked_add(reserve_a, used.amount_a)?, checked_add(reserve_b, used.amount_b)?);

            // efeitos
            pool.state.reserves = next;
            if locked > 0 {
                pool.state.shares.mint(pool.address, locked)?;
            }
            pool.state.shares.mint(p.recipient, minted)?;

            // interações
            host.transfer_from(pool.pair.token_a, pool.address, caller, pool.address, used.amount_a)
                .map_err(from_ledger)?;
            host.transfer_from(pool.pair.token_b, pool.address, caller, pool.address, used.amount_b)
                .map_err(from_ledger)?;
            host.emit(PoolEvent::LiquidityAdded {
                provider: caller,
                token_a: pool.pair.token_a,
                token_b: pool.pair.token_b,
                amount_a: used.amount_a,
                amount_b: used.amount_b,
                shares_minted: minted,
            });
            info!(%caller, amount_a = used.amount_a, amount_b = used.amount_b, minted, "liquidity added");

            let (amount_x, amount_y) = orient(flipped, used.amount_a, used.amount_b);
            Ok(AddLiquidityReceipt { amount_x, amount_y, shares_minted: minted })
        })
    }

    /// Queima `shares` do chamador e devolve `(amount_x, amount_y)`.
    pub fn remove_liquidity<H: Host>(&mut self, host: &mut H, caller: Address, p: RemoveLiquidity) -> Result<(Amount, Amount)> {
        self.transact(host, "remove_liquidity", |pool, host| {
            ensure_deadline(host.now(), p.deadline)?;
            let flipped = pool.orientation(p.token_x, p.token_y)?;
            let balance = pool.share_balance(caller);
            if p.shares == 0 || p.shares > balance {
                return Err(crate::pool_err!(
                    PoolErrorCode::InvalidLiquidity,
                    shares => p.shares,
                    balance => balance,
                ));
            }

            let Reserves { a: reserve_a, b: reserve_b } = pool.state.reserves;
            // total anterior ao burn
            let (out_a, out_b) = amounts_for_burn(p.shares, reserve_a, reserve_b, pool.total_shares())?;
            let (min_a, min_b) = orient(flipped, p.amount_x_min, p.amount_y_min);
            ensure_min(out_a, min_a, PoolErrorCode::InsufficientAmountA)?;
            ensure_min(out_b, min_b, PoolErrorCode::InsufficientAmountB)?;
            let next = Reserves::new(checked_sub(reserve_a, out_a)?, checked_sub(reserve_b, out_b)?);

            // efeitos
            pool.state.shares.burn(caller, p.shares)?;
            pool.state.reserves = next;

            // interações
            host.transfer(pool.pair.token_a, pool.address, p.recipient, out_a).map_err(from_ledger)?;
            host.transfer(pool.pair.token_b, pool.address, p.recipient, out_b).map_err(from_ledger)?;
            host.emit(PoolEvent::LiquidityRemoved {
                provider: caller,
                token_a: pool.pair.token_a,
                token_b: pool.pair.token_b,
                amount_a: out_a,
                amount_b: out_b,
                shares_burned: p.shares,
            });
            info!(%caller, out_a, out_b, burned = p.shares, "liquidity removed");

            Ok(orient(flipped, out_a, out_b))
        })
    }

    pub fn swap_exact_tokens_for_tokens<H: Host>(&mut self, host: &mut H, caller: Address, p: SwapExactIn) -> Result<Amount> {
        self.transact(host, "swap", |pool, host| {
            ensure_deadline(host.now(), p.deadline)?;
            let (token_in, token_out) = match p.path.as_slice() {
                [token_in, token_out] => (*token_in, *token_out),
                _ => return Err(crate::pool_err!(PoolErrorCode::InvalidPath, len => p.path.len())),
            };
            let flipped = pool.orientation(token_in, token_out)?;
            ensure_nonzero(p.amount_in)?;

            let (reserve_in, reserve_out) = pool.state.reserves.oriented(flipped);
            let amount_out = swap::get_amount_out(p.amount_in, reserve_in, reserve_out)?;
            if amount_out < p.amount_out_min {
                return Err(crate::pool_err!(
                    PoolErrorCode::InsufficientOutputAmount,
                    amount_out => amount_out,
                    amount_out_min => p.amount_out_min,
                ));
            }
            let next_in = checked_add(reserve_in, p.amount_in)?;
            let next_out = checked_sub(reserve_out, amount_out)?;

            // efeitos
            let (a, b) = orient(flipped, next_in, next_out);
            pool.state.reserves = Reserves::new(a, b);

            // interações
            host.transfer_from(token_in, pool.address, caller, pool.address, p.amount_in).map_err(from_ledger)?;
            host.transfer(token_out, pool.address, p.recipient, amount_out).map_err(from_ledger)?;
            host.emit(PoolEvent::Swapped {
                trader: caller,
                token_in,
                token_out,
                amount_in: p.amount_in,
                amount_out,
                recipient: p.recipient,
            });
            wrap::record_invariant_growth((reserve_in, reserve_out), (next_in, next_out));
            info!(%caller, %token_in, amount_in = p.amount_in, amount_out, "swapped");

            Ok(amount_out)
        })
    }

    // ---------------------------------------------------------------
    // Shares como token
    // ---------------------------------------------------------------

    pub fn transfer_shares(&mut self, caller: Address, to: Address, amount: Amount) -> Result<()> {
        self.ensure_not_entered()?;
        self.state.shares.transfer(caller, to, amount)
    }

    pub fn approve_shares(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<()> {
        self.ensure_not_entered()?;
        self.state.shares.approve(caller, spender, amount);
        Ok(())
    }

    pub fn transfer_shares_from(&mut self, caller: Address, owner: Address, to: Address, amount: Amount) -> Result<()> {
        self.ensure_not_entered()?;
        self.state.shares.transfer_from(caller, owner, to, amount)
    }

    // ---------------------------------------------------------------
    // Manutenção (somente dono)
    // ---------------------------------------------------------------

    /// Envia ao dono o excedente de `token` que não está nas reservas.
    ///
    /// Para os tokens do par o excedente é `saldo - reserva`; para qualquer outro
    /// token o saldo inteiro é excedente. Nunca toca no que está contabilizado.
    pub fn recover_erc20<H: Host>(
        &mut self,
        host: &mut H,
        caller: Address,
        token_x: Address,
        token_y: Address,
        token: Address,
    ) -> Result<Amount> {
        self.transact(host, "recover_erc20", |pool, host| {
            pool.ensure_owner(caller)?;
            pool.orientation(token_x, token_y)?;

            let balance = host.balance_of(token, pool.address).map_err(from_ledger)?;
            let accounted = match pool.pair.side_of(token) {
                Some(false) => pool.state.reserves.a,
                Some(true) => pool.state.reserves.b,
                None => 0,
            };
            let surplus = balance.saturating_sub(accounted);
            if surplus == 0 {
                return Err(crate::pool_err!(
                    PoolErrorCode::NoTokensToRecover,
                    token => token,
                    balance => balance,
                    accounted => accounted,
                ));
            }

            let owner = pool.state.owner;
            host.transfer(token, pool.address, owner, surplus).map_err(from_ledger)?;
            info!(%token, surplus, %owner, "surplus recovered");
            Ok(surplus)
        })
    }

    /// Envia ao dono todo o saldo nativo do pool.
    pub fn withdraw_eth<H: Host>(&mut self, host: &mut H, caller: Address) -> Result<Amount> {
        self.transact(host, "withdraw_eth", |pool, host| {
            pool.ensure_owner(caller)?;
            let balance = host.native_balance(pool.address);
            if balance == 0 {
                return Err(PoolError::new(PoolErrorCode::NoEthToWithdraw));
            }
            let owner = pool.state.owner;
            host.send_native(pool.address, owner, balance).map_err(from_ledger)?;
            info!(balance, %owner, "native balance withdrawn");
            Ok(balance)
        })
    }

    pub fn transfer_ownership<H: Host>(&mut self, host: &mut H, caller: Address, new_owner: Address) -> Result<()> {
        self.transact(host, "transfer_ownership", |pool, host| {
            pool.ensure_owner(caller)?;
            if new_owner.is_zero() {
                return Err(PoolError::new(PoolErrorCode::InvalidOwner));
            }
            let previous_owner = std::mem::replace(&mut pool.state.owner, new_owner);
            host.emit(PoolEvent::OwnershipTransferred { previous_owner, new_owner });
            info!(%previous_owner, %new_owner, "ownership transferred");
            Ok(())
        })
    }

    // ---------------------------------------------------------------
    // Internos
    // ---------------------------------------------------------------

    /// Executa `body` de forma atômica: ou tudo vale, ou nada muda (pool e host).
    pub(crate) fn transact<H, T, F>(&mut self, host: &mut H, op: &'static str, body: F) -> Result<T>
    where
        H: Host,
        F: FnOnce(&mut Self, &mut H) -> Result<T>,
    {
        self.ensure_not_entered()?;
        let span = info_span!("pool_op", op, pool = %self.address);
        let _guard = span.enter();

        let saved = self.state.clone();
        let checkpoint = host.checkpoint();
        self.entered = true;
        let result = wrap::time(op, || body(self, host));
        self.entered = false;

        match result {
            Ok(value) => {
                host.commit(checkpoint);
                Ok(value)
            }
            Err(err) => {
                self.state = saved;
                host.revert_to(checkpoint);
                warn!(code = err.code.code(), detail = %err.to_log_json(), "operation reverted");
                Err(err)
            }
        }
    }

    fn ensure_not_entered(&self) -> Result<()> {
        if self.entered {
            return Err(PoolError::new(PoolErrorCode::ReentrantCall));
        }
        Ok(())
    }

    fn ensure_owner(&self, caller: Address) -> Result<()> {
        if caller != self.state.owner {
            return Err(crate::pool_err!(PoolErrorCode::UnauthorizedAccount, account => caller));
        }
        Ok(())
    }

    /// `true` quando `(token_x, token_y)` é o par na ordem invertida.
    fn orientation(&self, token_x: Address, token_y: Address) -> Result<bool> {
        let pair = ensure_distinct(token_x, token_y)?;
        if pair != self.pair {
            return Err(crate::pool_err!(PoolErrorCode::TokenNotInPair, token_x => token_x, token_y => token_y));
        }
        Ok(token_x != self.pair.token_a)
    }
}

#[inline]
fn orient(flipped: bool, first: Amount, second: Amount) -> (Amount, Amount) {
    if flipped { (second, first) } else { (first, second) }
}
