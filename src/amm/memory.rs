//! Host em memória: ledger de tokens, moeda nativa, relógio e journal.
//! Ambiente de testes e do binário de demonstração; não faz parte do estado do pool.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::events::PoolEvent;
use super::ledger::{Host, LedgerError, TokenLedger};
use super::types::{Address, Amount, Timestamp};

#[derive(Debug, Clone, Default)]
struct TokenState {
    decimals: u8,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl TokenState {
    fn balance(&self, owner: Address) -> Amount {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    fn move_balance(&mut self, token: Address, from: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balance(from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance { token, owner: from, balance, needed: amount });
        }
        if from == to {
            return Ok(());
        }
        let credited = self.credited(token, to, amount)?;
        self.balances.insert(from, balance - amount);
        self.balances.insert(to, credited);
        Ok(())
    }

    fn credited(&self, token: Address, owner: Address, amount: Amount) -> Result<Amount, LedgerError> {
        self.balance(owner).checked_add(amount).ok_or(LedgerError::BalanceOverflow { token, owner })
    }
}

#[derive(Debug, Clone, Default)]
struct WorldState {
    tokens: HashMap<Address, TokenState>,
    native: HashMap<Address, Amount>,
    events: Vec<PoolEvent>,
}

/// Mundo em memória com snapshots para rollback de chamadas.
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: WorldState,
    journal: Vec<WorldState>,
    now: Timestamp,
    refuses_native: HashSet<Address>,
}

impl MemoryHost {
    pub fn new(now: Timestamp) -> Self {
        Self { now, ..Self::default() }
    }

    /// Registra um token com `decimals`; idempotente.
    pub fn deploy_token(&mut self, token: Address, decimals: u8) {
        self.state.tokens.entry(token).or_insert_with(|| TokenState { decimals, ..TokenState::default() });
    }

    pub fn mint(&mut self, token: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        let state = self.token_mut(token)?;
        let supply = state.total_supply.checked_add(amount).ok_or(LedgerError::SupplyOverflow(token))?;
        let credited = state.credited(token, to, amount)?;
        state.total_supply = supply;
        state.balances.insert(to, credited);
        Ok(())
    }

    pub fn total_supply(&self, token: Address) -> Result<Amount, LedgerError> {
        self.token(token).map(|t| t.total_supply)
    }

    pub fn set_time(&mut self, now: Timestamp) {
        self.now = now;
    }

    pub fn advance_time(&mut self, secs: Timestamp) {
        self.now = self.now.saturating_add(secs);
    }

    /// Credita moeda nativa do nada (gênese/faucet de teste); satura em `u128::MAX`.
    pub fn fund_native(&mut self, to: Address, amount: Amount) {
        let balance = self.native_balance(to).saturating_add(amount);
        self.state.native.insert(to, balance);
    }

    /// Marca `who` como um recebedor que recusa moeda nativa.
    pub fn refuse_native(&mut self, who: Address) {
        self.refuses_native.insert(who);
    }

    pub fn events(&self) -> &[PoolEvent] {
        &self.state.events
    }

    pub fn take_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.state.events)
    }

    fn token(&self, token: Address) -> Result<&TokenState, LedgerError> {
        self.state.tokens.get(&token).ok_or(LedgerError::UnknownToken(token))
    }

    fn token_mut(&mut self, token: Address) -> Result<&mut TokenState, LedgerError> {
        self.state.tokens.get_mut(&token).ok_or(LedgerError::UnknownToken(token))
    }
}

impl TokenLedger for MemoryHost {
    fn balance_of(&self, token: Address, owner: Address) -> Result<Amount, LedgerError> {
        self.token(token).map(|t| t.balance(owner))
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<Amount, LedgerError> {
        self.token(token).map(|t| t.allowance(owner, spender))
    }

    fn decimals(&self, token: Address) -> Result<u8, LedgerError> {
        self.token(token).map(|t| t.decimals)
    }

    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: Amount) -> Result<(), LedgerError> {
        self.token_mut(token)?.allowances.insert((owner, spender), amount);
        Ok(())
    }

    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        trace!(%token, %from, %to, amount, "transfer");
        self.token_mut(token)?.move_balance(token, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        trace!(%token, %spender, %owner, %to, amount, "transfer_from");
        let state = self.token_mut(token)?;
        let allowance = state.allowance(owner, spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance { token, owner, spender, allowance, needed: amount });
        }
        state.move_balance(token, owner, to, amount)?;
        if allowance != Amount::MAX {
            state.allowances.insert((owner, spender), allowance - amount);
        }
        Ok(())
    }
}

impl Host for MemoryHost {
    type Checkpoint = usize;

    fn now(&self) -> Timestamp {
        self.now
    }

    fn native_balance(&self, owner: Address) -> Amount {
        self.state.native.get(&owner).copied().unwrap_or(0)
    }

    fn send_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        if self.refuses_native.contains(&to) {
            return Err(LedgerError::NativeTransferRejected { receiver: to });
        }
        let balance = self.native_balance(from);
        if balance < amount {
            return Err(LedgerError::InsufficientNativeBalance { owner: from, balance, needed: amount });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .native_balance(to)
            .checked_add(amount)
            .ok_or(LedgerError::NativeBalanceOverflow { owner: to })?;
        self.state.native.insert(from, balance - amount);
        self.state.native.insert(to, credited);
        Ok(())
    }

    fn emit(&mut self, event: PoolEvent) {
        self.state.events.push(event);
    }

    fn checkpoint(&mut self) -> usize {
        self.journal.push(self.state.clone());
        self.journal.len() - 1
    }

    fn revert_to(&mut self, checkpoint: usize) {
        if let Some(saved) = self.journal.get(checkpoint).cloned() {
            self.state = saved;
        }
        self.journal.truncate(checkpoint);
    }

    fn commit(&mut self, checkpoint: usize) {
        self.journal.truncate(checkpoint);
    }
}
