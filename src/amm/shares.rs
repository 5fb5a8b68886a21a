//! Ledger de shares do pool: saldos, supply total e allowances, lido como um token.

use std::collections::HashMap;

use super::errors::{PoolError, PoolErrorCode};
use super::guardrails::{checked_add, checked_sub};
use super::types::{Address, Amount, SHARE_DECIMALS};

#[derive(Clone, Debug, Default)]
pub struct ShareLedger {
    name: String,
    symbol: String,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl ShareLedger {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self { name: name.into(), symbol: symbol.into(), ..Self::default() }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn symbol(&self) -> &str { &self.symbol }
    pub const fn decimals(&self) -> u8 { SHARE_DECIMALS }
    pub fn total_supply(&self) -> Amount { self.total_supply }

    pub fn balance_of(&self, owner: Address) -> Amount {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    pub(crate) fn mint(&mut self, to: Address, amount: Amount) -> Result<(), PoolError> {
        let supply = checked_add(self.total_supply, amount)?;
        let balance = checked_add(self.balance_of(to), amount)?;
        self.total_supply = supply;
        self.balances.insert(to, balance);
        Ok(())
    }

    pub(crate) fn burn(&mut self, from: Address, amount: Amount) -> Result<(), PoolError> {
        let balance = self.balance_of(from);
        if amount > balance {
            return Err(crate::pool_err!(PoolErrorCode::InvalidLiquidity, shares => amount, balance => balance));
        }
        self.total_supply = checked_sub(self.total_supply, amount)?;
        self.balances.insert(from, balance - amount);
        Ok(())
    }

    /// Move shares entre contas; o saldo insuficiente vira `InvalidLiquidity`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), PoolError> {
        let balance = self.balance_of(from);
        if amount > balance {
            return Err(crate::pool_err!(PoolErrorCode::InvalidLiquidity, shares => amount, balance => balance));
        }
        self.balances.insert(from, balance - amount);
        let to_balance = checked_add(self.balance_of(to), amount)?;
        self.balances.insert(to, to_balance);
        Ok(())
    }

    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    pub fn transfer_from(&mut self, spender: Address, owner: Address, to: Address, amount: Amount) -> Result<(), PoolError> {
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            return Err(crate::pool_err!(
                PoolErrorCode::LedgerRejected,
                reason => "allowance de shares insuficiente",
                allowance => allowance,
            ));
        }
        self.transfer(owner, to, amount)?;
        if allowance != Amount::MAX {
            self.allowances.insert((owner, spender), allowance - amount);
        }
        Ok(())
    }
}
