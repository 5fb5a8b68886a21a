//! Capacidades consumidas pelo pool: o ledger de tokens fungíveis e o host
//! (relógio, moeda nativa, eventos e journal para rollback).

use thiserror::Error;

use super::events::PoolEvent;
use super::types::{Address, Amount, Timestamp};

/// Falhas reportadas pelo ledger externo. O pool as propaga sem reinterpretar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("token {0} desconhecido")]
    UnknownToken(Address),
    #[error("ERC20InsufficientBalance: {owner} tem {balance} de {token}, precisa {needed}")]
    InsufficientBalance {
        token: Address,
        owner: Address,
        balance: Amount,
        needed: Amount,
    },
    #[error("ERC20InsufficientAllowance: {spender} pode gastar {allowance} de {owner} em {token}, precisa {needed}")]
    InsufficientAllowance {
        token: Address,
        owner: Address,
        spender: Address,
        allowance: Amount,
        needed: Amount,
    },
    #[error("saldo de {owner} em {token} excederia u128")]
    BalanceOverflow { token: Address, owner: Address },
    #[error("supply de {0} excederia u128")]
    SupplyOverflow(Address),
    #[error("saldo nativo de {owner} excederia u128")]
    NativeBalanceOverflow { owner: Address },
    #[error("saldo nativo de {owner} é {balance}, precisa {needed}")]
    InsufficientNativeBalance {
        owner: Address,
        balance: Amount,
        needed: Amount,
    },
    #[error("{receiver} recusou a moeda nativa")]
    NativeTransferRejected { receiver: Address },
}

/// Interface padrão de token fungível, endereçada pelo contrato do token.
pub trait TokenLedger {
    fn balance_of(&self, token: Address, owner: Address) -> Result<Amount, LedgerError>;

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<Amount, LedgerError>;

    fn decimals(&self, token: Address) -> Result<u8, LedgerError>;

    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: Amount) -> Result<(), LedgerError>;

    /// `from` transfere `amount` para `to`.
    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: Amount) -> Result<(), LedgerError>;

    /// `spender` move `amount` de `owner` para `to`, consumindo allowance.
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}

/// Ambiente de execução que hospeda o pool.
///
/// Cada operação mutável do pool roda entre `checkpoint` e `commit`; em caso de
/// erro o pool chama `revert_to` e o host descarta tudo desde o checkpoint
/// (saldos, allowances, moeda nativa e eventos).
pub trait Host: TokenLedger {
    type Checkpoint;

    /// Timestamp do bloco/chamada corrente.
    fn now(&self) -> Timestamp;

    fn native_balance(&self, owner: Address) -> Amount;

    /// Envia moeda nativa; o destinatário pode recusar.
    fn send_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), LedgerError>;

    fn emit(&mut self, event: PoolEvent);

    fn checkpoint(&mut self) -> Self::Checkpoint;

    fn revert_to(&mut self, checkpoint: Self::Checkpoint);

    fn commit(&mut self, checkpoint: Self::Checkpoint);
}
