//! Eventos emitidos pelo pool (indexação fica fora do crate).

use super::types::{Address, Amount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    /// Depósito concluído; tokens na ordem canônica do par.
    LiquidityAdded {
        provider: Address,
        token_a: Address,
        token_b: Address,
        amount_a: Amount,
        amount_b: Amount,
        shares_minted: Amount,
    },
    /// Saque concluído; tokens e montantes na ordem canônica do par.
    LiquidityRemoved {
        provider: Address,
        token_a: Address,
        token_b: Address,
        amount_a: Amount,
        amount_b: Amount,
        shares_burned: Amount,
    },
    Swapped {
        trader: Address,
        token_in: Address,
        token_out: Address,
        amount_in: Amount,
        amount_out: Amount,
        recipient: Address,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

impl PoolEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LiquidityAdded { .. } => "LiquidityAdded",
            Self::LiquidityRemoved { .. } => "LiquidityRemoved",
            Self::Swapped { .. } => "Swapped",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}
