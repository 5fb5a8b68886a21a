//! Mapeamento entre condições de domínio e códigos de erro do pool.
use crate::amm::error::PoolError;
use crate::amm::error_catalog::PoolErrorCode;
use crate::amm::ledger::LedgerError;

/// Determina o código de erro de uma cotação a partir dos inputs brutos.
/// A ordem das checagens segue a da cotação: entrada zero antes de reservas.
/// Não há teto para `amount_in`: o denominador é somado em U256.
pub fn from_quote_inputs(amount_in: u128, reserve_in: u128, reserve_out: u128) -> Option<PoolErrorCode> {
    if amount_in == 0 {
        return Some(PoolErrorCode::ZeroInputAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Some(PoolErrorCode::InsufficientLiquidity);
    }
    None
}

/// Converte a recusa do ledger externo, preservando o motivo no contexto.
pub fn from_ledger(err: LedgerError) -> PoolError {
    let code = match err {
        LedgerError::NativeTransferRejected { .. } => PoolErrorCode::EthTransferFailed,
        _ => PoolErrorCode::LedgerRejected,
    };
    PoolError::new(code).with_context("reason", &err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::types::Address;

    #[test]
    fn detects_zero_amount() {
        assert_eq!(from_quote_inputs(0, 0, 0), Some(PoolErrorCode::ZeroInputAmount));
    }

    #[test]
    fn detects_empty_reserve() {
        assert_eq!(from_quote_inputs(1, 0, 1), Some(PoolErrorCode::InsufficientLiquidity));
        assert_eq!(from_quote_inputs(1, 1, 0), Some(PoolErrorCode::InsufficientLiquidity));
    }

    #[test]
    fn huge_input_is_not_an_error() {
        assert_eq!(from_quote_inputs(u128::MAX, 1, 1), None);
    }

    #[test]
    fn ok_path() {
        assert_eq!(from_quote_inputs(10, 100, 100), None);
    }

    #[test]
    fn ledger_reason_is_kept() {
        let err = from_ledger(LedgerError::UnknownToken(Address::from_low_u64(9)));
        assert_eq!(err.code, PoolErrorCode::LedgerRejected);
        assert!(err.context.get("reason").unwrap().contains("desconhecido"));

        let native = from_ledger(LedgerError::NativeTransferRejected { receiver: Address::ZERO });
        assert_eq!(native.code, PoolErrorCode::EthTransferFailed);
    }
}
