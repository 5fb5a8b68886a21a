//! Compat: reexporta o módulo de erros unificado.

pub use super::error::{PoolError, Result};
pub use super::error_catalog::{default_locale_message, PoolErrorCode};
pub use super::error_map::{from_ledger, from_quote_inputs};
