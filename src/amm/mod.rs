pub mod types;
pub mod errors;        // reexports da API de erro
pub mod guardrails;
pub mod swap;
pub mod liquidity;
pub mod pricing;
pub mod shares;

// erro unificado
pub mod error_catalog;
pub mod error;
pub mod error_map;

// host e pool
pub mod events;
pub mod ledger;
pub mod memory;
pub mod pool;

pub mod ref_golden;

pub use events::PoolEvent;
pub use ledger::{Host, LedgerError, TokenLedger};
pub use memory::MemoryHost;
pub use pool::{AddLiquidity, AddLiquidityReceipt, Pool, PoolSnapshot, RemoveLiquidity, SwapExactIn};
pub use types::{Address, Amount, TokenPair};
