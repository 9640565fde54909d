pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::engine::{build_balance_sheet, compute_balances, simplify_debts};
pub use crate::core::errors::LedgerError;
pub use crate::core::money::Money;
pub use crate::core::services::LedgerService;

#[cfg(test)]
mod tests;
