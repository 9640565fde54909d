//! Balance computation and debt simplification.
//!
//! Everything here is pure: the same ledger snapshot always yields the same
//! balance sheet, and nothing is read from or written to storage.

mod balances;
mod simplify;

pub use balances::{NetBalance, NetBalances, compute_balances};
pub use simplify::simplify_debts;

use crate::core::models::{BalanceSheet, LedgerSnapshot};

/// Runs both stages over a snapshot.
pub fn build_balance_sheet(snapshot: &LedgerSnapshot) -> BalanceSheet {
    let net = compute_balances(&snapshot.members, &snapshot.expense_rows, &snapshot.settlements);
    let simplified_debts = simplify_debts(&net);

    BalanceSheet {
        balances: net.rounded(),
        simplified_debts,
        skipped: net.skipped(),
    }
}
