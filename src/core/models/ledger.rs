//! Row shapes the balance engine reads.
//!
//! These mirror an expense/split outer join: one row per expense and split
//! pairing, and a single split-less row for an expense that has no splits.

use super::expense::Expense;
use super::member::Member;
use super::settlement::Settlement;
use crate::core::money::Money;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitShare {
    pub member_id: String,
    pub amount_owed: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRow {
    pub expense_id: String,
    pub amount: Money,
    pub paid_by_member_id: String,
    pub split: Option<SplitShare>,
}

impl ExpenseRow {
    /// Expands an expense into its joined rows.
    pub fn from_expense(expense: &Expense) -> Vec<ExpenseRow> {
        if expense.splits.is_empty() {
            return vec![ExpenseRow {
                expense_id: expense.id.clone(),
                amount: expense.amount,
                paid_by_member_id: expense.paid_by_member_id.clone(),
                split: None,
            }];
        }

        expense
            .splits
            .iter()
            .map(|split| ExpenseRow {
                expense_id: expense.id.clone(),
                amount: expense.amount,
                paid_by_member_id: expense.paid_by_member_id.clone(),
                split: Some(SplitShare {
                    member_id: split.member_id.clone(),
                    amount_owed: split.amount_owed,
                }),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementRow {
    pub from_member_id: String,
    pub to_member_id: String,
    pub amount: Money,
}

impl From<&Settlement> for SettlementRow {
    fn from(settlement: &Settlement) -> Self {
        SettlementRow {
            from_member_id: settlement.from_member_id.clone(),
            to_member_id: settlement.to_member_id.clone(),
            amount: settlement.amount,
        }
    }
}

/// Everything the engine needs for one group, read at a single point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub members: Vec<Member>,
    pub expense_rows: Vec<ExpenseRow>,
    pub settlements: Vec<SettlementRow>,
}
