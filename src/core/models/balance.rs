use crate::core::money::Money;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Net position of a member. Positive means the member is owed money.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MemberBalance {
    pub member_id: String,
    pub member_name: String,
    #[schema(value_type = f64)]
    pub balance: Money,
}

/// A suggested payment from a debtor to a creditor.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SimplifiedDebt {
    pub from_member_id: String,
    pub from_member_name: String,
    pub to_member_id: String,
    pub to_member_name: String,
    #[schema(value_type = f64)]
    pub amount: Money,
}

/// Ledger references the engine could not apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkippedReferences {
    pub unknown_payers: usize,
    pub unknown_split_members: usize,
    pub unknown_settlement_members: usize,
    /// Rows dropped because applying them would leave the decimal range.
    pub overflowed_rows: usize,
    /// Expense rows with no split; these are not unknown references.
    pub unsplit_expense_rows: usize,
}

impl SkippedReferences {
    pub fn total(&self) -> usize {
        self.unknown_payers + self.unknown_split_members + self.unknown_settlement_members + self.overflowed_rows
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BalanceSheet {
    pub balances: Vec<MemberBalance>,
    pub simplified_debts: Vec<SimplifiedDebt>,
    #[serde(skip)]
    pub skipped: SkippedReferences,
}

impl BalanceSheet {
    pub fn balance_of(&self, member_id: &str) -> Option<Money> {
        self.balances
            .iter()
            .find(|b| b.member_id == member_id)
            .map(|b| b.balance)
    }
}
