pub mod activity;
pub mod balance;
pub mod expense;
pub mod group;
pub mod ledger;
pub mod member;
pub mod settlement;

pub use activity::ActivityEntry;
pub use balance::{BalanceSheet, MemberBalance, SimplifiedDebt, SkippedReferences};
pub use expense::{CustomShare, Expense, ExpenseFilter, ExpenseSplit, SplitSpec};
pub use group::{Group, GroupSummary};
pub use ledger::{ExpenseRow, LedgerSnapshot, SettlementRow, SplitShare};
pub use member::Member;
pub use settlement::Settlement;
