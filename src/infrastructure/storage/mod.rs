use crate::core::errors::LedgerError;
use crate::core::models::{Expense, ExpenseFilter, Group, LedgerSnapshot, Member, Settlement};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    async fn list_groups(&self) -> Result<Vec<Group>, LedgerError>;
    /// Renames a group, replacing the description when one is given.
    async fn update_group(
        &self,
        group_id: &str,
        name: String,
        description: Option<String>,
    ) -> Result<Option<Group>, LedgerError>;
    /// Removes a group together with its expenses and settlements.
    async fn delete_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    /// Appends a member in place. `None` when the group does not exist.
    async fn add_member(&self, group_id: &str, member: Member) -> Result<Option<Group>, LedgerError>;
    /// Removes a member nothing refers to and returns it with its group id.
    /// Fails with `MemberInUse` while an expense or settlement names the member.
    async fn remove_member(&self, member_id: &str) -> Result<Option<(String, Member)>, LedgerError>;
    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError>;
    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, LedgerError>;
    /// Replaces a stored expense and returns the previous version.
    async fn replace_expense(&self, expense: Expense) -> Result<Option<Expense>, LedgerError>;
    async fn delete_expense(&self, expense_id: &str) -> Result<Option<Expense>, LedgerError>;
    async fn list_expenses(&self, group_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>, LedgerError>;
    async fn save_settlement(&self, settlement: Settlement) -> Result<(), LedgerError>;
    async fn list_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, LedgerError>;
    /// Members, expense rows and settlements of a group read together, so the
    /// rows agree with each other. `None` when the group does not exist.
    async fn ledger_snapshot(&self, group_id: &str) -> Result<Option<LedgerSnapshot>, LedgerError>;
}

pub mod in_memory;
