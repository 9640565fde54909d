use crate::core::errors::LedgerError;
use crate::core::models::{
    Expense, ExpenseFilter, ExpenseRow, Group, LedgerSnapshot, Member, Settlement, SettlementRow,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    groups: HashMap<String, Group>,
    expenses: HashMap<String, Expense>,
    settlements: Vec<Settlement>,
}

impl Tables {
    /// The expense's group must exist and contain every member it names.
    fn check_expense(&self, expense: &Expense) -> Result<(), LedgerError> {
        let group = self.groups.get(&expense.group_id).ok_or_else(|| {
            LedgerError::StorageError(format!(
                "expense {} references missing group {}",
                expense.id, expense.group_id
            ))
        })?;
        match expense.member_ids().find(|id| !group.has_member(id)) {
            Some(outsider) => Err(LedgerError::NotGroupMember(outsider.to_string())),
            None => Ok(()),
        }
    }

    fn member_in_use(&self, group_id: &str, member_id: &str) -> bool {
        let in_expense = self
            .expenses
            .values()
            .filter(|e| e.group_id == group_id)
            .any(|e| e.member_ids().any(|id| id == member_id));
        let in_settlement = self
            .settlements
            .iter()
            .filter(|s| s.group_id == group_id)
            .any(|s| s.from_member_id == member_id || s.to_member_id == member_id);
        in_expense || in_settlement
    }
}

/// All tables sit behind one lock so a snapshot never sees half a write.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError> {
        let mut tables = self.tables.write().await;
        tables.groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.get(group_id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, LedgerError> {
        let tables = self.tables.read().await;
        let mut groups: Vec<Group> = tables.groups.values().cloned().collect();
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(groups)
    }

    async fn update_group(
        &self,
        group_id: &str,
        name: String,
        description: Option<String>,
    ) -> Result<Option<Group>, LedgerError> {
        let mut tables = self.tables.write().await;
        let Some(group) = tables.groups.get_mut(group_id) else {
            return Ok(None);
        };
        group.name = name;
        if description.is_some() {
            group.description = description;
        }
        group.updated_at = Utc::now();
        Ok(Some(group.clone()))
    }

    async fn delete_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        let mut tables = self.tables.write().await;
        let Some(group) = tables.groups.remove(group_id) else {
            return Ok(None);
        };
        tables.expenses.retain(|_, e| e.group_id != group_id);
        tables.settlements.retain(|s| s.group_id != group_id);
        Ok(Some(group))
    }

    async fn add_member(&self, group_id: &str, member: Member) -> Result<Option<Group>, LedgerError> {
        let mut tables = self.tables.write().await;
        let Some(group) = tables.groups.get_mut(group_id) else {
            return Ok(None);
        };
        group.members.push(member);
        group.updated_at = Utc::now();
        Ok(Some(group.clone()))
    }

    async fn remove_member(&self, member_id: &str) -> Result<Option<(String, Member)>, LedgerError> {
        let mut tables = self.tables.write().await;
        let Some(group_id) = tables
            .groups
            .values()
            .find(|g| g.has_member(member_id))
            .map(|g| g.id.clone())
        else {
            return Ok(None);
        };
        if tables.member_in_use(&group_id, member_id) {
            return Err(LedgerError::MemberInUse(member_id.to_string()));
        }

        let Some(group) = tables.groups.get_mut(&group_id) else {
            return Ok(None);
        };
        let Some(pos) = group.members.iter().position(|m| m.id == member_id) else {
            return Ok(None);
        };
        let member = group.members.remove(pos);
        group.updated_at = Utc::now();
        Ok(Some((group_id, member)))
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError> {
        let mut tables = self.tables.write().await;
        tables.check_expense(&expense)?;
        tables.expenses.insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, LedgerError> {
        let tables = self.tables.read().await;
        Ok(tables.expenses.get(expense_id).cloned())
    }

    async fn replace_expense(&self, expense: Expense) -> Result<Option<Expense>, LedgerError> {
        let mut tables = self.tables.write().await;
        match tables.expenses.get(&expense.id) {
            None => return Ok(None),
            Some(previous) if previous.group_id != expense.group_id => {
                return Err(LedgerError::StorageError(format!(
                    "expense {} cannot move from group {} to {}",
                    expense.id, previous.group_id, expense.group_id
                )));
            }
            Some(_) => {}
        }
        tables.check_expense(&expense)?;
        Ok(tables.expenses.insert(expense.id.clone(), expense))
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<Option<Expense>, LedgerError> {
        let mut tables = self.tables.write().await;
        let Some(expense) = tables.expenses.get(expense_id) else {
            return Ok(None);
        };
        if !tables.groups.contains_key(&expense.group_id) {
            return Err(LedgerError::StorageError(format!(
                "expense {} references missing group {}",
                expense.id, expense.group_id
            )));
        }
        Ok(tables.expenses.remove(expense_id))
    }

    async fn list_expenses(&self, group_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>, LedgerError> {
        let tables = self.tables.read().await;
        let mut expenses: Vec<Expense> = tables
            .expenses
            .values()
            .filter(|e| e.group_id == group_id && filter.matches(e))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    async fn save_settlement(&self, settlement: Settlement) -> Result<(), LedgerError> {
        let mut tables = self.tables.write().await;
        let Some(group) = tables.groups.get(&settlement.group_id) else {
            return Err(LedgerError::StorageError(format!(
                "settlement {} references missing group {}",
                settlement.id, settlement.group_id
            )));
        };
        for member_id in [&settlement.from_member_id, &settlement.to_member_id] {
            if !group.has_member(member_id) {
                return Err(LedgerError::NotGroupMember(member_id.clone()));
            }
        }
        tables.settlements.push(settlement);
        Ok(())
    }

    async fn list_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, LedgerError> {
        let tables = self.tables.read().await;
        let mut settlements: Vec<Settlement> = tables
            .settlements
            .iter()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect();
        settlements.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(settlements)
    }

    async fn ledger_snapshot(&self, group_id: &str) -> Result<Option<LedgerSnapshot>, LedgerError> {
        let tables = self.tables.read().await;
        let Some(group) = tables.groups.get(group_id) else {
            return Ok(None);
        };

        let expense_rows = tables
            .expenses
            .values()
            .filter(|e| e.group_id == group_id)
            .flat_map(ExpenseRow::from_expense)
            .collect();
        let settlements = tables
            .settlements
            .iter()
            .filter(|s| s.group_id == group_id)
            .map(SettlementRow::from)
            .collect();

        Ok(Some(LedgerSnapshot {
            members: group.members.clone(),
            expense_rows,
            settlements,
        }))
    }
}
