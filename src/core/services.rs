use crate::constants::{
    DEFAULT_CATEGORY, ENTITY_EXPENSE, ENTITY_GROUP, ENTITY_MEMBER, ENTITY_SETTLEMENT, EXPENSE_CREATED,
    EXPENSE_DELETED, EXPENSE_UPDATED, GROUP_CREATED, GROUP_UPDATED, MAX_AMOUNT_CENTS, MAX_DESCRIPTION_LENGTH,
    MAX_NAME_LENGTH, MEMBER_ADDED, MEMBER_REMOVED, SETTLEMENT_RECORDED,
};
use crate::core::engine::build_balance_sheet;
use crate::core::errors::{FieldError, LedgerError};
use crate::core::models::{
    ActivityEntry, BalanceSheet, Expense, ExpenseFilter, ExpenseSplit, Group, GroupSummary, LedgerSnapshot, Member,
    Settlement, SplitSpec,
};
use crate::core::money::Money;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct NewExpense {
    pub group_id: String,
    pub description: String,
    pub amount: Money,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub paid_by_member_id: String,
    pub split: SplitSpec,
}

/// Full replacement of an expense's editable fields. Splits are rebuilt.
#[derive(Clone, Debug)]
pub struct ExpenseUpdate {
    pub description: String,
    pub amount: Money,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub paid_by_member_id: String,
    pub split: SplitSpec,
}

#[derive(Clone, Debug)]
pub struct NewSettlement {
    pub group_id: String,
    pub from_member_id: String,
    pub to_member_id: String,
    pub amount: Money,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub struct LedgerService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    cache_ttl: Duration,
}

impl<L: LoggingService, S: Storage, C: Cache> LedgerService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, cache_ttl: Duration) -> Self {
        LedgerService {
            storage,
            logging,
            cache,
            cache_ttl,
        }
    }

    async fn require_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    fn require_member(group: &Group, member_id: &str) -> Result<(), LedgerError> {
        if !group.has_member(member_id) {
            warn!("Member {} is not in group {}", member_id, group.id);
            return Err(LedgerError::NotGroupMember(member_id.to_string()));
        }
        Ok(())
    }

    /// Drops the cached balance sheet and records the write in the activity feed.
    async fn after_write(
        &self,
        group_id: &str,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), LedgerError> {
        self.cache.invalidate_balance_sheet(group_id).await?;
        self.logging
            .log_activity(ActivityEntry {
                id: Uuid::new_v4().to_string(),
                group_id: group_id.to_string(),
                actor_id: None,
                action_type: action.to_string(),
                entity_type: Some(entity_type.to_string()),
                entity_id: Some(entity_id.to_string()),
                payload,
                created_at: Utc::now(),
            })
            .await
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.chars().count() > max_length {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: Money) -> Result<(), LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount > Money::from_cents(MAX_AMOUNT_CENTS) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: format!("Amount cannot exceed {}", Money::from_cents(MAX_AMOUNT_CENTS)),
                },
            ));
        }
        if amount.decimal_places() > 2 {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount cannot have more than 2 decimal places".to_string(),
                },
            ));
        }
        Ok(())
    }

    // GROUPS & MEMBERS

    pub async fn create_group(&self, name: &str, description: Option<String>) -> Result<Group, LedgerError> {
        let name = name.trim();
        self.validate_string_input("name", name, MAX_NAME_LENGTH)?;
        if let Some(ref description) = description {
            self.validate_string_input("description", description, MAX_DESCRIPTION_LENGTH)?;
        }

        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description,
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.storage.save_group(group.clone()).await?;
        info!("Created group {} ({})", group.id, group.name);

        self.after_write(
            &group.id,
            GROUP_CREATED,
            ENTITY_GROUP,
            &group.id,
            json!({ "name": group.name }),
        )
        .await?;

        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.require_group(group_id).await
    }

    /// Newest group first.
    pub async fn list_groups(&self) -> Result<Vec<GroupSummary>, LedgerError> {
        let groups = self.storage.list_groups().await?;
        Ok(groups.iter().map(GroupSummary::from).collect())
    }

    pub async fn update_group(
        &self,
        group_id: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<Group, LedgerError> {
        let name = name.trim();
        self.validate_string_input("name", name, MAX_NAME_LENGTH)?;
        if let Some(ref description) = description {
            self.validate_string_input("description", description, MAX_DESCRIPTION_LENGTH)?;
        }

        let group = self
            .storage
            .update_group(group_id, name.to_string(), description)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        info!("Updated group {} ({})", group.id, group.name);

        self.after_write(
            &group.id,
            GROUP_UPDATED,
            ENTITY_GROUP,
            &group.id,
            json!({ "name": group.name }),
        )
        .await?;

        Ok(group)
    }

    /// Deletes the group with its expenses, settlements and activity feed.
    pub async fn delete_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        let group = self
            .storage
            .delete_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        self.cache.invalidate_balance_sheet(group_id).await?;
        self.logging.remove_activities(group_id).await?;
        info!("Deleted group {} ({})", group.id, group.name);
        Ok(group)
    }

    pub async fn add_member(&self, group_id: &str, name: &str) -> Result<Member, LedgerError> {
        let name = name.trim();
        self.validate_string_input("name", name, MAX_NAME_LENGTH)?;

        let member = Member::new(Uuid::new_v4().to_string(), name);
        self.storage
            .add_member(group_id, member.clone())
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        info!("Added member {} to group {}", member.id, group_id);

        self.after_write(
            group_id,
            MEMBER_ADDED,
            ENTITY_MEMBER,
            &member.id,
            json!({ "name": member.name }),
        )
        .await?;

        Ok(member)
    }

    /// Only members no expense or settlement refers to can be removed.
    pub async fn remove_member(&self, member_id: &str) -> Result<Member, LedgerError> {
        let (group_id, member) = self
            .storage
            .remove_member(member_id)
            .await?
            .ok_or_else(|| LedgerError::MemberNotFound(member_id.to_string()))?;
        info!("Removed member {} from group {}", member.id, group_id);

        self.after_write(
            &group_id,
            MEMBER_REMOVED,
            ENTITY_MEMBER,
            &member.id,
            json!({ "name": member.name }),
        )
        .await?;

        Ok(member)
    }

    // EXPENSES

    fn build_splits(group: &Group, amount: Money, split: &SplitSpec) -> Result<Vec<ExpenseSplit>, LedgerError> {
        let splits: Vec<ExpenseSplit> = match split {
            SplitSpec::Equal(member_ids) => {
                if member_ids.is_empty() {
                    warn!("Equal split with no members in group {}", group.id);
                    return Err(LedgerError::InvalidSplit);
                }
                let share = Money::new(amount.amount() / Decimal::from(member_ids.len())).round_to_cents();
                member_ids
                    .iter()
                    .map(|member_id| ExpenseSplit {
                        member_id: member_id.clone(),
                        amount_owed: share,
                    })
                    .collect()
            }
            SplitSpec::Custom(shares) => {
                if shares.is_empty() {
                    warn!("Custom split with no shares in group {}", group.id);
                    return Err(LedgerError::InvalidSplit);
                }
                let max_share = Money::from_cents(MAX_AMOUNT_CENTS);
                if shares.iter().any(|s| s.amount.is_negative() || s.amount > max_share) {
                    return Err(LedgerError::InvalidSplit);
                }
                let total: Money = shares.iter().map(|s| s.amount).sum();
                if (total - amount).abs() > Money::CENT {
                    warn!("Custom splits sum {} does not match amount {}", total, amount);
                    return Err(LedgerError::InvalidSplit);
                }
                shares
                    .iter()
                    .map(|s| ExpenseSplit {
                        member_id: s.member_id.clone(),
                        amount_owed: s.amount,
                    })
                    .collect()
            }
        };

        if let Some(outsider) = splits.iter().find(|s| !group.has_member(&s.member_id)) {
            warn!("Split member {} not in group {}", outsider.member_id, group.id);
            return Err(LedgerError::InvalidSplitMember(outsider.member_id.clone()));
        }
        Ok(splits)
    }

    fn checked_splits(
        &self,
        group: &Group,
        description: &str,
        amount: Money,
        paid_by_member_id: &str,
        split: &SplitSpec,
    ) -> Result<Vec<ExpenseSplit>, LedgerError> {
        self.validate_string_input("description", description, MAX_DESCRIPTION_LENGTH)?;
        self.validate_amount_input("amount", amount)?;
        Self::require_member(group, paid_by_member_id)?;
        Self::build_splits(group, amount, split)
    }

    fn category_or_default(category: Option<String>) -> String {
        category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
    }

    pub async fn add_expense(&self, new_expense: NewExpense) -> Result<Expense, LedgerError> {
        info!(
            "Adding expense of {} to group {}",
            new_expense.amount, new_expense.group_id
        );
        let group = self.require_group(&new_expense.group_id).await?;
        let splits = self.checked_splits(
            &group,
            &new_expense.description,
            new_expense.amount,
            &new_expense.paid_by_member_id,
            &new_expense.split,
        )?;

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            group_id: group.id.clone(),
            description: new_expense.description.trim().to_string(),
            amount: new_expense.amount,
            category: Self::category_or_default(new_expense.category),
            date: new_expense.date.unwrap_or_else(|| now.date_naive()),
            paid_by_member_id: new_expense.paid_by_member_id,
            splits,
            created_at: now,
            updated_at: now,
        };

        self.storage.save_expense(expense.clone()).await?;
        debug!("Expense {} saved with {} splits", expense.id, expense.splits.len());

        self.after_write(
            &group.id,
            EXPENSE_CREATED,
            ENTITY_EXPENSE,
            &expense.id,
            json!({
                "description": expense.description,
                "amount": expense.amount,
                "paid_by_member_id": expense.paid_by_member_id
            }),
        )
        .await?;

        Ok(expense)
    }

    pub async fn get_expense(&self, expense_id: &str) -> Result<Expense, LedgerError> {
        self.storage
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| LedgerError::ExpenseNotFound(expense_id.to_string()))
    }

    /// Replaces the expense's fields and rebuilds its splits. The id, group
    /// and creation time are kept.
    pub async fn update_expense(&self, expense_id: &str, update: ExpenseUpdate) -> Result<Expense, LedgerError> {
        let existing = self.get_expense(expense_id).await?;
        let group = self.require_group(&existing.group_id).await?;
        let splits = self.checked_splits(
            &group,
            &update.description,
            update.amount,
            &update.paid_by_member_id,
            &update.split,
        )?;

        let expense = Expense {
            id: existing.id,
            group_id: existing.group_id,
            description: update.description.trim().to_string(),
            amount: update.amount,
            category: Self::category_or_default(update.category),
            date: update.date.unwrap_or(existing.date),
            paid_by_member_id: update.paid_by_member_id,
            splits,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        self.storage
            .replace_expense(expense.clone())
            .await?
            .ok_or_else(|| LedgerError::ExpenseNotFound(expense_id.to_string()))?;
        info!("Updated expense {} in group {}", expense.id, expense.group_id);

        self.after_write(
            &expense.group_id,
            EXPENSE_UPDATED,
            ENTITY_EXPENSE,
            &expense.id,
            json!({
                "description": expense.description,
                "amount": expense.amount,
                "paid_by_member_id": expense.paid_by_member_id
            }),
        )
        .await?;

        Ok(expense)
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<Expense, LedgerError> {
        let expense = self
            .storage
            .delete_expense(expense_id)
            .await?
            .ok_or_else(|| LedgerError::ExpenseNotFound(expense_id.to_string()))?;
        info!("Deleted expense {} from group {}", expense.id, expense.group_id);

        self.after_write(
            &expense.group_id,
            EXPENSE_DELETED,
            ENTITY_EXPENSE,
            &expense.id,
            json!({ "description": expense.description, "amount": expense.amount }),
        )
        .await?;

        Ok(expense)
    }

    pub async fn list_expenses(&self, group_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>, LedgerError> {
        self.require_group(group_id).await?;
        self.storage.list_expenses(group_id, filter).await
    }

    // SETTLEMENTS

    pub async fn record_settlement(&self, new_settlement: NewSettlement) -> Result<Settlement, LedgerError> {
        info!(
            "Recording settlement of {} from {} to {}",
            new_settlement.amount, new_settlement.from_member_id, new_settlement.to_member_id
        );
        if !new_settlement.amount.is_positive() {
            return Err(LedgerError::InvalidSettlementAmount);
        }
        self.validate_amount_input("amount", new_settlement.amount)?;
        if new_settlement.from_member_id == new_settlement.to_member_id {
            warn!("Member {} tried to settle with themselves", new_settlement.from_member_id);
            return Err(LedgerError::SelfSettlement);
        }

        let group = self.require_group(&new_settlement.group_id).await?;
        Self::require_member(&group, &new_settlement.from_member_id)?;
        Self::require_member(&group, &new_settlement.to_member_id)?;

        let now = Utc::now();
        let settlement = Settlement {
            id: Uuid::new_v4().to_string(),
            group_id: group.id.clone(),
            from_member_id: new_settlement.from_member_id,
            to_member_id: new_settlement.to_member_id,
            amount: new_settlement.amount,
            date: new_settlement.date.unwrap_or_else(|| now.date_naive()),
            notes: new_settlement.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
        };

        self.storage.save_settlement(settlement.clone()).await?;

        self.after_write(
            &group.id,
            SETTLEMENT_RECORDED,
            ENTITY_SETTLEMENT,
            &settlement.id,
            json!({
                "from_member_id": settlement.from_member_id,
                "to_member_id": settlement.to_member_id,
                "amount": settlement.amount
            }),
        )
        .await?;

        Ok(settlement)
    }

    pub async fn list_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, LedgerError> {
        self.require_group(group_id).await?;
        self.storage.list_settlements(group_id).await
    }

    // BALANCES

    pub async fn get_group_balances(&self, group_id: &str) -> Result<BalanceSheet, LedgerError> {
        if let Some(sheet) = self.cache.get_balance_sheet(group_id).await? {
            debug!("Balance sheet cache hit for group {}", group_id);
            return Ok(sheet);
        }

        // Read before the snapshot so a write landing in between wins.
        let generation = self.cache.generation(group_id).await?;
        let snapshot = self
            .storage
            .ledger_snapshot(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        let sheet = build_balance_sheet(&snapshot);
        if !sheet.skipped.is_empty() {
            warn!(
                "Group {} has {} ledger references the engine could not apply",
                group_id,
                sheet.skipped.total()
            );
        }

        let cached = self
            .cache
            .save_balance_sheet(group_id, &sheet, self.cache_ttl, generation)
            .await?;
        if !cached {
            debug!("Group {} changed while computing balances; not caching", group_id);
        }
        info!(
            "Computed balances for group {}: {} members, {} suggested payments",
            group_id,
            sheet.balances.len(),
            sheet.simplified_debts.len()
        );
        Ok(sheet)
    }

    /// Runs the engine on caller-supplied rows without touching storage.
    pub fn compute_balances(&self, snapshot: &LedgerSnapshot) -> BalanceSheet {
        debug!(
            "Computing balances for {} members, {} expense rows, {} settlements",
            snapshot.members.len(),
            snapshot.expense_rows.len(),
            snapshot.settlements.len()
        );
        build_balance_sheet(snapshot)
    }

    // ACTIVITY

    pub async fn get_activity(&self, group_id: &str) -> Result<Vec<ActivityEntry>, LedgerError> {
        self.require_group(group_id).await?;
        self.logging.get_activities(group_id).await
    }
}
