use crate::core::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How an expense amount is divided between members.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "split_type", content = "split_data", rename_all = "lowercase")]
pub enum SplitSpec {
    /// Every listed member owes the same share.
    Equal(Vec<String>),
    /// Each member owes the listed amount.
    Custom(Vec<CustomShare>),
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CustomShare {
    pub member_id: String,
    #[schema(value_type = f64)]
    pub amount: Money,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ExpenseSplit {
    pub member_id: String,
    #[schema(value_type = f64)]
    pub amount_owed: Money,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub paid_by_member_id: String,
    pub splits: Vec<ExpenseSplit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Every member the expense refers to: the payer, then each split member.
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.paid_by_member_id.as_str()).chain(self.splits.iter().map(|s| s.member_id.as_str()))
    }
}

/// Optional narrowing for expense listings. Date bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.as_ref().is_none_or(|c| &expense.category == c)
            && self.start_date.is_none_or(|start| expense.date >= start)
            && self.end_date.is_none_or(|end| expense.date <= end)
    }
}
