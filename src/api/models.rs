use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::LedgerError;
use crate::core::models::{ExpenseFilter, ExpenseRow, LedgerSnapshot, Member, SettlementRow, SplitShare, SplitSpec};
use crate::core::money::Money;
use crate::core::services::{ExpenseUpdate, NewExpense, NewSettlement};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateGroupRequest {
    pub name: String,
    /// Left unchanged when omitted.
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub group_id: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub paid_by_member_id: String,
    /// `split_type` is `equal` (with member ids as `split_data`) or `custom`
    /// (with `{member_id, amount}` objects).
    #[serde(flatten)]
    pub split: SplitSpec,
}

impl From<AddExpenseRequest> for NewExpense {
    fn from(req: AddExpenseRequest) -> Self {
        NewExpense {
            group_id: req.group_id,
            description: req.description,
            amount: req.amount,
            category: req.category,
            date: req.date,
            paid_by_member_id: req.paid_by_member_id,
            split: req.split,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateExpenseRequest {
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub category: Option<String>,
    /// Left unchanged when omitted.
    pub date: Option<NaiveDate>,
    pub paid_by_member_id: String,
    #[serde(flatten)]
    pub split: SplitSpec,
}

impl From<UpdateExpenseRequest> for ExpenseUpdate {
    fn from(req: UpdateExpenseRequest) -> Self {
        ExpenseUpdate {
            description: req.description,
            amount: req.amount,
            category: req.category,
            date: req.date,
            paid_by_member_id: req.paid_by_member_id,
            split: req.split,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateSettlementRequest {
    pub group_id: String,
    pub from_member_id: String,
    pub to_member_id: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl From<CreateSettlementRequest> for NewSettlement {
    fn from(req: CreateSettlementRequest) -> Self {
        NewSettlement {
            group_id: req.group_id,
            from_member_id: req.from_member_id,
            to_member_id: req.to_member_id,
            amount: req.amount,
            date: req.date,
            notes: req.notes,
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupQuery {
    /// ID of the group
    #[serde(rename = "groupId")]
    pub group_id: String,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpenseQuery {
    /// ID of the group
    #[serde(rename = "groupId")]
    pub group_id: String,
    /// Only expenses in this category
    pub category: Option<String>,
    /// Earliest expense date, inclusive
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    /// Latest expense date, inclusive
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
}

impl ExpenseQuery {
    pub fn filter(&self) -> ExpenseFilter {
        ExpenseFilter {
            category: self.category.clone().filter(|c| !c.is_empty()),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// One row of the expense/split join. `split_member_id` is null for an
/// expense without splits.
#[derive(Clone, Deserialize, Serialize, ToSchema)]
pub struct ExpenseRowRecord {
    pub expense_id: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub paid_by_member_id: String,
    pub split_member_id: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount_owed: Option<Money>,
}

impl From<ExpenseRowRecord> for ExpenseRow {
    fn from(record: ExpenseRowRecord) -> Self {
        let split = record.split_member_id.map(|member_id| SplitShare {
            member_id,
            amount_owed: record.amount_owed.unwrap_or_default(),
        });
        ExpenseRow {
            expense_id: record.expense_id,
            amount: record.amount,
            paid_by_member_id: record.paid_by_member_id,
            split,
        }
    }
}

#[derive(Clone, Deserialize, Serialize, ToSchema)]
pub struct SettlementRecord {
    pub from_member_id: String,
    pub to_member_id: String,
    #[schema(value_type = f64)]
    pub amount: Money,
}

impl From<SettlementRecord> for SettlementRow {
    fn from(record: SettlementRecord) -> Self {
        SettlementRow {
            from_member_id: record.from_member_id,
            to_member_id: record.to_member_id,
            amount: record.amount,
        }
    }
}

#[derive(Clone, Deserialize, Serialize, ToSchema)]
pub struct ComputeBalancesRequest {
    pub members: Vec<Member>,
    #[serde(default, alias = "expenseRows")]
    pub expense_rows: Vec<ExpenseRowRecord>,
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
}

impl From<ComputeBalancesRequest> for LedgerSnapshot {
    fn from(req: ComputeBalancesRequest) -> Self {
        LedgerSnapshot {
            members: req.members,
            expense_rows: req.expense_rows.into_iter().map(ExpenseRow::from).collect(),
            settlements: req.settlements.into_iter().map(SettlementRow::from).collect(),
        }
    }
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::GroupNotFound(_) | LedgerError::MemberNotFound(_) | LedgerError::ExpenseNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            LedgerError::NotGroupMember(_) => StatusCode::FORBIDDEN,
            LedgerError::MemberInUse(_) => StatusCode::CONFLICT,
            LedgerError::SelfSettlement
            | LedgerError::InvalidSettlementAmount
            | LedgerError::InvalidSplit
            | LedgerError::InvalidSplitMember(_) => StatusCode::BAD_REQUEST,
            LedgerError::InvalidInput(..) => StatusCode::BAD_REQUEST,
            LedgerError::InternalServerError(_)
            | LedgerError::StorageError(_)
            | LedgerError::LoggingError(_)
            | LedgerError::CacheError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error_message = match &self.0 {
            LedgerError::InvalidInput(_, detail) => detail.description.clone(),
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
