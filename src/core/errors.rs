use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("Member {0} is not in this group")]
    NotGroupMember(String),
    #[error("Member {0} not found")]
    MemberNotFound(String),
    #[error("Member {0} still has expenses or settlements")]
    MemberInUse(String),
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),
    #[error("Cannot settle with yourself")]
    SelfSettlement,
    #[error("Settlement amount must be positive")]
    InvalidSettlementAmount,
    #[error("Split amounts must equal total amount")]
    InvalidSplit,
    #[error("Invalid split member: {0}")]
    InvalidSplitMember(String),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Cache error: {0}")]
    CacheError(String),
}
