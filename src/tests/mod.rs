mod cache_tests;
mod engine_tests;

use crate::core::models::{ExpenseRow, Member, SettlementRow, SplitShare};
use crate::core::money::Money;
use crate::core::services::LedgerService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use rust_decimal::Decimal;
use std::time::Duration;

pub type TestService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

pub fn create_test_service() -> TestService {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    LedgerService::new(storage, logging, cache, Duration::from_secs(3600))
}

pub fn members(ids: &[&str]) -> Vec<Member> {
    ids.iter().map(|id| Member::new(*id, format!("Member {}", id))).collect()
}

pub fn split_row(expense_id: &str, payer: &str, member: &str, owed: Decimal) -> ExpenseRow {
    ExpenseRow {
        expense_id: expense_id.to_string(),
        amount: Money::new(owed),
        paid_by_member_id: payer.to_string(),
        split: Some(SplitShare {
            member_id: member.to_string(),
            amount_owed: Money::new(owed),
        }),
    }
}

pub fn settlement_row(from: &str, to: &str, amount: Decimal) -> SettlementRow {
    SettlementRow {
        from_member_id: from.to_string(),
        to_member_id: to.to_string(),
        amount: Money::new(amount),
    }
}
