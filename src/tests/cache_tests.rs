use crate::core::models::{BalanceSheet, MemberBalance};
use crate::core::money::Money;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use rust_decimal_macros::dec;
use std::time::Duration;

fn sheet() -> BalanceSheet {
    BalanceSheet {
        balances: vec![MemberBalance {
            member_id: "a".to_string(),
            member_name: "Alice".to_string(),
            balance: Money::new(dec!(12.5)),
        }],
        simplified_debts: vec![],
        skipped: Default::default(),
    }
}

#[tokio::test]
async fn test_cache_round_trip_and_invalidate() {
    let cache = InMemoryCache::new();
    assert!(cache.get_balance_sheet("g1").await.unwrap().is_none());

    let generation = cache.generation("g1").await.unwrap();
    assert!(
        cache
            .save_balance_sheet("g1", &sheet(), Duration::from_secs(60), generation)
            .await
            .unwrap()
    );
    assert_eq!(cache.get_balance_sheet("g1").await.unwrap(), Some(sheet()));
    assert!(cache.get_balance_sheet("g2").await.unwrap().is_none());

    cache.invalidate_balance_sheet("g1").await.unwrap();
    assert!(cache.get_balance_sheet("g1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_entry_is_a_miss() {
    let cache = InMemoryCache::new();

    cache
        .save_balance_sheet("g1", &sheet(), Duration::from_secs(0), 0)
        .await
        .unwrap();

    assert!(cache.get_balance_sheet("g1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_sheet_from_before_invalidation_is_refused() {
    let cache = InMemoryCache::new();
    let generation = cache.generation("g1").await.unwrap();

    cache.invalidate_balance_sheet("g1").await.unwrap();
    let saved = cache
        .save_balance_sheet("g1", &sheet(), Duration::from_secs(60), generation)
        .await
        .unwrap();

    assert!(!saved);
    assert!(cache.get_balance_sheet("g1").await.unwrap().is_none());
    assert_eq!(cache.generation("g1").await.unwrap(), generation + 1);
    assert_eq!(cache.generation("g2").await.unwrap(), 0);
}
