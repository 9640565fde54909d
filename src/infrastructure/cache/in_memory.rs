use crate::core::errors::LedgerError;
use crate::core::models::BalanceSheet;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::cache::cache_keys::group_balances_key;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Entries {
    sheets: HashMap<String, (BalanceSheet, DateTime<Utc>)>,
    generations: HashMap<String, u64>,
}

#[derive(Clone, Default)]
pub struct InMemoryCache {
    cache: Arc<RwLock<Entries>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(Entries::default())),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_balance_sheet(&self, group_id: &str) -> Result<Option<BalanceSheet>, LedgerError> {
        let key = group_balances_key(group_id);
        let expired = {
            let cache = self.cache.read().await;
            match cache.sheets.get(&key) {
                Some((sheet, expiry)) if *expiry > Utc::now() => return Ok(Some(sheet.clone())),
                Some(_) => true,
                None => false,
            }
        };
        if expired {
            self.cache.write().await.sheets.remove(&key);
        }
        Ok(None)
    }

    async fn generation(&self, group_id: &str) -> Result<u64, LedgerError> {
        let cache = self.cache.read().await;
        Ok(cache
            .generations
            .get(&group_balances_key(group_id))
            .copied()
            .unwrap_or_default())
    }

    async fn save_balance_sheet(
        &self,
        group_id: &str,
        sheet: &BalanceSheet,
        ttl: std::time::Duration,
        generation: u64,
    ) -> Result<bool, LedgerError> {
        let expiry = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let key = group_balances_key(group_id);
        let mut cache = self.cache.write().await;
        let current = cache.generations.get(&key).copied().unwrap_or_default();
        if current != generation {
            return Ok(false);
        }
        cache.sheets.insert(key, (sheet.clone(), expiry));
        Ok(true)
    }

    async fn invalidate_balance_sheet(&self, group_id: &str) -> Result<(), LedgerError> {
        let key = group_balances_key(group_id);
        let mut cache = self.cache.write().await;
        cache.sheets.remove(&key);
        *cache.generations.entry(key).or_default() += 1;
        Ok(())
    }
}
