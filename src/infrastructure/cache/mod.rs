pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::BalanceSheet;
use async_trait::async_trait;

/// Balance sheets keyed by group.
///
/// Every group carries a generation that `invalidate_balance_sheet` bumps. A
/// reader notes the generation before it snapshots the ledger and hands it to
/// `save_balance_sheet`, which refuses the sheet if a write happened since.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_balance_sheet(&self, group_id: &str) -> Result<Option<BalanceSheet>, LedgerError>;
    async fn generation(&self, group_id: &str) -> Result<u64, LedgerError>;
    /// Returns false when the sheet was computed before the latest invalidation.
    async fn save_balance_sheet(
        &self,
        group_id: &str,
        sheet: &BalanceSheet,
        ttl: std::time::Duration,
        generation: u64,
    ) -> Result<bool, LedgerError>;
    async fn invalidate_balance_sheet(&self, group_id: &str) -> Result<(), LedgerError>;
}
