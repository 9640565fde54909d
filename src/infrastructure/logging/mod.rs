pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::ActivityEntry;
use async_trait::async_trait;

/// Activity feed for groups. Entries go away only with their group.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_activity(&self, entry: ActivityEntry) -> Result<(), LedgerError>;
    async fn get_activities(&self, group_id: &str) -> Result<Vec<ActivityEntry>, LedgerError>;
    async fn remove_activities(&self, group_id: &str) -> Result<(), LedgerError>;
}
