use crate::core::errors::LedgerError;
use crate::core::models::ActivityEntry;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<Vec<ActivityEntry>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        InMemoryLogging {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_activity(&self, entry: ActivityEntry) -> Result<(), LedgerError> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn get_activities(&self, group_id: &str) -> Result<Vec<ActivityEntry>, LedgerError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn remove_activities(&self, group_id: &str) -> Result<(), LedgerError> {
        let mut entries = self.entries.write().await;
        entries.retain(|e| e.group_id != group_id);
        Ok(())
    }
}
