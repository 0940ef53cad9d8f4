//! Record repository
//!
//! Concurrency-safe in-memory store of financial records keyed by
//! identifier. The store is always an explicitly injected instance, never
//! reached through ambient global state; a durable backend substitutes by
//! replacing this type behind the same method set.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::FinancialRecord;

/// Keyed upsert store for processed records.
///
/// Cloning is cheap and shares the backing map, so one instance can be
/// handed to multiple consumer tasks in flight simultaneously. `save` is
/// independently atomic per key; callers hold no lock across the
/// validate-then-persist sequence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<String, FinancialRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert by identifier. A second save under the same id replaces the
    /// first; replays are therefore safe at the storage layer.
    pub async fn save(&self, record: FinancialRecord) {
        tracing::info!(id = record.id(), kind = %record.kind(), "saving record");
        let mut records = self.records.write().await;
        records.insert(record.id().to_string(), record);
        tracing::debug!(total = records.len(), "record saved");
    }

    /// Current record under `id`, if any.
    pub async fn find_by_id(&self, id: &str) -> Option<FinancialRecord> {
        self.records.read().await.get(id).cloned()
    }

    /// Point-in-time snapshot of the whole store. Returns a copy, not a
    /// live view, so callers never observe concurrent mutation.
    pub async fn find_all(&self) -> HashMap<String, FinancialRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecordKind, RecordStatus};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn record(id: &str, description: &str) -> FinancialRecord {
        FinancialRecord::new(
            RecordKind::Expense,
            id,
            description,
            dec!(10),
            "misc",
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let store = InMemoryRecordStore::new();
        store.save(record("e1", "lunch")).await;

        let found = store.find_by_id("e1").await.unwrap();
        assert_eq!(found.id(), "e1");
        assert!(store.find_by_id("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_save_is_an_upsert_second_write_wins() {
        let store = InMemoryRecordStore::new();
        store.save(record("e1", "lunch")).await;
        store.save(record("e1", "dinner")).await;

        assert_eq!(store.len().await, 1);
        let found = store.find_by_id("e1").await.unwrap();
        assert_eq!(found.description(), "dinner");
    }

    #[tokio::test]
    async fn test_find_all_is_a_snapshot() {
        let store = InMemoryRecordStore::new();
        store.save(record("e1", "lunch")).await;

        let snapshot = store.find_all().await;
        store.save(record("e2", "dinner")).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_saves_land_under_distinct_keys() {
        let store = InMemoryRecordStore::new();
        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.save(record(&format!("e{i}"), "concurrent")).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.len().await, 16);
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let store = InMemoryRecordStore::new();
        store.save(record("e1", "lunch")).await;
        store.clear().await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_status_survives_round_trip() {
        let store = InMemoryRecordStore::new();
        store.save(record("e1", "lunch").mark_as_processed()).await;
        let found = store.find_by_id("e1").await.unwrap();
        assert_eq!(found.status(), RecordStatus::Processed);
    }
}
