//! In-memory network store
//!
//! Keeps records in a map keyed on (project, name). Used by tests and by
//! hosts that run without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::network::error::{StoreError, StoreResult};
use crate::network::store::NetworkStore;
use crate::network::types::{NetworkInfo, NetworkStatus};

type RecordKey = (String, String);

pub struct MemoryNetworkStore {
    records: RwLock<HashMap<RecordKey, (i64, NetworkInfo)>>,
    next_id: AtomicI64,
    failure: RwLock<Option<String>>,
}

impl MemoryNetworkStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            failure: RwLock::new(None),
        }
    }

    fn key(project: &str, name: &str) -> RecordKey {
        (project.to_string(), name.to_string())
    }

    /// Inserts a record and returns its id
    pub async fn create_network(
        &self,
        project: &str,
        name: &str,
        info: NetworkInfo,
    ) -> StoreResult<i64> {
        let mut records = self.records.write().await;
        let key = Self::key(project, name);
        if records.contains_key(&key) {
            return Err(StoreError::already_exists(project, name));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, project, name, net_type = %info.net_type, "network record created");
        records.insert(key, (id, info));
        Ok(id)
    }

    pub async fn update_status(
        &self,
        project: &str,
        name: &str,
        status: NetworkStatus,
    ) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let (_, info) = records
            .get_mut(&Self::key(project, name))
            .ok_or_else(|| StoreError::not_found(project, name))?;
        info.status = status;
        Ok(())
    }

    pub async fn delete_network(&self, project: &str, name: &str) -> StoreResult<()> {
        let mut records = self.records.write().await;
        records
            .remove(&Self::key(project, name))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(project, name))
    }

    /// Makes every lookup fail with `StoreError::Unavailable` until cleared
    pub async fn fail_with(&self, message: Option<&str>) {
        let mut failure = self.failure.write().await;
        *failure = message.map(str::to_string);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryNetworkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkStore for MemoryNetworkStore {
    async fn get_network_in_any_state(
        &self,
        project: &str,
        name: &str,
    ) -> StoreResult<(i64, NetworkInfo)> {
        if let Some(message) = self.failure.read().await.as_ref() {
            return Err(StoreError::unavailable(message.clone()));
        }

        let records = self.records.read().await;
        records
            .get(&Self::key(project, name))
            .cloned()
            .ok_or_else(|| StoreError::not_found(project, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_records_in_any_state() {
        let store = MemoryNetworkStore::new();
        let pending = store
            .create_network("default", "br0", NetworkInfo::new("bridge"))
            .await
            .expect("create should succeed");
        let errored = store
            .create_network(
                "default",
                "br1",
                NetworkInfo::new("bridge").with_status(NetworkStatus::Errored),
            )
            .await
            .expect("create should succeed");

        assert_ne!(pending, errored);

        let (id, info) = store
            .get_network_in_any_state("default", "br0")
            .await
            .expect("pending record should be found");
        assert_eq!(id, pending);
        assert_eq!(info.status, NetworkStatus::Pending);

        let (_, info) = store
            .get_network_in_any_state("default", "br1")
            .await
            .expect("errored record should be found");
        assert_eq!(info.status, NetworkStatus::Errored);
    }

    #[tokio::test]
    async fn records_are_scoped_by_project() {
        let store = MemoryNetworkStore::new();
        store
            .create_network("default", "br0", NetworkInfo::new("bridge"))
            .await
            .expect("create should succeed");

        let err = store
            .get_network_in_any_state("other", "br0")
            .await
            .expect_err("other project should not see the record");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn rejects_duplicate_names() {
        let store = MemoryNetworkStore::new();
        store
            .create_network("default", "br0", NetworkInfo::new("bridge"))
            .await
            .expect("first create should succeed");

        let err = store
            .create_network("default", "br0", NetworkInfo::new("macvlan"))
            .await
            .expect_err("duplicate should fail");
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn updates_and_deletes() {
        let store = MemoryNetworkStore::new();
        store
            .create_network("default", "br0", NetworkInfo::new("bridge"))
            .await
            .expect("create should succeed");

        store
            .update_status("default", "br0", NetworkStatus::Created)
            .await
            .expect("update should succeed");
        let (_, info) = store
            .get_network_in_any_state("default", "br0")
            .await
            .expect("record should exist");
        assert_eq!(info.status, NetworkStatus::Created);

        store
            .delete_network("default", "br0")
            .await
            .expect("delete should succeed");
        assert!(store.is_empty().await);
        assert!(store.delete_network("default", "br0").await.is_err());
    }

    #[tokio::test]
    async fn injected_failure_applies_to_lookups() {
        let store = MemoryNetworkStore::new();
        store
            .create_network("default", "br0", NetworkInfo::new("bridge"))
            .await
            .expect("create should succeed");

        store.fail_with(Some("database is locked")).await;
        let err = store
            .get_network_in_any_state("default", "br0")
            .await
            .expect_err("lookup should fail");
        assert_eq!(err.to_string(), "Store unavailable: database is locked");

        store.fail_with(None).await;
        assert!(store.get_network_in_any_state("default", "br0").await.is_ok());
    }
}
