//! SQLite network store
//!
//! Persists network records with SQLx. Options live in their own table so
//! a record can carry any number of them.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{info, instrument};

use crate::network::error::{StoreError, StoreResult};
use crate::network::store::NetworkStore;
use crate::network::types::{NetworkConfig, NetworkInfo, NetworkStatus};

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[derive(Clone)]
pub struct SqliteNetworkStore {
    pool: SqlitePool,
}

impl SqliteNetworkStore {
    const MAX_CONNECTIONS: u32 = 5;

    /// Opens (creating if needed) the database at `database_url`
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to an in-memory database sees its own empty copy,
        // and the data is gone once that connection closes
        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(Self::MAX_CONNECTIONS)
        };

        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.init_schema().await?;

        info!("SQLite network store initialized at {}", database_url);
        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS networks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project TEXT NOT NULL,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL,
                UNIQUE (project, name)
            );",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS networks_config (
                network_id INTEGER NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                UNIQUE (network_id, key),
                FOREIGN KEY (network_id) REFERENCES networks (id) ON DELETE CASCADE
            );",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a record with its options and returns the new id
    #[instrument(skip(self, info), fields(net_type = %info.net_type))]
    pub async fn create_network(
        &self,
        project: &str,
        name: &str,
        info: &NetworkInfo,
    ) -> StoreResult<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO networks (project, name, type, description, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(project)
        .bind(name)
        .bind(&info.net_type)
        .bind(&info.description)
        .bind(info.status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if duplicate {
                StoreError::already_exists(project, name)
            } else {
                StoreError::Database(e)
            }
        })?;

        let id = result.last_insert_rowid();

        for (key, value) in &info.config {
            sqlx::query("INSERT INTO networks_config (network_id, key, value) VALUES (?, ?, ?)")
                .bind(id)
                .bind(key)
                .bind(value)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    pub async fn update_status(
        &self,
        project: &str,
        name: &str,
        status: NetworkStatus,
    ) -> StoreResult<()> {
        let result = sqlx::query("UPDATE networks SET status = ? WHERE project = ? AND name = ?")
            .bind(status.as_str())
            .bind(project)
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(project, name));
        }
        Ok(())
    }

    pub async fn delete_network(&self, project: &str, name: &str) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM networks_config WHERE network_id IN
                (SELECT id FROM networks WHERE project = ? AND name = ?)",
        )
        .bind(project)
        .bind(name)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM networks WHERE project = ? AND name = ?")
            .bind(project)
            .bind(name)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(project, name));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl NetworkStore for SqliteNetworkStore {
    #[instrument(skip(self))]
    async fn get_network_in_any_state(
        &self,
        project: &str,
        name: &str,
    ) -> StoreResult<(i64, NetworkInfo)> {
        let row = sqlx::query(
            "SELECT id, type, description, status FROM networks WHERE project = ? AND name = ?",
        )
        .bind(project)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(project, name))?;

        let id: i64 = row.try_get("id")?;
        let status: String = row.try_get("status")?;
        let status = status.parse::<NetworkStatus>().map_err(StoreError::Corrupt)?;

        let config_rows = sqlx::query("SELECT key, value FROM networks_config WHERE network_id = ?")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        let mut config = NetworkConfig::new();
        for config_row in config_rows {
            config.insert(config_row.try_get("key")?, config_row.try_get("value")?);
        }

        let info = NetworkInfo {
            net_type: row.try_get("type")?,
            description: row.try_get("description")?,
            config,
            status,
        };

        Ok((id, info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteNetworkStore {
        SqliteNetworkStore::connect("sqlite::memory:")
            .await
            .expect("in-memory database should open")
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite:file:networks?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite://var/lib/netdrivers/networks.db"));
    }

    #[tokio::test]
    async fn stores_and_reads_back_a_record() {
        let store = memory_store().await;
        let mut config = NetworkConfig::new();
        config.insert("ipv4.address".to_string(), "auto".to_string());
        config.insert("ipv6.address".to_string(), "none".to_string());
        let info = NetworkInfo::new("bridge")
            .with_description("Main bridge")
            .with_config(config)
            .with_status(NetworkStatus::Created);

        let id = store
            .create_network("default", "eth0br", &info)
            .await
            .expect("create should succeed");

        let (found_id, found) = store
            .get_network_in_any_state("default", "eth0br")
            .await
            .expect("record should be found");

        assert_eq!(found_id, id);
        assert_eq!(found, info);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let store = memory_store().await;

        let err = store
            .get_network_in_any_state("default", "ghost")
            .await
            .expect_err("lookup should fail");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn duplicate_name_in_project_is_rejected() {
        let store = memory_store().await;
        let info = NetworkInfo::new("bridge");
        store
            .create_network("default", "br0", &info)
            .await
            .expect("first create should succeed");

        let err = store
            .create_network("default", "br0", &info)
            .await
            .expect_err("duplicate should fail");
        assert!(matches!(err, StoreError::AlreadyExists { .. }));

        store
            .create_network("other", "br0", &info)
            .await
            .expect("same name in another project is fine");
    }

    #[tokio::test]
    async fn status_updates_and_deletes() {
        let store = memory_store().await;
        let mut config = NetworkConfig::new();
        config.insert("parent".to_string(), "eth0".to_string());
        store
            .create_network("default", "mv0", &NetworkInfo::new("macvlan").with_config(config))
            .await
            .expect("create should succeed");

        store
            .update_status("default", "mv0", NetworkStatus::Errored)
            .await
            .expect("update should succeed");
        let (_, info) = store
            .get_network_in_any_state("default", "mv0")
            .await
            .expect("errored record should still be found");
        assert_eq!(info.status, NetworkStatus::Errored);

        store
            .delete_network("default", "mv0")
            .await
            .expect("delete should succeed");
        assert!(store
            .get_network_in_any_state("default", "mv0")
            .await
            .expect_err("record should be gone")
            .is_not_found());
        assert!(store
            .update_status("default", "mv0", NetworkStatus::Created)
            .await
            .is_err());
    }
}
