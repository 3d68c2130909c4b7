// netdrivers - Pluggable network backends
// Core library

//! Network driver registry and loader.
//!
//! Hosts build a [`NetworkState`] once at startup and use its
//! [`NetworkLoader`] to get driver instances by type or by stored name.
//! Logging goes through `tracing`; binaries embedding the crate call
//! [`observability::init_tracing`] once before building the state to get the
//! rolling log file under the per-user app directory.

pub mod network;
pub mod observability;
pub mod settings;

use std::sync::Arc;

use network::{DriverRegistry, NetworkLoader, SqliteNetworkStore, StoreResult};
use settings::NetworkSettings;

/// Process-wide network state
///
/// Built once at startup. The registry is frozen from then on; loaders
/// handed out by [`NetworkState::loader`] all share it.
pub struct NetworkState {
    pub registry: Arc<DriverRegistry>,
    pub settings: NetworkSettings,
}

impl NetworkState {
    pub fn new() -> Self {
        Self::with_settings(NetworkSettings::load())
    }

    pub fn with_settings(settings: NetworkSettings) -> Self {
        let registry = Arc::new(DriverRegistry::from_settings(&settings));
        tracing::info!(drivers = ?registry.list(), "network driver registry ready");

        Self { registry, settings }
    }

    pub fn loader(&self) -> NetworkLoader {
        NetworkLoader::new(Arc::clone(&self.registry))
            .with_default_project(self.settings.default_project.clone())
    }

    /// Opens the configured SQLite store, if any
    pub async fn open_store(&self) -> StoreResult<Option<SqliteNetworkStore>> {
        match self.settings.database_url.as_deref() {
            Some(url) => Ok(Some(SqliteNetworkStore::connect(url).await?)),
            None => Ok(None),
        }
    }
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new()
    }
}
