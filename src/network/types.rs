//! Shared data types for the network layer
//!
//! These are the values that flow between the store, the loader and the
//! drivers. None of them carry behavior beyond parsing and display.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::network::store::NetworkStore;

/// Project used when a caller does not name one
pub const DEFAULT_PROJECT: &str = "default";

/// Driver options, keyed by option name (e.g. "ipv4.address")
pub type NetworkConfig = HashMap<String, String>;

/// Lifecycle status of a persisted network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NetworkStatus {
    /// Defined in the database but not yet created on every member
    Pending,
    /// Fully created
    Created,
    /// Creation failed somewhere
    Errored,
    /// Not known. Used for instances that have no persisted record.
    #[default]
    Unknown,
}

impl NetworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkStatus::Pending => "Pending",
            NetworkStatus::Created => "Created",
            NetworkStatus::Errored => "Errored",
            NetworkStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(NetworkStatus::Pending),
            "Created" => Ok(NetworkStatus::Created),
            "Errored" => Ok(NetworkStatus::Errored),
            "Unknown" => Ok(NetworkStatus::Unknown),
            other => Err(format!("Invalid network status: {}", other)),
        }
    }
}

/// A network as persisted by the store
///
/// The record is owned by the store. The loader only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Driver type (bridge, macvlan, sriov, ovn)
    #[serde(rename = "type")]
    pub net_type: String,
    pub description: String,
    #[serde(default)]
    pub config: NetworkConfig,
    pub status: NetworkStatus,
}

impl NetworkInfo {
    pub fn new(net_type: impl Into<String>) -> Self {
        Self {
            net_type: net_type.into(),
            description: String::new(),
            config: NetworkConfig::new(),
            status: NetworkStatus::Pending,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_status(mut self, status: NetworkStatus) -> Self {
        self.status = status;
        self
    }
}

/// Everything a driver is bound to when it is initialized
#[derive(Clone)]
pub struct NetworkInit {
    /// Store the record came from. `None` for validation-only instances.
    pub store: Option<Arc<dyn NetworkStore>>,
    pub id: i64,
    pub project: String,
    pub name: String,
    pub net_type: String,
    pub description: String,
    pub config: NetworkConfig,
    pub status: NetworkStatus,
}

impl NetworkInit {
    /// Context for a record read from `store`
    pub fn from_record(
        store: Arc<dyn NetworkStore>,
        id: i64,
        project: &str,
        name: &str,
        info: NetworkInfo,
    ) -> Self {
        Self {
            store: Some(store),
            id,
            project: project.to_string(),
            name: name.to_string(),
            net_type: info.net_type,
            description: info.description,
            config: info.config,
            status: info.status,
        }
    }

    /// Context for a network that has no record yet
    pub fn ephemeral(project: &str, name: &str, net_type: &str, config: NetworkConfig) -> Self {
        Self {
            store: None,
            id: 0,
            project: project.to_string(),
            name: name.to_string(),
            net_type: net_type.to_string(),
            description: String::new(),
            config,
            status: NetworkStatus::Unknown,
        }
    }
}

impl fmt::Debug for NetworkInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkInit")
            .field("store", &self.store.is_some())
            .field("id", &self.id)
            .field("project", &self.project)
            .field("name", &self.name)
            .field("net_type", &self.net_type)
            .field("description", &self.description)
            .field("config", &self.config)
            .field("status", &self.status)
            .finish()
    }
}
