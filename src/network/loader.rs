//! Network Loader
//!
//! Turns a driver type, or a persisted network, into a driver instance.
//! The loader keeps no state between calls: every instance it returns is
//! freshly built and owned by the caller.

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::network::error::{NetworkError, NetworkResult};
use crate::network::registry::{DriverFactory, DriverRegistry};
use crate::network::store::NetworkStore;
use crate::network::traits::Network;
use crate::network::types::{NetworkConfig, NetworkInit, DEFAULT_PROJECT};

pub struct NetworkLoader {
    registry: Arc<DriverRegistry>,
    default_project: String,
}

impl NetworkLoader {
    pub fn new(registry: Arc<DriverRegistry>) -> Self {
        Self {
            registry,
            default_project: DEFAULT_PROJECT.to_string(),
        }
    }

    /// Project that `validate` binds its throwaway instance to
    pub fn with_default_project(mut self, project: impl Into<String>) -> Self {
        self.default_project = project.into();
        self
    }

    fn resolve(&self, driver_type: &str) -> NetworkResult<DriverFactory> {
        self.registry.get(driver_type).ok_or_else(|| {
            warn!(driver = driver_type, "unknown network driver");
            NetworkError::unknown_driver(driver_type)
        })
    }

    /// Driver types this loader can build, sorted
    pub fn supported_types(&self) -> Vec<&str> {
        self.registry.list()
    }

    /// Builds a bare driver of `driver_type`
    ///
    /// The instance is not initialized: only `validate_name` and `validate`
    /// may be used on it. The store is never consulted.
    #[instrument(skip(self))]
    pub fn load_by_type(&self, driver_type: &str) -> NetworkResult<Box<dyn Network>> {
        let factory = self.resolve(driver_type)?;
        Ok(factory())
    }

    /// Loads the network `name` in `project` from `store`
    ///
    /// Records in any status are loaded. Store failures, including a
    /// missing record, are returned as they came. The instance is a snapshot
    /// of the record at call time.
    #[instrument(skip(self, store))]
    pub async fn load_by_name(
        &self,
        store: Arc<dyn NetworkStore>,
        project: &str,
        name: &str,
    ) -> NetworkResult<Box<dyn Network>> {
        let (id, info) = store.get_network_in_any_state(project, name).await?;

        // A record naming a driver we don't have is a data problem, not a
        // caller mistake
        let factory = self.resolve(&info.net_type)?;

        let mut network = factory();
        network.init(NetworkInit::from_record(store, id, project, name, info));

        tracing::debug!(id, net_type = network.net_type(), status = %network.status(), "network loaded");
        Ok(network)
    }

    /// Validates a name and config for a network that doesn't exist yet
    ///
    /// Nothing is read from or written to a store. Name failures are wrapped
    /// as [`NetworkError::NameInvalid`]; config failures are returned as the
    /// driver reported them.
    #[instrument(skip(self, config))]
    pub fn validate(&self, name: &str, net_type: &str, config: &NetworkConfig) -> NetworkResult<()> {
        let factory = self.resolve(net_type)?;

        let mut network = factory();
        network.init(NetworkInit::ephemeral(
            &self.default_project,
            name,
            net_type,
            config.clone(),
        ));

        network
            .validate_name(name)
            .map_err(NetworkError::name_invalid)?;

        network.validate(config)
    }
}
