//! Network trait definition
//!
//! This is the capability every network driver implements. A driver is
//! built in two steps: its factory returns an empty value, then `init`
//! binds it to a record. Only name and config validation are meaningful
//! before `init`; everything else reads the bound state.

use std::sync::Arc;

use crate::network::error::NetworkResult;
use crate::network::store::NetworkStore;
use crate::network::types::{NetworkConfig, NetworkInit, NetworkStatus};
use crate::network::drivers::validate;

/// State shared by every driver, filled in by `init`
#[derive(Debug, Default)]
pub struct NetworkCommon {
    state: Option<NetworkInit>,
}

impl NetworkCommon {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Replaces any previous binding
    pub fn init(&mut self, ctx: NetworkInit) {
        self.state = Some(ctx);
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn bound(&self) -> Option<&NetworkInit> {
        debug_assert!(
            self.state.is_some(),
            "network driver used before init was called"
        );
        self.state.as_ref()
    }

    pub fn id(&self) -> i64 {
        self.bound().map(|s| s.id).unwrap_or_default()
    }

    pub fn project(&self) -> &str {
        self.bound().map(|s| s.project.as_str()).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.bound().map(|s| s.name.as_str()).unwrap_or_default()
    }

    pub fn net_type(&self) -> &str {
        self.bound().map(|s| s.net_type.as_str()).unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.bound()
            .map(|s| s.description.as_str())
            .unwrap_or_default()
    }

    pub fn status(&self) -> NetworkStatus {
        self.bound().map(|s| s.status).unwrap_or_default()
    }

    pub fn config(&self) -> Option<&NetworkConfig> {
        self.bound().map(|s| &s.config)
    }

    pub fn store(&self) -> Option<&Arc<dyn NetworkStore>> {
        self.bound().and_then(|s| s.store.as_ref())
    }
}

/// Core trait that all network drivers must implement
///
/// Drivers own a [`NetworkCommon`] and expose it through `common()` and
/// `common_mut()`; the provided methods are built on top of it.
pub trait Network: Send + Sync {
    /// Returns the registry key for this driver (e.g., "bridge", "ovn")
    fn driver_type(&self) -> &'static str;

    fn common(&self) -> &NetworkCommon;

    fn common_mut(&mut self) -> &mut NetworkCommon;

    /// Binds the driver to a network
    ///
    /// Always overwrites what a previous call set. Must be called before
    /// any accessor below is used.
    fn init(&mut self, ctx: NetworkInit) {
        self.common_mut().init(ctx);
    }

    fn is_initialized(&self) -> bool {
        self.common().is_initialized()
    }

    fn id(&self) -> i64 {
        self.common().id()
    }

    fn project(&self) -> &str {
        self.common().project()
    }

    fn name(&self) -> &str {
        self.common().name()
    }

    /// Type stored in the record, which matches `driver_type` for anything
    /// handed out by the loader
    fn net_type(&self) -> &str {
        self.common().net_type()
    }

    fn description(&self) -> &str {
        self.common().description()
    }

    fn status(&self) -> NetworkStatus {
        self.common().status()
    }

    fn config(&self) -> Option<&NetworkConfig> {
        self.common().config()
    }

    fn store(&self) -> Option<&Arc<dyn NetworkStore>> {
        self.common().store()
    }

    /// Checks the network name against this driver's naming rules
    ///
    /// Defaults to the kernel interface name rules.
    fn validate_name(&self, name: &str) -> NetworkResult<()> {
        validate::interface_name(name)
    }

    /// Checks a config map against this driver's accepted options
    fn validate(&self, config: &NetworkConfig) -> NetworkResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::drivers::Bridge;

    #[test]
    fn init_replaces_previous_binding() {
        let mut network = Bridge::new();
        assert!(!network.is_initialized());

        let mut first = NetworkConfig::new();
        first.insert("ipv4.address".to_string(), "auto".to_string());
        let mut ctx = NetworkInit::ephemeral("p1", "n1", "bridge", first);
        ctx.id = 7;
        ctx.description = "first".to_string();
        ctx.status = NetworkStatus::Created;
        network.init(ctx);

        network.init(NetworkInit::ephemeral("p2", "n2", "bridge", NetworkConfig::new()));

        assert!(network.is_initialized());
        assert_eq!(network.project(), "p2");
        assert_eq!(network.name(), "n2");
        assert_eq!(network.id(), 0);
        assert_eq!(network.description(), "");
        assert_eq!(network.status(), NetworkStatus::Unknown);
        assert_eq!(network.config().map(|c| c.len()), Some(0));
        assert!(network.store().is_none());
    }
}
