//! Driver Registry
//!
//! Maps a driver type (e.g. "bridge") to the factory that builds an empty
//! instance of it. Built once at startup, then shared read-only behind an
//! `Arc`.

use std::collections::HashMap;

use crate::network::drivers::{bridge, macvlan, ovn, sriov};
use crate::network::traits::Network;
use crate::settings::NetworkSettings;

/// Builds an uninitialized driver
pub type DriverFactory = fn() -> Box<dyn Network>;

const BUILTIN_DRIVERS: &[(&str, DriverFactory)] = &[
    ("bridge", bridge::create_driver),
    ("macvlan", macvlan::create_driver),
    ("sriov", sriov::create_driver),
    ("ovn", ovn::create_driver),
];

/// Registry that holds all available network drivers
pub struct DriverRegistry {
    drivers: HashMap<String, DriverFactory>,
}

impl DriverRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Registry with every driver this crate ships
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        for (driver_type, factory) in BUILTIN_DRIVERS {
            registry.register(driver_type, *factory);
        }
        registry
    }

    /// Built-in drivers minus the ones disabled in settings
    pub fn from_settings(settings: &NetworkSettings) -> Self {
        let mut registry = Self::new();
        for (driver_type, factory) in BUILTIN_DRIVERS {
            if settings.is_driver_disabled(driver_type) {
                tracing::info!(driver = driver_type, "network driver disabled by settings");
                continue;
            }
            registry.register(driver_type, *factory);
        }
        registry
    }

    /// Registers a driver factory under `driver_type`
    ///
    /// Returns the factory that was previously registered under that name,
    /// if any.
    pub fn register(&mut self, driver_type: &str, factory: DriverFactory) -> Option<DriverFactory> {
        self.drivers.insert(driver_type.to_string(), factory)
    }

    /// Gets a driver factory by its type
    pub fn get(&self, driver_type: &str) -> Option<DriverFactory> {
        self.drivers.get(driver_type).copied()
    }

    pub fn contains(&self, driver_type: &str) -> bool {
        self.drivers.contains_key(driver_type)
    }

    /// Lists all registered driver types, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.drivers.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }

    /// Returns the number of registered drivers
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Returns true if no drivers are registered
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
