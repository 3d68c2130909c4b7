//! Macvlan Driver
//!
//! Attaches instances to a parent interface through macvlan sub-interfaces.

use crate::network::drivers::validate::{self, OptionValidator};
use crate::network::error::NetworkResult;
use crate::network::traits::{Network, NetworkCommon};
use crate::network::types::NetworkConfig;

const OPTIONS: &[(&str, OptionValidator)] = &[
    ("gvrp", validate::is_bool),
    ("mtu", validate::is_network_mtu),
    ("parent", validate::is_interface),
    ("vlan", validate::is_vlan),
];

const REQUIRED: &[&str] = &["parent"];

/// Macvlan network driver
#[derive(Debug, Default)]
pub struct Macvlan {
    common: NetworkCommon,
}

impl Macvlan {
    pub fn new() -> Self {
        Self {
            common: NetworkCommon::new(),
        }
    }
}

/// Registry factory
pub fn create_driver() -> Box<dyn Network> {
    Box::new(Macvlan::new())
}

impl Network for Macvlan {
    fn driver_type(&self) -> &'static str {
        "macvlan"
    }

    fn common(&self) -> &NetworkCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut NetworkCommon {
        &mut self.common
    }

    fn validate(&self, config: &NetworkConfig) -> NetworkResult<()> {
        validate::check_options(config, OPTIONS, REQUIRED)
    }
}
