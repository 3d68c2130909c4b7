//! SR-IOV Driver
//!
//! Hands out virtual functions of an SR-IOV capable parent NIC.

use crate::network::drivers::validate::{self, OptionValidator};
use crate::network::error::NetworkResult;
use crate::network::traits::{Network, NetworkCommon};
use crate::network::types::NetworkConfig;

const OPTIONS: &[(&str, OptionValidator)] = &[
    ("mtu", validate::is_network_mtu),
    ("parent", validate::is_interface),
    ("vlan", validate::is_vlan),
];

const REQUIRED: &[&str] = &["parent"];

#[derive(Debug, Default)]
pub struct Sriov {
    common: NetworkCommon,
}

impl Sriov {
    pub fn new() -> Self {
        Self {
            common: NetworkCommon::new(),
        }
    }
}

/// Registry factory
pub fn create_driver() -> Box<dyn Network> {
    Box::new(Sriov::new())
}

impl Network for Sriov {
    fn driver_type(&self) -> &'static str {
        "sriov"
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
