//! OVN Driver
//!
//! Virtual network on top of OVN, attached to an uplink network.

use crate::network::drivers::validate::{self, OptionValidator};
use crate::network::error::NetworkResult;
use crate::network::traits::{Network, NetworkCommon};
use crate::network::types::NetworkConfig;

const OPTIONS: &[(&str, OptionValidator)] = &[
    ("bridge.hwaddr", validate::is_mac_address),
    ("bridge.mtu", validate::is_network_mtu),
    ("dns.domain", validate::is_dns_domain),
    ("ipv4.address", validate::is_ipv4_address_setting),
    ("ipv4.nat", validate::is_bool),
    ("ipv6.address", validate::is_ipv6_address_setting),
    ("ipv6.nat", validate::is_bool),
    ("network", is_uplink_name),
];

const REQUIRED: &[&str] = &["network"];

/// Uplink networks are themselves managed networks, so they follow the
/// same naming rules
fn is_uplink_name(value: &str) -> Result<(), String> {
    validate::interface_name(value)
        .map_err(|e| format!("Invalid uplink network \"{}\": {}", value, e))
}

#[derive(Debug, Default)]
pub struct Ovn {
    common: NetworkCommon,
}

impl Ovn {
    pub fn new() -> Self {
        Self {
            common: NetworkCommon::new(),
        }
    }
}

/// Registry factory
pub fn create_driver() -> Box<dyn Network> {
    Box::new(Ovn::new())
}

impl Network for Ovn {
    fn driver_type(&self) -> &'static str {
        "ovn"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::error::NetworkError;

    #[test]
    fn requires_an_uplink() {
        let ovn = Ovn::new();

        let err = ovn
            .validate(&NetworkConfig::new())
            .expect_err("missing uplink should fail");
        assert!(matches!(err, NetworkError::MissingConfig { ref key } if key == "network"));

        let mut cfg = NetworkConfig::new();
        cfg.insert("network".to_string(), "UPLINK".to_string());
        cfg.insert("ipv4.address".to_string(), "auto".to_string());
        assert!(ovn.validate(&cfg).is_ok());
    }

    #[test]
    fn rejects_bridge_only_options() {
        let mut cfg = NetworkConfig::new();
        cfg.insert("network".to_string(), "UPLINK".to_string());
        cfg.insert("bridge.driver".to_string(), "native".to_string());

        let err = Ovn::new().validate(&cfg).expect_err("bridge.driver is not an ovn option");
        assert!(matches!(err, NetworkError::InvalidConfig { ref key, .. } if key == "bridge.driver"));
    }
}
