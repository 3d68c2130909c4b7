//! Bridge Driver
//!
//! Managed Linux (or Open vSwitch) bridge with optional NAT and DHCP.

use crate::network::drivers::validate::{self, OptionValidator};
use crate::network::error::{NetworkError, NetworkResult};
use crate::network::traits::{Network, NetworkCommon};
use crate::network::types::NetworkConfig;

const OPTIONS: &[(&str, OptionValidator)] = &[
    ("bridge.driver", is_bridge_driver),
    ("bridge.external_interfaces", validate::is_interface_list),
    ("bridge.hwaddr", validate::is_mac_address),
    ("bridge.mtu", validate::is_network_mtu),
    ("dns.domain", validate::is_dns_domain),
    ("dns.mode", is_dns_mode),
    ("ipv4.address", validate::is_ipv4_address_setting),
    ("ipv4.dhcp", validate::is_bool),
    ("ipv4.nat", validate::is_bool),
    ("ipv6.address", validate::is_ipv6_address_setting),
    ("ipv6.dhcp", validate::is_bool),
    ("ipv6.nat", validate::is_bool),
];

fn is_bridge_driver(value: &str) -> Result<(), String> {
    match value {
        "native" | "openvswitch" => Ok(()),
        _ => Err(format!("Unknown bridge driver \"{}\"", value)),
    }
}

fn is_dns_mode(value: &str) -> Result<(), String> {
    match value {
        "none" | "managed" | "dynamic" => Ok(()),
        _ => Err(format!("Unknown DNS mode \"{}\"", value)),
    }
}

/// Bridge network driver
#[derive(Debug, Default)]
pub struct Bridge {
    common: NetworkCommon,
}

impl Bridge {
    pub fn new() -> Self {
        Self {
            common: NetworkCommon::new(),
        }
    }
}

/// Registry factory
pub fn create_driver() -> Box<dyn Network> {
    Box::new(Bridge::new())
}

impl Network for Bridge {
    fn driver_type(&self) -> &'static str {
        "bridge"
    }

    fn common(&self) -> &NetworkCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut NetworkCommon {
        &mut self.common
    }

    fn validate(&self, config: &NetworkConfig) -> NetworkResult<()> {
        validate::check_options(config, OPTIONS, &[])?;

        // NAT needs an address to masquerade behind
        for family in ["ipv4", "ipv6"] {
            let nat_key = format!("{}.nat", family);
            let nat_enabled = config
                .get(&nat_key)
                .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on"));
            let address = config.get(&format!("{}.address", family)).map(String::as_str);

            if nat_enabled && address == Some("none") {
                return Err(NetworkError::invalid_config(
                    &nat_key,
                    format!("NAT requires {}.address to be set", family),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> NetworkConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn accepts_typical_config() {
        let bridge = Bridge::new();
        let cfg = config(&[
            ("ipv4.address", "10.0.3.1/24"),
            ("ipv4.nat", "true"),
            ("ipv6.address", "none"),
            ("bridge.mtu", "1500"),
            ("dns.domain", "lxd"),
            ("user.owner", "ops"),
        ]);

        assert!(bridge.validate(&cfg).is_ok());
        assert!(bridge.validate(&NetworkConfig::new()).is_ok());
    }

    #[test]
    fn rejects_unknown_option() {
        let err = Bridge::new()
            .validate(&config(&[("unknown.key", "x")]))
            .expect_err("unknown key should fail");
        assert!(matches!(err, NetworkError::InvalidConfig { ref key, .. } if key == "unknown.key"));
    }

    #[test]
    fn rejects_bad_values() {
        let bridge = Bridge::new();
        assert!(bridge.validate(&config(&[("bridge.driver", "vde")])).is_err());
        assert!(bridge.validate(&config(&[("ipv4.address", "10.0.3.1")])).is_err());
        assert!(bridge.validate(&config(&[("dns.mode", "static")])).is_err());
    }

    #[test]
    fn nat_requires_an_address() {
        let err = Bridge::new()
            .validate(&config(&[("ipv4.address", "none"), ("ipv4.nat", "true")]))
            .expect_err("nat without address should fail");
        assert!(matches!(err, NetworkError::InvalidConfig { ref key, .. } if key == "ipv4.nat"));
    }

    #[test]
    fn name_rules_reject_spaces() {
        let bridge = Bridge::new();
        assert!(bridge.validate_name("lxdbr0").is_ok());
        assert!(matches!(
            bridge.validate_name("Bad Name!"),
            Err(NetworkError::InvalidName { .. })
        ));
    }
}
