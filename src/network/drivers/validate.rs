//! Option and name validators shared by the drivers

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::network::error::{NetworkError, NetworkResult};
use crate::network::types::NetworkConfig;

/// Checks a single option value, returning a human readable reason on failure
pub type OptionValidator = fn(&str) -> Result<(), String>;

/// Linux IFNAMSIZ minus the trailing NUL
const MAX_INTERFACE_NAME_LEN: usize = 15;

const USER_PREFIX: &str = "user.";

/// Kernel network interface naming rules
pub fn interface_name(name: &str) -> NetworkResult<()> {
    interface_name_reason(name).map_err(NetworkError::invalid_name)
}

fn interface_name_reason(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(format!(
            "Name cannot be longer than {} characters",
            MAX_INTERFACE_NAME_LEN
        ));
    }
    if name == "." || name == ".." {
        return Err(format!("Name cannot be \"{}\"", name));
    }
    if name.starts_with('-') {
        return Err("Name cannot start with \"-\"".to_string());
    }
    if let Some(c) = name.chars().find(|c| matches!(c, ':' | '/')) {
        return Err(format!("Name cannot contain \"{}\"", c));
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("Name cannot contain white space or control characters".to_string());
    }
    Ok(())
}

/// Validates `config` against a driver's option table
///
/// Keys are checked in sorted order so the same map always yields the same
/// error. `user.*` keys are free-form and always accepted.
pub fn check_options(
    config: &NetworkConfig,
    options: &[(&str, OptionValidator)],
    required: &[&str],
) -> NetworkResult<()> {
    let mut keys: Vec<&String> = config.keys().collect();
    keys.sort();

    for key in keys {
        if key.starts_with(USER_PREFIX) {
            continue;
        }

        let validator = options
            .iter()
            .find(|(name, _)| *name == key.as_str())
            .map(|(_, validator)| validator)
            .ok_or_else(|| NetworkError::invalid_config(key, "Invalid option"))?;

        // Empty means unset; required keys are caught below
        let value = &config[key];
        if value.is_empty() {
            continue;
        }

        validator(value).map_err(|reason| NetworkError::invalid_config(key, reason))?;
    }

    for key in required {
        let present = config.get(*key).is_some_and(|value| !value.is_empty());
        if !present {
            return Err(NetworkError::missing_config(key));
        }
    }

    Ok(())
}

pub fn is_bool(value: &str) -> Result<(), String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "false" | "1" | "0" | "yes" | "no" | "on" | "off" => Ok(()),
        _ => Err(format!("Invalid boolean \"{}\"", value)),
    }
}

pub fn is_network_mtu(value: &str) -> Result<(), String> {
    let mtu: u32 = value
        .parse()
        .map_err(|_| format!("Invalid MTU \"{}\"", value))?;

    if !(1280..=16384).contains(&mtu) {
        return Err(format!("MTU must be between 1280 and 16384, got {}", mtu));
    }
    Ok(())
}

pub fn is_vlan(value: &str) -> Result<(), String> {
    let vlan: u16 = value
        .parse()
        .map_err(|_| format!("Invalid VLAN ID \"{}\"", value))?;

    if vlan > 4094 {
        return Err(format!("VLAN ID must be between 0 and 4094, got {}", vlan));
    }
    Ok(())
}

pub fn is_mac_address(value: &str) -> Result<(), String> {
    let octets: Vec<&str> = value.split(':').collect();
    let valid = octets.len() == 6
        && octets
            .iter()
            .all(|octet| octet.len() == 2 && octet.chars().all(|c| c.is_ascii_hexdigit()));

    if valid {
        Ok(())
    } else {
        Err(format!("Invalid MAC address \"{}\"", value))
    }
}

pub fn is_interface(value: &str) -> Result<(), String> {
    interface_name_reason(value).map_err(|reason| format!("Invalid interface \"{}\": {}", value, reason))
}

pub fn is_interface_list(value: &str) -> Result<(), String> {
    value.split(',').map(str::trim).try_for_each(is_interface)
}

fn split_cidr(value: &str) -> Option<(&str, &str)> {
    let (addr, prefix) = value.split_once('/')?;
    if addr.is_empty() || prefix.is_empty() {
        return None;
    }
    Some((addr, prefix))
}

pub fn is_ipv4_cidr(value: &str) -> Result<(), String> {
    let invalid = || format!("Invalid IPv4 CIDR \"{}\"", value);
    let (addr, prefix) = split_cidr(value).ok_or_else(invalid)?;
    addr.parse::<Ipv4Addr>().map_err(|_| invalid())?;
    match prefix.parse::<u8>() {
        Ok(bits) if bits <= 32 => Ok(()),
        _ => Err(invalid()),
    }
}

pub fn is_ipv6_cidr(value: &str) -> Result<(), String> {
    let invalid = || format!("Invalid IPv6 CIDR \"{}\"", value);
    let (addr, prefix) = split_cidr(value).ok_or_else(invalid)?;
    addr.parse::<Ipv6Addr>().map_err(|_| invalid())?;
    match prefix.parse::<u8>() {
        Ok(bits) if bits <= 128 => Ok(()),
        _ => Err(invalid()),
    }
}

/// "auto", "none" or an IPv4 CIDR
pub fn is_ipv4_address_setting(value: &str) -> Result<(), String> {
    match value {
        "auto" | "none" => Ok(()),
        _ => is_ipv4_cidr(value),
    }
}

/// "auto", "none" or an IPv6 CIDR
pub fn is_ipv6_address_setting(value: &str) -> Result<(), String> {
    match value {
        "auto" | "none" => Ok(()),
        _ => is_ipv6_cidr(value),
    }
}

pub fn is_dns_domain(value: &str) -> Result<(), String> {
    let invalid = |reason: &str| format!("Invalid domain \"{}\": {}", value, reason);

    if value.is_empty() || value.len() > 253 {
        return Err(invalid("length must be between 1 and 253"));
    }

    for label in value.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(invalid("labels must be between 1 and 63 characters"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("labels cannot start or end with \"-\""));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid("only letters, digits and \"-\" are allowed"));
        }
    }
    Ok(())
}
