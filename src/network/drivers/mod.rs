//! Network drivers
//!
//! Each driver exposes a `create_driver` factory that the registry stores.

pub mod bridge;
pub mod macvlan;
pub mod ovn;
pub mod sriov;
pub mod validate;

pub use bridge::Bridge;
pub use macvlan::Macvlan;
pub use ovn::Ovn;
pub use sriov::Sriov;
