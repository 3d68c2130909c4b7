// Network Module
// Driver registry and loader for managed networks

pub mod drivers;
pub mod error;
pub mod loader;
pub mod registry;
pub mod store;
pub mod traits;
pub mod types;

pub use error::{NetworkError, NetworkResult, StoreError, StoreResult};
pub use loader::NetworkLoader;
pub use registry::{DriverFactory, DriverRegistry};
pub use store::{MemoryNetworkStore, NetworkStore, SqliteNetworkStore};
pub use traits::{Network, NetworkCommon};
pub use types::*;
