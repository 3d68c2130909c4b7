//! Network store
//!
//! The loader only needs one thing from persistence: resolve a project and
//! name to a record, whatever state that record is in.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::network::error::StoreResult;
use crate::network::types::NetworkInfo;

pub use memory::MemoryNetworkStore;
pub use sqlite::SqliteNetworkStore;

#[async_trait]
pub trait NetworkStore: Send + Sync {
    /// Returns the id and record for `name` in `project`
    ///
    /// Records are returned whatever their status (Pending and Errored
    /// included). A missing record is `StoreError::NotFound`.
    async fn get_network_in_any_state(
        &self,
        project: &str,
        name: &str,
    ) -> StoreResult<(i64, NetworkInfo)>;
}
