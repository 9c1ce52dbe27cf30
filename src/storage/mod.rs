//! Read-only access to a user's monthly tables.
//!
//! The forecast core never writes. Real deployments back [`TableSource`] with
//! the hosted data store; [`Snapshot`] covers JSON exports of that store.

pub mod json_snapshot;

use crate::errors::TrackerResult;
use crate::ledger::MonthlyTable;

pub use json_snapshot::Snapshot;

pub trait TableSource: Send + Sync {
    /// Every table owned by `user_id`, in any order.
    fn list_tables_for_user(&self, user_id: &str) -> TrackerResult<Vec<MonthlyTable>>;
}
