//! Driving port for entry reads.

use async_trait::async_trait;

use crate::domain::{Entry, EntryId, Error};

/// Read side of the entry catalogue. Neither call filters by caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntriesQuery: Send + Sync {
    /// Every entry with owners expanded, in insertion order.
    async fn list_entries(&self) -> Result<Vec<Entry>, Error>;

    /// One entry with its owner expanded.
    async fn get_entry(&self, id: &EntryId) -> Result<Entry, Error>;
}
