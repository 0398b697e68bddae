//! Driving port for entry mutations.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Entry, EntryDraft, EntryId, Error, User};

/// Write side of the entry catalogue.
///
/// Creation and deletion act on behalf of an authenticated user; updating
/// the like counter is open to any caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntriesCommand: Send + Sync {
    /// Validate and store a new entry owned by `owner`.
    async fn create_entry(&self, owner: &User, draft: EntryDraft) -> Result<Entry, Error>;

    /// Replace the like counter with the normalised `likes` value.
    async fn update_likes(&self, id: &EntryId, likes: Option<Value>) -> Result<Entry, Error>;

    /// Remove an entry owned by `requester`.
    async fn delete_entry(&self, requester: &User, id: &EntryId) -> Result<(), Error>;
}
