//! Driven port for entry persistence.
//!
//! Repositories expose two read shapes: plain reads return entries whose
//! owner is an [`EntryOwner::Reference`], and the `*_with_owner` reads join
//! the owning user and return [`EntryOwner::Summary`].
//!
//! [`EntryOwner::Reference`]: crate::domain::EntryOwner::Reference
//! [`EntryOwner::Summary`]: crate::domain::EntryOwner::Summary

use async_trait::async_trait;

use crate::domain::{Entry, EntryId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by entry repository adapters.
    pub enum EntryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "entry repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "entry repository query failed: {message}",
        /// The store refused a value; the message is safe to show clients.
        Rejected { message: String } => "{message}",
    }
}

/// Storage contract for blog entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Every entry in insertion order with owners expanded.
    async fn list_with_owners(&self) -> Result<Vec<Entry>, EntryPersistenceError>;

    /// One entry with its owner expanded.
    async fn find_with_owner(&self, id: &EntryId) -> Result<Option<Entry>, EntryPersistenceError>;

    /// One entry with a plain owner reference.
    async fn find_by_id(&self, id: &EntryId) -> Result<Option<Entry>, EntryPersistenceError>;

    /// Persist a new entry. The owner must already exist.
    async fn insert(&self, entry: &Entry) -> Result<(), EntryPersistenceError>;

    /// Overwrite the like counter, returning the updated entry if it exists.
    async fn update_likes(
        &self,
        id: &EntryId,
        likes: i64,
    ) -> Result<Option<Entry>, EntryPersistenceError>;

    /// Remove an entry. Returns `false` when nothing matched.
    async fn delete(&self, id: &EntryId) -> Result<bool, EntryPersistenceError>;
}
