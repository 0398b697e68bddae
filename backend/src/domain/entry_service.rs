//! Entry catalogue service implementing the entry query and command ports.
//!
//! Creation writes the entry and then appends its id to the owner's list.
//! The two writes are not atomic; if the second one fails the entry keeps
//! its owner reference, which is what ownership checks read, and only the
//! owner's secondary list lags behind.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::ports::{EntriesCommand, EntriesQuery, EntryRepository, UserRepository};
use crate::domain::service_support::map_entry_persistence_error;
use crate::domain::{
    Entry, EntryDraft, EntryId, EntryOwner, Error, OWNERSHIP_DENIED_MESSAGE, OwnershipDecision,
    User, authorize, normalize_likes, validate_entry,
};

/// Entry service implementing the driving ports.
#[derive(Clone)]
pub struct EntryService<E, U> {
    entries: Arc<E>,
    users: Arc<U>,
}

impl<E, U> EntryService<E, U> {
    /// Create a new service over the entry and user stores.
    pub fn new(entries: Arc<E>, users: Arc<U>) -> Self {
        Self { entries, users }
    }
}

fn entry_not_found(id: &EntryId) -> Error {
    Error::not_found(format!("entry {id} not found"))
}

impl<E, U> EntryService<E, U>
where
    E: EntryRepository,
    U: UserRepository,
{
    async fn record_ownership(&self, owner: &User, entry: &Entry) {
        match self.users.append_entry(owner.id(), entry.id()).await {
            Ok(true) => {}
            Ok(false) => warn!(
                user_id = %owner.id(),
                entry_id = %entry.id(),
                "owner vanished before its entry list was updated"
            ),
            Err(err) => warn!(
                user_id = %owner.id(),
                entry_id = %entry.id(),
                error = %err,
                "entry stored but owner entry list not updated"
            ),
        }
    }
}

#[async_trait]
impl<E, U> EntriesQuery for EntryService<E, U>
where
    E: EntryRepository,
    U: UserRepository,
{
    async fn list_entries(&self) -> Result<Vec<Entry>, Error> {
        self.entries
            .list_with_owners()
            .await
            .map_err(map_entry_persistence_error)
    }

    async fn get_entry(&self, id: &EntryId) -> Result<Entry, Error> {
        self.entries
            .find_with_owner(id)
            .await
            .map_err(map_entry_persistence_error)?
            .ok_or_else(|| entry_not_found(id))
    }
}

#[async_trait]
impl<E, U> EntriesCommand for EntryService<E, U>
where
    E: EntryRepository,
    U: UserRepository,
{
    async fn create_entry(&self, owner: &User, draft: EntryDraft) -> Result<Entry, Error> {
        let (content, likes) = validate_entry(draft)?.into_parts();
        let entry = Entry::new(
            EntryId::random(),
            content,
            likes,
            EntryOwner::Reference(*owner.id()),
        );

        self.entries
            .insert(&entry)
            .await
            .map_err(map_entry_persistence_error)?;
        self.record_ownership(owner, &entry).await;

        info!(entry_id = %entry.id(), user_id = %owner.id(), "entry created");
        Ok(entry.with_owner_summary(owner.summary()))
    }

    async fn update_likes(&self, id: &EntryId, likes: Option<Value>) -> Result<Entry, Error> {
        let likes = normalize_likes(likes.as_ref())?;
        self.entries
            .update_likes(id, likes)
            .await
            .map_err(map_entry_persistence_error)?
            .ok_or_else(|| entry_not_found(id))
    }

    async fn delete_entry(&self, requester: &User, id: &EntryId) -> Result<(), Error> {
        let entry = self
            .entries
            .find_by_id(id)
            .await
            .map_err(map_entry_persistence_error)?
            .ok_or_else(|| entry_not_found(id))?;

        if authorize(&entry, requester) == OwnershipDecision::Denied {
            warn!(
                entry_id = %id,
                owner_id = %entry.owner().id(),
                requester_id = %requester.id(),
                "delete refused for non-owner"
            );
            return Err(Error::unauthorized(OWNERSHIP_DENIED_MESSAGE));
        }

        let removed = self
            .entries
            .delete(id)
            .await
            .map_err(map_entry_persistence_error)?;
        if !removed {
            return Err(entry_not_found(id));
        }
        info!(entry_id = %id, user_id = %requester.id(), "entry deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "entry_service_tests.rs"]
mod tests;
