//! In-process store backing both repository ports.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Rows are kept in vectors so reads return insertion order; lookups are
//! linear, which is fine at the sizes this store is meant for.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    EntryPersistenceError, EntryRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Entry, EntryId, User, UserId};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    entries: Vec<Entry>,
}

impl Tables {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    fn expand(&self, entry: &Entry) -> Entry {
        match self.user(entry.owner().id()) {
            Some(owner) => entry.clone().with_owner_summary(owner.summary()),
            None => entry.clone(),
        }
    }
}

/// Shared in-memory users and entries.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn entry_count(&self) -> usize {
        self.tables.read().await.entries.len()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl EntryRepository for MemoryStore {
    async fn list_with_owners(&self) -> Result<Vec<Entry>, EntryPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.entries.iter().map(|entry| tables.expand(entry)).collect())
    }

    async fn find_with_owner(&self, id: &EntryId) -> Result<Option<Entry>, EntryPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .entries
            .iter()
            .find(|entry| entry.id() == id)
            .map(|entry| tables.expand(entry)))
    }

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<Entry>, EntryPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.entries.iter().find(|entry| entry.id() == id).cloned())
    }

    async fn insert(&self, entry: &Entry) -> Result<(), EntryPersistenceError> {
        let mut tables = self.tables.write().await;
        if tables.user(entry.owner().id()).is_none() {
            return Err(EntryPersistenceError::rejected(format!(
                "owner {} does not exist",
                entry.owner().id()
            )));
        }
        if tables.entries.iter().any(|stored| stored.id() == entry.id()) {
            return Err(EntryPersistenceError::query(format!(
                "entry {} already exists",
                entry.id()
            )));
        }
        tables.entries.push(entry.clone().with_owner_reference());
        Ok(())
    }

    async fn update_likes(
        &self,
        id: &EntryId,
        likes: i64,
    ) -> Result<Option<Entry>, EntryPersistenceError> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.entries.iter_mut().find(|entry| entry.id() == id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_likes(likes);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &EntryId) -> Result<bool, EntryPersistenceError> {
        let mut tables = self.tables.write().await;
        let before = tables.entries.len();
        tables.entries.retain(|entry| entry.id() != id);
        Ok(tables.entries.len() != before)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|stored| stored.username() == user.username())
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.tables.read().await.user(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|user| user.username().as_ref() == username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn append_entry(
        &self,
        id: &UserId,
        entry: &EntryId,
    ) -> Result<bool, UserPersistenceError> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.iter_mut().find(|user| user.id() == id) else {
            return Ok(false);
        };
        user.push_entry(*entry);
        Ok(true)
    }
}
