//! PostgreSQL-backed `EntryRepository` implementation using Diesel ORM.
//!
//! Owner expansion is an inner join on `users`; entries are read back in
//! `seq` order, which is insertion order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EntryPersistenceError, EntryRepository};
use crate::domain::{
    DisplayName, Entry, EntryContent, EntryId, EntryOwner, UserId, UserSummary, Username,
};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{EntryRow, NewEntryRow, OwnerRow};
use super::pool::{DbPool, PoolError};
use super::schema::{entries, users};

/// Diesel-backed implementation of the `EntryRepository` port.
#[derive(Clone)]
pub struct DieselEntryRepository {
    pool: DbPool,
}

impl DieselEntryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EntryPersistenceError {
    EntryPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> EntryPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => EntryPersistenceError::connection(message),
        DieselFailure::Rejected(message) => EntryPersistenceError::rejected(message),
        DieselFailure::UniqueViolation => EntryPersistenceError::query("duplicate entry id"),
        DieselFailure::Query(message) => EntryPersistenceError::query(message),
    }
}

fn row_to_entry(row: EntryRow) -> Entry {
    Entry::new(
        EntryId::from_uuid(row.id),
        EntryContent {
            title: row.title,
            author: row.author,
            url: row.url,
        },
        row.likes,
        EntryOwner::Reference(UserId::from_uuid(row.user_id)),
    )
}

fn joined_to_entry((row, owner): (EntryRow, OwnerRow)) -> Result<Entry, EntryPersistenceError> {
    let invalid = |err: crate::domain::UserValidationError| {
        EntryPersistenceError::query(format!("stored owner {} is invalid: {err}", owner.id))
    };
    let summary = UserSummary {
        id: UserId::from_uuid(owner.id),
        username: Username::new(&owner.username).map_err(invalid)?,
        name: DisplayName::new(owner.name.clone()).map_err(invalid)?,
    };
    Ok(row_to_entry(row).with_owner_summary(summary))
}

#[async_trait]
impl EntryRepository for DieselEntryRepository {
    async fn list_with_owners(&self) -> Result<Vec<Entry>, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(EntryRow, OwnerRow)> = entries::table
            .inner_join(users::table)
            .order(entries::seq.asc())
            .select((EntryRow::as_select(), OwnerRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(joined_to_entry).collect()
    }

    async fn find_with_owner(&self, id: &EntryId) -> Result<Option<Entry>, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(EntryRow, OwnerRow)> = entries::table
            .inner_join(users::table)
            .filter(entries::id.eq(id.as_uuid()))
            .select((EntryRow::as_select(), OwnerRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(joined_to_entry).transpose()
    }

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<Entry>, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<EntryRow> = entries::table
            .filter(entries::id.eq(id.as_uuid()))
            .select(EntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_entry))
    }

    async fn insert(&self, entry: &Entry) -> Result<(), EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewEntryRow {
            id: *entry.id().as_uuid(),
            title: entry.title(),
            author: entry.author(),
            url: entry.url(),
            likes: entry.likes(),
            user_id: *entry.owner().id().as_uuid(),
        };
        diesel::insert_into(entries::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_likes(
        &self,
        id: &EntryId,
        likes: i64,
    ) -> Result<Option<Entry>, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<EntryRow> = diesel::update(entries::table)
            .filter(entries::id.eq(id.as_uuid()))
            .set(entries::likes.eq(likes))
            .returning(EntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_entry))
    }

    async fn delete(&self, id: &EntryId) -> Result<bool, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(entries::table)
            .filter(entries::id.eq(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
