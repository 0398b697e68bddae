//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, EntryId, PasswordHash, User, UserId, Username};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const APPEND_ENTRY_SQL: &str =
    "UPDATE users SET entry_ids = array_append(entry_ids, $1) WHERE id = $2";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, username: &str) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation => UserPersistenceError::duplicate_username(username),
        DieselFailure::Rejected(message) | DieselFailure::Query(message) => {
            UserPersistenceError::query(message)
        }
    }
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(error, "")
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let invalid = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    let username = Username::new(&row.username).map_err(invalid)?;
    let name = DisplayName::new(row.name.clone()).map_err(invalid)?;
    let hash = PasswordHash::new(row.password_hash.clone()).map_err(invalid)?;
    let entries = row.entry_ids.iter().copied().map(EntryId::from_uuid).collect();
    Ok(User::new(UserId::from_uuid(row.id), username, name, hash).with_entries(entries))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            name: user.name().as_ref(),
            password_hash: user.password_hash().expose(),
            entry_ids: user.entries().iter().map(|id| *id.as_uuid()).collect(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, user.username().as_ref()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(row_to_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::seq.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn append_entry(
        &self,
        id: &UserId,
        entry: &EntryId,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::sql_query(APPEND_ENTRY_SQL)
            .bind::<diesel::sql_types::Uuid, _>(*entry.as_uuid())
            .bind::<diesel::sql_types::Uuid, _>(*id.as_uuid())
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;
        Ok(updated > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(username: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            name: "Superuser".to_owned(),
            password_hash: "$argon2id$stored".to_owned(),
            entry_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn row_converts_with_entry_order() {
        let source = row("root");
        let expected: Vec<_> = source.entry_ids.iter().copied().map(EntryId::from_uuid).collect();
        let user = row_to_user(source).expect("valid row");
        assert_eq!(user.username().as_ref(), "root");
        assert_eq!(user.entries(), expected.as_slice());
    }

    #[rstest]
    fn invalid_row_is_a_query_error() {
        let err = row_to_user(row("ab")).expect_err("short username");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
