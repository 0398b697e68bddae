//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EntryId, User, UserId};

use super::define_port_error;

/// Stable message reported for a username collision.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "expected `username` to be unique";

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the username.
        DuplicateUsername { username: String } => "expected `username` to be unique",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, rejecting duplicate usernames.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;

    /// Every user in insertion order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Append `entry` to the user's owned list.
    ///
    /// Returns `false` when the user does not exist.
    async fn append_entry(
        &self,
        id: &UserId,
        entry: &EntryId,
    ) -> Result<bool, UserPersistenceError>;
}
