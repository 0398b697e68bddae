//! Driving port for account registration and listing.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Account management use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create an account from a validated registration.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Every account in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
