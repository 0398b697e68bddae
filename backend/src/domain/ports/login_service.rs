//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without importing the hashing or signing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials};

/// Message shared by every credential mismatch.
pub const INVALID_LOGIN_MESSAGE: &str = "invalid username or password";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a signed token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error>;
}
