//! Driving port resolving a bearer credential to a user.
//!
//! Inbound adapters call this once per request before any handler that
//! needs an identity. Credential failures surface as
//! [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized)
//! errors whose message names the [`CredentialError`](crate::domain::CredentialError).

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Resolve the caller behind an `Authorization` header value.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `authorization` and load the user it names.
    async fn verify(&self, authorization: Option<&str>) -> Result<User, Error>;
}
