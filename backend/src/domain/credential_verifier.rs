//! Bearer credential verification.
//!
//! Turns an `Authorization` header value into the [`User`] it names: parse
//! the bearer scheme, check the token signature and expiry, then load the
//! account. The service only reads.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{IdentityVerifier, TokenCodec, UserRepository};
use crate::domain::service_support::map_user_persistence_error;
use crate::domain::{CredentialError, Error, User, bearer_token};

/// Resolves bearer tokens to users.
#[derive(Clone)]
pub struct CredentialVerifier<U> {
    users: Arc<U>,
    tokens: Arc<dyn TokenCodec>,
}

impl<U> CredentialVerifier<U> {
    /// Build a verifier over a user store and a token codec.
    ///
    /// The codec carries the process-wide signing secret.
    pub fn new(users: Arc<U>, tokens: Arc<dyn TokenCodec>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl<U> IdentityVerifier for CredentialVerifier<U>
where
    U: UserRepository,
{
    async fn verify(&self, authorization: Option<&str>) -> Result<User, Error> {
        let token = bearer_token(authorization)?;
        let claims = self.tokens.decode(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            CredentialError::InvalidCredential
        })?;
        self.users
            .find_by_id(&claims.id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                debug!(user_id = %claims.id, "token names an unknown user");
                CredentialError::UnknownIdentity.into()
            })
    }
}
