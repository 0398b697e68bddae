//! Account registration, listing and login.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    INVALID_LOGIN_MESSAGE, LoginService, PasswordHasher, TokenCodec, UserAccounts,
    UserRepository,
};
use crate::domain::service_support::{
    map_password_hash_error, map_token_codec_error, map_user_persistence_error, run_blocking,
};
use crate::domain::{
    Error, IdentityClaims, IssuedToken, LoginCredentials, Registration, User, UserId,
};

/// Default lifetime of issued tokens.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Account service implementing [`UserAccounts`] and [`LoginService`].
#[derive(Clone)]
pub struct UserAccountService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
}

impl<U> UserAccountService<U> {
    /// Create a service issuing tokens valid for [`DEFAULT_TOKEN_TTL`].
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    fn claims_for(&self, user: &User) -> IdentityClaims {
        let iat = self.clock.utc().timestamp();
        let ttl = i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX);
        IdentityClaims {
            id: *user.id(),
            username: user.username().to_string(),
            iat,
            exp: iat.saturating_add(ttl),
        }
    }
}

#[async_trait]
impl<U> UserAccounts for UserAccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(registration.password().to_owned());
        let hash = run_blocking(move || hasher.hash(&password))
            .await?
            .map_err(map_password_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.name().clone(),
            hash,
        );
        self.users
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_all()
            .await
            .map_err(map_user_persistence_error)
    }
}

#[async_trait]
impl<U> LoginService for UserAccountService<U>
where
    U: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let candidate = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?;
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(credentials.password().to_owned());
        let matched = run_blocking(move || match candidate {
            Some(user) if hasher.verify(&password, user.password_hash()) => Some(user),
            Some(_) => None,
            None => {
                hasher.verify_unknown(&password);
                None
            }
        })
        .await?;
        let Some(user) = matched else {
            debug!(username = credentials.username(), "login refused");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };

        let token = self
            .tokens
            .issue(&self.claims_for(&user))
            .map_err(map_token_codec_error)?;
        Ok(IssuedToken {
            token,
            username: user.username().clone(),
            name: user.name().clone(),
        })
    }
}
