//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    IdentityVerifier, PasswordHashError, PasswordHasher, TokenCodec, UserRepository,
};
use crate::domain::{
    CredentialError, CredentialVerifier, DisplayName, EntryService, Error, IdentityClaims,
    PasswordHash, User, UserAccountService, UserId, Username, bearer_token,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::JwtTokenCodec;

const TEST_SECRET: &[u8] = b"handler-test-secret-0123456789abcdef";

/// Build a user with a fixed display name and a plain test hash.
pub fn fixture_user(username: &str) -> User {
    User::new(
        UserId::random(),
        Username::new(username).expect("fixture username"),
        DisplayName::new("Fixture Person").expect("fixture name"),
        PasswordHash::new(format!("plain:{username}")).expect("fixture hash"),
    )
}

/// Identity verifier accepting exactly one bearer token.
#[derive(Clone)]
pub struct StubIdentity {
    token: String,
    user: User,
}

impl StubIdentity {
    pub fn accepting(token: &str, user: User) -> Self {
        Self {
            token: token.to_owned(),
            user,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}

#[async_trait]
impl IdentityVerifier for StubIdentity {
    async fn verify(&self, authorization: Option<&str>) -> Result<User, Error> {
        let token = bearer_token(authorization)?;
        if token == self.token {
            Ok(self.user.clone())
        } else {
            Err(CredentialError::InvalidCredential.into())
        }
    }
}

/// Reversible hasher so handler tests skip the Argon2 cost.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        PasswordHash::new(format!("plain:{password}"))
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        hash.expose().strip_prefix("plain:") == Some(password)
    }

    fn verify_unknown(&self, _password: &str) {}
}

/// Handler state wired to an in-memory store.
pub struct MemoryHarness {
    pub state: HttpState,
    pub store: Arc<MemoryStore>,
    pub tokens: Arc<JwtTokenCodec>,
}

impl MemoryHarness {
    /// Register `username` directly in the store with password equal to the
    /// username.
    pub async fn seed_user(&self, username: &str) -> User {
        let user = fixture_user(username);
        UserRepository::insert(self.store.as_ref(), &user)
            .await
            .expect("seed user");
        user
    }

    /// Sign a token for `user` valid for one hour.
    pub fn token_for(&self, user: &User) -> String {
        let iat = Utc::now().timestamp();
        self.tokens
            .issue(&IdentityClaims {
                id: *user.id(),
                username: user.username().to_string(),
                iat,
                exp: iat + 3600,
            })
            .expect("sign token")
    }
}

/// Assemble a complete [`HttpState`] over a fresh [`MemoryStore`].
pub fn memory_harness() -> MemoryHarness {
    let store = Arc::new(MemoryStore::new());
    let tokens = Arc::new(JwtTokenCodec::new(TEST_SECRET));
    let accounts = Arc::new(UserAccountService::new(
        store.clone(),
        Arc::new(PlainHasher),
        tokens.clone(),
        Arc::new(mockable::DefaultClock),
    ));
    let entries = Arc::new(EntryService::new(store.clone(), store.clone()));
    let state = HttpState::new(HttpStatePorts {
        entries: entries.clone(),
        entries_command: entries,
        identity: Arc::new(CredentialVerifier::new(store.clone(), tokens.clone())),
        accounts: accounts.clone(),
        login: accounts,
    });
    MemoryHarness {
        state,
        store,
        tokens,
    }
}

/// Memory-backed state whose identity port is replaced by `identity`.
pub fn state_with_identity(identity: impl IdentityVerifier + 'static) -> HttpState {
    let mut state = memory_harness().state;
    state.identity = Arc::new(identity);
    state
}
