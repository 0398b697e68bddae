//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    EntriesCommand, EntriesQuery, IdentityVerifier, LoginService, UserAccounts,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub entries: Arc<dyn EntriesQuery>,
    pub entries_command: Arc<dyn EntriesCommand>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub accounts: Arc<dyn UserAccounts>,
    pub login: Arc<dyn LoginService>,
}

/// Parameter object bundling the port implementations behind [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub entries: Arc<dyn EntriesQuery>,
    pub entries_command: Arc<dyn EntriesCommand>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub accounts: Arc<dyn UserAccounts>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use bloglist::domain::{CredentialVerifier, EntryService, UserAccountService};
    /// use bloglist::inbound::http::state::{HttpState, HttpStatePorts};
    /// use bloglist::outbound::memory::MemoryStore;
    /// use bloglist::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let codec = Arc::new(JwtTokenCodec::new(b"0123456789abcdef0123456789abcdef"));
    /// let accounts = Arc::new(UserAccountService::new(
    ///     store.clone(),
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     codec.clone(),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let entries = Arc::new(EntryService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     entries: entries.clone(),
    ///     entries_command: entries,
    ///     identity: Arc::new(CredentialVerifier::new(store, codec)),
    ///     accounts: accounts.clone(),
    ///     login: accounts,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            entries,
            entries_command,
            identity,
            accounts,
            login,
        } = ports;
        Self {
            entries,
            entries_command,
            identity,
            accounts,
            login,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
