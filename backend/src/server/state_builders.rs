//! Builders wiring repository adapters into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use bloglist::domain::ports::{EntryRepository, PasswordHasher, TokenCodec, UserRepository};
use bloglist::domain::{CredentialVerifier, EntryService, UserAccountService};
use bloglist::inbound::http::state::{HttpState, HttpStatePorts};
use bloglist::outbound::memory::MemoryStore;
use bloglist::outbound::persistence::{DieselEntryRepository, DieselUserRepository};
use bloglist::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};

use super::ServerConfig;

/// Adapters shared by every service regardless of the storage backend.
#[derive(Clone)]
struct SharedAdapters {
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl SharedAdapters {
    fn from_config(config: &ServerConfig) -> Self {
        Self {
            hasher: Arc::new(Argon2PasswordHasher::new()),
            tokens: Arc::new(JwtTokenCodec::new(config.token_settings.secret())),
            clock: Arc::new(DefaultClock),
        }
    }
}

/// Build the service ports over one pair of repositories.
fn build_ports<E, U>(
    entries: Arc<E>,
    users: Arc<U>,
    shared: SharedAdapters,
    config: &ServerConfig,
) -> HttpStatePorts
where
    E: EntryRepository + 'static,
    U: UserRepository + 'static,
{
    let SharedAdapters {
        hasher,
        tokens,
        clock,
    } = shared;
    let entry_service = Arc::new(EntryService::new(entries, users.clone()));
    let accounts = Arc::new(
        UserAccountService::new(users.clone(), hasher, tokens.clone(), clock)
            .with_token_ttl(config.token_ttl),
    );
    HttpStatePorts {
        entries: entry_service.clone(),
        entries_command: entry_service,
        identity: Arc::new(CredentialVerifier::new(users, tokens)),
        accounts: accounts.clone(),
        login: accounts,
    }
}

/// Build the HTTP state, using the Diesel repositories when a pool is
/// configured and a fresh in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let shared = SharedAdapters::from_config(config);
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselEntryRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            shared,
            config,
        ),
        None => {
            let store = Arc::new(MemoryStore::new());
            build_ports(store.clone(), store, shared, config)
        }
    };
    web::Data::new(HttpState::new(ports))
}
