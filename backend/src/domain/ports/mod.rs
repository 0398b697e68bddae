//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`EntryRepository`, `UserRepository`, `PasswordHasher`,
//! `TokenCodec`) are implemented by outbound adapters. Driving ports
//! (`EntriesQuery`, `EntriesCommand`, `IdentityVerifier`, `UserAccounts`,
//! `LoginService`) are implemented by domain services and called by the
//! HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod entries_command;
mod entries_query;
mod entry_repository;
mod identity_verifier;
mod login_service;
mod password_hasher;
mod token_codec;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use entries_command::MockEntriesCommand;
pub use entries_command::EntriesCommand;
#[cfg(test)]
pub use entries_query::MockEntriesQuery;
pub use entries_query::EntriesQuery;
#[cfg(test)]
pub use entry_repository::MockEntryRepository;
pub use entry_repository::{EntryPersistenceError, EntryRepository};
pub use identity_verifier::IdentityVerifier;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{INVALID_LOGIN_MESSAGE, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{DUPLICATE_USERNAME_MESSAGE, UserPersistenceError, UserRepository};
