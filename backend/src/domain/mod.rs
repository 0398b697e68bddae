//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services that implement the driving ports.
//! Keep types immutable where possible and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure and its category.
//! - User, Entry: the two aggregates; Entry references its owner through
//!   `EntryOwner`.
//! - validate_entry / normalize_likes: pure payload checks.
//! - authorize: ownership decision for entry mutation.
//! - CredentialVerifier, EntryService, UserAccountService: port
//!   implementations wired by the server.

pub mod auth;
pub mod credential_verifier;
pub mod entry;
pub mod entry_service;
pub mod entry_validation;
pub mod error;
pub mod ownership;
pub mod ports;
mod service_support;
pub mod stats;
pub mod trace_id;
pub mod user;
pub mod user_accounts;

pub use self::auth::{
    CredentialError, IdentityClaims, IssuedToken, LoginCredentials, LoginValidationError,
    PASSWORD_MIN, Registration, RegistrationError, bearer_token,
};
pub use self::credential_verifier::CredentialVerifier;
pub use self::entry::{Entry, EntryContent, EntryId, EntryIdError, EntryOwner};
pub use self::entry_service::EntryService;
pub use self::entry_validation::{
    EntryDraft, EntryValidationError, ValidEntry, normalize_likes, validate_entry,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ownership::{OWNERSHIP_DENIED_MESSAGE, OwnershipDecision, authorize};
pub use self::stats::{FavoriteEntry, TopAuthor, favorite_entry, most_entries, total_likes};
pub use self::trace_id::TraceId;
pub use self::user::{
    DISPLAY_NAME_MIN, DisplayName, PasswordHash, USERNAME_MIN, User, UserId, UserSummary,
    UserValidationError, Username,
};
pub use self::user_accounts::{DEFAULT_TOKEN_TTL, UserAccountService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bloglist::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("token missing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
