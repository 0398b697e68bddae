//! Mapping of driven port failures onto domain errors.

use crate::domain::Error;
use crate::domain::ports::{
    DUPLICATE_USERNAME_MESSAGE, EntryPersistenceError, PasswordHashError, TokenCodecError,
    UserPersistenceError,
};

pub(crate) fn map_entry_persistence_error(error: EntryPersistenceError) -> Error {
    match error {
        EntryPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("entry repository unavailable: {message}"))
        }
        EntryPersistenceError::Query { message } => {
            Error::internal(format!("entry repository error: {message}"))
        }
        EntryPersistenceError::Rejected { message } => Error::invalid_request(message),
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::invalid_request(DUPLICATE_USERNAME_MESSAGE)
        }
    }
}

pub(crate) fn map_password_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_token_codec_error(error: TokenCodecError) -> Error {
    Error::internal(error.to_string())
}

/// Run CPU-bound work on the blocking pool so request tasks keep moving.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| Error::internal(format!("blocking task failed: {err}")))
}
