//! Driven port for one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised while producing a hash.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes and verifies passwords.
///
/// Verification never errors: a malformed stored hash simply fails to
/// match. Both operations are CPU-bound and callers run them off the async
/// executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Whether `password` matches `hash`.
    fn verify(&self, password: &str, hash: &PasswordHash) -> bool;

    /// Spend the cost of one verification when no account matched.
    ///
    /// Keeps unknown-username logins as slow as wrong-password ones.
    fn verify_unknown(&self, password: &str);
}
