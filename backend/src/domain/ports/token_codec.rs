//! Driven port for signing and checking bearer tokens.

use crate::domain::IdentityClaims;

use super::define_port_error;

define_port_error! {
    /// Token encoding and decoding failures.
    pub enum TokenCodecError {
        /// Signing failed.
        Encode { message: String } => "token encoding failed: {message}",
        /// Signature, structure or expiry check failed.
        Rejected { message: String } => "token rejected: {message}",
    }
}

/// Signs claims into a compact token and verifies tokens back into claims.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign `claims`.
    fn issue(&self, claims: &IdentityClaims) -> Result<String, TokenCodecError>;

    /// Verify `token` and return its claims.
    fn decode(&self, token: &str) -> Result<IdentityClaims, TokenCodecError>;
}
