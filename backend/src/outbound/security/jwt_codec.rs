//! HS256 JSON Web Token implementation of the token codec port.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::IdentityClaims;
use crate::domain::ports::{TokenCodec, TokenCodecError};

/// Signs and verifies tokens with a shared HMAC secret.
///
/// The secret is supplied once at construction; nothing reads it from the
/// environment afterwards.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Build a codec around `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, claims: &IdentityClaims) -> Result<String, TokenCodecError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|err| TokenCodecError::encode(err.to_string()))
    }

    fn decode(&self, token: &str) -> Result<IdentityClaims, TokenCodecError> {
        decode::<IdentityClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| TokenCodecError::rejected(err.to_string()))
    }
}
