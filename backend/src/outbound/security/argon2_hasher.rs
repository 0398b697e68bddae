//! Argon2id implementation of the password hashing port.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::rngs::OsRng;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Well-formed hash at default cost that no password is expected to match.
const UNKNOWN_ACCOUNT_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$hbTcjcppMCSmut/MdhgSTg$WshdZ8dwNyaRgSUfD2KcEl/YQ0swS/uiNByoj56Jv3g";

/// Hashes passwords with Argon2id default parameters into PHC strings.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with the library default cost parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .to_string();
        PasswordHash::new(encoded).map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        PhcHash::new(hash.expose()).is_ok_and(|parsed| {
            self.argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }

    fn verify_unknown(&self, password: &str) {
        if let Ok(parsed) = PhcHash::new(UNKNOWN_ACCOUNT_HASH) {
            let outcome = self.argon2.verify_password(password.as_bytes(), &parsed);
            std::hint::black_box(outcome.is_ok());
        }
    }
}
