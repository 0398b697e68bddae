//! Token signing secret loading and validation.
//!
//! The HS256 secret is read once at startup through [`mockable::Env`] so the
//! rules can be tested without touching the process environment:
//!
//! - `TOKEN_SECRET` holds the secret inline;
//! - otherwise the file named by `TOKEN_SECRET_FILE` (default
//!   `/var/run/secrets/token_secret`) is read;
//! - when neither yields a secret, debug builds (or an explicit
//!   `TOKEN_ALLOW_EPHEMERAL=1`) fall back to random bytes that die with the
//!   process.

pub mod fingerprint;

use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
/// Shortest secret accepted by release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const SECRET_ENV: &str = "TOKEN_SECRET";
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate short or missing secrets with a warning.
    Debug,
    /// Release builds require a real secret of adequate length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bloglist::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Where the active secret came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SecretSource {
    /// Inline `TOKEN_SECRET` value.
    Inline,
    /// Contents of a secret file.
    File(PathBuf),
    /// Random bytes generated at startup.
    Ephemeral,
}

/// Validated token signing material.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    source: SecretSource,
}

impl TokenSettings {
    /// Raw secret bytes for the token codec.
    pub fn secret(&self) -> &[u8] {
        self.secret.as_slice()
    }

    /// Origin of the active secret.
    pub fn source(&self) -> &SecretSource {
        &self.source
    }

    /// Loggable fingerprint of the secret.
    pub fn fingerprint(&self) -> String {
        fingerprint::secret_fingerprint(self.secret())
    }
}

/// Errors raised while loading the token secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret is too short for release builds.
    #[error("token secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Load token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use bloglist::inbound::http::token_config::{
///     BuildMode, SecretSource, token_settings_from_env,
/// };
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "TOKEN_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.source(), &SecretSource::Inline);
/// assert_eq!(settings.secret().len(), 32);
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;

    if let Some(inline) = env.string(SECRET_ENV).filter(|value| !value.is_empty()) {
        let secret = Zeroizing::new(inline.into_bytes());
        check_length(&secret, mode)?;
        return Ok(TokenSettings {
            secret,
            source: SecretSource::Inline,
        });
    }

    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => {
            let secret = trim_trailing_whitespace(Zeroizing::new(bytes));
            check_length(&secret, mode)?;
            Ok(TokenSettings {
                secret,
                source: SecretSource::File(path),
            })
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token secret; tokens will not survive a restart"
            );
            Ok(ephemeral_settings())
        }
        Err(error) => Err(TokenConfigError::SecretRead {
            path,
            source: error,
        }),
    }
}

fn ephemeral_settings() -> TokenSettings {
    let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    OsRng.fill_bytes(secret.as_mut_slice());
    TokenSettings {
        secret,
        source: SecretSource::Ephemeral,
    }
}

fn trim_trailing_whitespace(mut secret: Zeroizing<Vec<u8>>) -> Zeroizing<Vec<u8>> {
    while secret.last().is_some_and(u8::is_ascii_whitespace) {
        secret.pop();
    }
    secret
}

fn check_length(secret: &[u8], mode: BuildMode) -> Result<(), TokenConfigError> {
    let length = secret.len();
    if length >= TOKEN_SECRET_MIN_LEN {
        return Ok(());
    }
    if mode.is_debug() {
        warn!(length, min_len = TOKEN_SECRET_MIN_LEN, "token secret is short");
        return Ok(());
    }
    Err(TokenConfigError::SecretTooShort {
        length,
        min_len: TOKEN_SECRET_MIN_LEN,
    })
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
