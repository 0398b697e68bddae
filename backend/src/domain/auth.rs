//! Credentials, token claims and the failures of bearer verification.
//!
//! Inbound adapters hand raw strings to the constructors here so that
//! services only ever see validated values.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::{DisplayName, Error, UserId, UserValidationError, Username};

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN: usize = 3;

/// Authorisation scheme accepted by [`bearer_token`].
const BEARER_PREFIX: &str = "Bearer ";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Username and password presented at login.
///
/// The username is trimmed; the password keeps caller whitespace and is
/// wiped from memory on drop.
///
/// # Examples
/// ```
/// use bloglist::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" root ", "sekret").unwrap();
/// assert_eq!(creds.username(), "root");
/// assert_eq!(creds.password(), "sekret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plain password to verify against the stored hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Registration failures detected before any storage call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Username or display name rejected.
    #[error(transparent)]
    User(#[from] UserValidationError),
    /// Password shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    name: DisplayName,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw sign-up fields.
    ///
    /// Checks run in field order so the first offending field is reported.
    pub fn try_from_parts(
        username: &str,
        name: &str,
        password: &str,
    ) -> Result<Self, RegistrationError> {
        let username = Username::new(username)?;
        let name = DisplayName::new(name)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            username,
            name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Plain password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Claims carried by an issued bearer token.
///
/// `iat` and `exp` are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Identifier of the authenticated user.
    pub id: UserId,
    /// Username at issue time.
    pub username: String,
    /// Issued at.
    pub iat: i64,
    /// Expiry.
    pub exp: i64,
}

/// Successful login result returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    /// Signed bearer token.
    pub token: String,
    /// Username the token was issued to.
    pub username: Username,
    /// Display name of that user.
    pub name: DisplayName,
}

/// Reasons a bearer credential is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// No `Authorization: Bearer` header was supplied.
    #[error("token missing")]
    MissingCredential,
    /// The token failed signature, structure or expiry checks.
    #[error("token invalid")]
    InvalidCredential,
    /// The token was valid but its user no longer resolves.
    #[error("unknown user")]
    UnknownIdentity,
}

impl From<CredentialError> for Error {
    fn from(value: CredentialError) -> Self {
        Self::unauthorized(value.to_string())
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Absent values, other schemes and an empty token all count as a missing
/// credential.
///
/// # Examples
/// ```
/// use bloglist::domain::{bearer_token, CredentialError};
///
/// assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
/// assert_eq!(bearer_token(Some("Basic Zm9v")), Err(CredentialError::MissingCredential));
/// ```
pub fn bearer_token(header: Option<&str>) -> Result<&str, CredentialError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(CredentialError::MissingCredential)
}
