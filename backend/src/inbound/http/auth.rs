//! Identity attachment for HTTP handlers.
//!
//! Handlers that require a caller take an [`Authenticated`] argument. The
//! extractor reads the `Authorization` header, asks the configured
//! [`IdentityVerifier`](crate::domain::ports::IdentityVerifier) to resolve
//! it, and rejects the request with `401` before the handler body runs. The
//! resolved user lives only as long as the request.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{CredentialError, Error, User};
use crate::inbound::http::state::HttpState;

/// Caller identity resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated(User);

impl Authenticated {
    /// The resolved user record.
    pub fn user(&self) -> &User {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map(str::to_owned));
        Box::pin(async move {
            let Some(state) = state else {
                return Err(Error::internal("http state is not configured"));
            };
            // A header that is not visible ASCII cannot carry a bearer token.
            let header = match header {
                Some(Ok(raw)) => Some(raw),
                Some(Err(_)) => return Err(CredentialError::InvalidCredential.into()),
                None => None,
            };
            state
                .identity
                .verify(header.as_deref())
                .await
                .map(Authenticated)
        })
    }
}
