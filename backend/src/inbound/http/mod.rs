//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod entries;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;

use actix_web::{HttpRequest, error::JsonPayloadError, web};

use crate::domain::Error;

pub use error::ApiResult;

/// Register every `/api` route on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bloglist::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(entries::list_entries)
        .service(entries::get_entry)
        .service(entries::create_entry)
        .service(entries::update_entry)
        .service(entries::delete_entry)
        .service(users::register)
        .service(users::list_users)
        .service(users::login);
}

/// JSON extractor configuration rendering body errors as `{"error": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "rejected request body");
    Error::invalid_request(err.to_string()).into()
}
