//! HTTP harness wiring the public adapters over an in-memory store.
//!
//! The application uses the real Argon2 hasher and HS256 codec, so tokens
//! issued by `/api/login` are accepted by the bearer extractor exactly as in
//! production.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use bloglist::Trace;
use bloglist::domain::{CredentialVerifier, EntryService, UserAccountService};
use bloglist::inbound::http::state::{HttpState, HttpStatePorts};
use bloglist::inbound::http::{configure_api, json_config};
use bloglist::outbound::memory::MemoryStore;
use bloglist::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};
use mockable::DefaultClock;
use serde_json::{Value, json};

const TEST_SECRET: &[u8] = b"integration-secret-0123456789abcdef";

/// Shared store plus the state built over it.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub state: HttpState,
}

/// Build a fresh harness with empty tables.
pub fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let codec = Arc::new(JwtTokenCodec::new(TEST_SECRET));
    let accounts = Arc::new(UserAccountService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        codec.clone(),
        Arc::new(DefaultClock),
    ));
    let entries = Arc::new(EntryService::new(store.clone(), store.clone()));
    let state = HttpState::new(HttpStatePorts {
        entries: entries.clone(),
        entries_command: entries,
        identity: Arc::new(CredentialVerifier::new(store.clone(), codec)),
        accounts: accounts.clone(),
        login: accounts,
    });
    Harness { store, state }
}

/// Application mounted the way the server mounts it.
pub fn app(
    harness: &Harness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(harness.state.clone()))
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
}

/// Register `username` with password `salainen` and return a bearer token.
pub async fn register_and_login(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> String {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({
                "username": username,
                "name": format!("{username} person"),
                "password": "salainen",
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "registration of {username} failed");

    let issued: Value = actix_test::call_and_read_body_json(
        app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"username": username, "password": "salainen"}))
            .to_request(),
    )
    .await;
    issued["token"]
        .as_str()
        .expect("login should issue a token")
        .to_owned()
}

/// Create an entry as the holder of `token`, returning the response body.
pub async fn create_entry(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    token: &str,
    body: Value,
) -> (u16, Value) {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/entries")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(body)
            .to_request(),
    )
    .await;
    let status = res.status().as_u16();
    let body: Value = actix_test::read_body_json(res).await;
    (status, body)
}

/// Fetch `/api/entries` as a JSON array.
pub async fn list_entries(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Vec<Value> {
    let listed: Value = actix_test::call_and_read_body_json(
        app,
        actix_test::TestRequest::get().uri("/api/entries").to_request(),
    )
    .await;
    listed.as_array().cloned().expect("entries array")
}
