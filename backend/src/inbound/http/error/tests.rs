//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("connection string postgres://secret").with_trace_id(expected_trace_id)
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("title and url are required").with_trace_id(expected_trace_id)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("token missing"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> ErrorBody {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error body deserialises")
}

#[rstest]
#[actix_web::test]
async fn error_responses_include_trace_id_and_message(
    #[from(internal_error_case)] internal_error: Error,
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.error, "Internal server error");

    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.error, "title and url are required");
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let payload = assert_error_response(
        Error::unauthorized("token invalid"),
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    assert_eq!(payload.error, "token invalid");
}

#[rstest]
#[actix_web::test]
async fn not_found_has_empty_body() {
    let response = ResponseError::error_response(&Error::not_found("entry missing"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    assert!(bytes.is_empty());
}

#[given("an ownership refusal")]
fn an_ownership_refusal() -> Error {
    Error::unauthorized("unauthorized: only the creator can delete this entry")
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_http_status(error: Error) -> StatusCode {
    super::status_for(error.code())
}

#[then("the status is 401 Unauthorized")]
fn the_status_is_401_unauthorized(status: StatusCode) {
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
fn ownership_refusal_maps_to_unauthorized() {
    let error = an_ownership_refusal();
    let status = the_adapter_maps_the_code_to_http_status(error);
    the_status_is_401_unauthorized(status);
}

#[given("an internal error carrying a secret")]
fn an_internal_error_carrying_a_secret() -> Error {
    Error::internal("password=hunter2").with_trace_id(TRACE_ID)
}

#[when("the adapter renders the client message")]
fn the_adapter_renders_the_client_message(error: Error) -> String {
    super::outward_message(&error).to_owned()
}

#[then("clients see the generic internal error message")]
fn clients_see_the_generic_internal_error_message(message: String) {
    assert_eq!(message, "Internal server error");
}

#[rstest]
fn internal_messages_are_redacted() {
    let error = an_internal_error_carrying_a_secret();
    let message = the_adapter_renders_the_client_message(error);
    clients_see_the_generic_internal_error_message(message);
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
}
