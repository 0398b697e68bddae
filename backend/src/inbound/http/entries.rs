//! Entry catalogue handlers.
//!
//! ```text
//! GET    /api/entries
//! GET    /api/entries/{id}
//! POST   /api/entries        (bearer token)
//! PUT    /api/entries/{id}   {"likes": 8}
//! DELETE /api/entries/{id}   (bearer token, owner only)
//! ```
//!
//! Reads and like updates are open to anonymous callers; only creation and
//! deletion require an identity.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Entry, EntryDraft, EntryId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{EntrySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Message returned for path identifiers that are not UUIDs.
pub const MALFORMED_ID_MESSAGE: &str = "malformatted id";

/// Creation body for `POST /api/entries`.
///
/// Example JSON:
/// `{"title":"React patterns","author":"Michael Chan","url":"https://reactpatterns.com/","likes":7}`
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct EntryRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub likes: Option<Value>,
}

impl From<EntryRequest> for EntryDraft {
    fn from(value: EntryRequest) -> Self {
        Self {
            title: value.title,
            author: value.author,
            url: value.url,
            likes: value.likes,
        }
    }
}

/// Like update body for `PUT /api/entries/{id}`.
///
/// Only `likes` is read; any other field is ignored.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LikesRequest {
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub likes: Option<Value>,
}

/// Read a like update body. An empty body resets the count like `{}` does.
fn likes_from_body(body: &[u8]) -> Result<LikesRequest, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LikesRequest::default());
    }
    serde_json::from_slice(body).map_err(|err| Error::invalid_request(err.to_string()))
}

fn parse_entry_id(raw: &str) -> Result<EntryId, Error> {
    EntryId::new(raw).map_err(|_| Error::invalid_request(MALFORMED_ID_MESSAGE))
}

/// List every entry with its owner summary, in insertion order.
#[utoipa::path(
    get,
    path = "/api/entries",
    responses(
        (status = 200, description = "All entries", body = [EntrySchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "listEntries",
    security([])
)]
#[get("/entries")]
pub async fn list_entries(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Entry>>> {
    let entries = state.entries.list_entries().await?;
    Ok(web::Json(entries))
}

/// Fetch one entry with its owner summary.
#[utoipa::path(
    get,
    path = "/api/entries/{id}",
    params(("id" = String, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry", body = EntrySchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such entry")
    ),
    tags = ["entries"],
    operation_id = "getEntry",
    security([])
)]
#[get("/entries/{id}")]
pub async fn get_entry(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Entry>> {
    let id = parse_entry_id(&path)?;
    let entry = state.entries.get_entry(&id).await?;
    Ok(web::Json(entry))
}

/// Create an entry owned by the caller.
#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = EntryRequest,
    responses(
        (status = 201, description = "Entry created", body = EntrySchema),
        (status = 400, description = "title and url are required", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "createEntry"
)]
#[post("/entries")]
pub async fn create_entry(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<EntryRequest>,
) -> ApiResult<HttpResponse> {
    let entry = state
        .entries_command
        .create_entry(caller.user(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(entry))
}

/// Replace the like count of an entry.
///
/// The body is optional; a missing body sets the count to zero.
#[utoipa::path(
    put,
    path = "/api/entries/{id}",
    params(("id" = String, Path, description = "Entry identifier")),
    request_body(content = Option<LikesRequest>, description = "Omit to reset likes to zero"),
    responses(
        (status = 200, description = "Entry updated; owner is a plain id", body = EntrySchema),
        (status = 400, description = "Invalid identifier or likes", body = ErrorSchema),
        (status = 404, description = "No such entry")
    ),
    tags = ["entries"],
    operation_id = "updateEntryLikes",
    security([])
)]
#[put("/entries/{id}")]
pub async fn update_entry(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<Entry>> {
    let id = parse_entry_id(&path)?;
    let payload = likes_from_body(&body)?;
    let entry = state
        .entries_command
        .update_likes(&id, payload.likes)
        .await?;
    Ok(web::Json(entry))
}

/// Delete an entry. Only its owner may do so.
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(("id" = String, Path, description = "Entry identifier")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing token or caller is not the owner", body = ErrorSchema),
        (status = 404, description = "No such entry")
    ),
    tags = ["entries"],
    operation_id = "deleteEntry"
)]
#[delete("/entries/{id}")]
pub async fn delete_entry(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_entry_id(&path)?;
    state
        .entries_command
        .delete_entry(caller.user(), &id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "entries_tests.rs"]
mod tests;
