//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! domain types but live in the inbound adapter layer where framework
//! concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for the error envelope rendered from [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = ErrorBody)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "title and url are required")]
    error: String,
}

/// OpenAPI schema for [`crate::domain::UserSummary`].
#[derive(ToSchema)]
#[schema(as = UserSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OwnerSummarySchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "mluukkai")]
    username: String,
    #[schema(example = "Matti Luukkainen")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::Entry`].
///
/// `user` is the expanded owner summary on reads and creation, and the bare
/// owner identifier after a like update.
#[derive(ToSchema)]
#[schema(as = Entry)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EntrySchema {
    #[schema(example = "6f1c8a52-3a7e-4d0b-9a4b-64a1d8f2c001")]
    id: String,
    #[schema(example = "React patterns")]
    title: String,
    #[schema(example = "Michael Chan")]
    author: String,
    #[schema(example = "https://reactpatterns.com/")]
    url: String,
    #[schema(example = 7)]
    likes: i64,
    user: OwnerSummarySchema,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "mluukkai")]
    username: String,
    #[schema(example = "Matti Luukkainen")]
    name: String,
    /// Identifiers of entries owned by the user.
    blogs: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::IssuedToken`].
#[derive(ToSchema)]
#[schema(as = IssuedToken)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TokenSchema {
    /// Signed HS256 bearer token.
    token: String,
    username: String,
    name: String,
}
