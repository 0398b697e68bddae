//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every handler from the inbound layer (entries, users, health)
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that give
//!   OpenAPI definitions without coupling domain types to utoipa
//! - **Security**: bearer token scheme, opted out of by public operations
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::entries::{EntryRequest, LikesRequest};
use crate::inbound::http::schemas::{
    EntrySchema, ErrorSchema, OwnerSummarySchema, TokenSchema, UserSchema,
};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bloglist API",
        description = "Blog entry catalogue with bearer-token authenticated writes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::entries::list_entries,
        crate::inbound::http::entries::get_entry,
        crate::inbound::http::entries::create_entry,
        crate::inbound::http::entries::update_entry,
        crate::inbound::http::entries::delete_entry,
        crate::inbound::http::users::register,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EntrySchema,
        OwnerSummarySchema,
        UserSchema,
        TokenSchema,
        ErrorSchema,
        EntryRequest,
        LikesRequest,
        RegisterRequest,
        LoginRequest
    )),
    tags(
        (name = "entries", description = "Blog entry catalogue"),
        (name = "users", description = "Accounts and token issuance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths, schemas and security scheme.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::{RefOr, Required};
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/entries")]
    #[case("/api/entries/{id}")]
    #[case("/api/users")]
    #[case("/api/login")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    #[case("Entry", &["id", "title", "author", "url", "likes", "user"])]
    #[case("User", &["id", "username", "name", "blogs"])]
    #[case("ErrorBody", &["error"])]
    #[case("IssuedToken", &["token", "username", "name"])]
    fn openapi_schema_has_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn like_update_body_is_optional() {
        let doc = ApiDoc::openapi();
        let body = doc.paths.paths["/api/entries/{id}"]
            .put
            .as_ref()
            .and_then(|operation| operation.request_body.as_ref())
            .expect("PUT documents a request body");
        assert!(!matches!(body.required, Some(Required::True)));
    }

    #[rstest]
    fn openapi_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
