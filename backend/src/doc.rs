//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user and health endpoints from the inbound layer
//! together with the schema wrappers from
//! [`crate::inbound::http::schemas`], keeping domain types free of utoipa.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::{BirthDateRangeQuery, UserRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "Register, update, delete and query users by birth date."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::users_by_birth_date,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        UserRequest,
        BirthDateRangeQuery
    )),
    tags(
        (name = "users", description = "User registration and queries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
