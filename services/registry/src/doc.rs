//! OpenAPI documentation for the registry service
//!
//! [`ApiDoc`] collects every annotated handler and is served as JSON at
//! `/api-docs/openapi.json`.

use utoipa::{OpenApi, ToSchema};

use crate::models::{User, UserPayload};

/// One rejected field in a validation failure body
#[derive(ToSchema)]
pub struct FieldErrorSchema {
    /// Lower-case field name, e.g. `username`
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

/// Body returned with `400` when one or more fields are rejected
#[derive(ToSchema)]
pub struct ValidationErrorSchema {
    /// Always `Invalid user data`
    pub error: String,
    pub fields: Vec<FieldErrorSchema>,
}

/// OpenAPI document for the registry HTTP API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "In-memory user records behind a placeholder `authenticated=true` query flag."
    ),
    paths(
        crate::routes::get_users,
        crate::routes::get_user,
        crate::routes::create_user,
        crate::routes::update_user,
        crate::routes::delete_user,
        crate::routes::test_endpoint,
        crate::routes::health_check,
    ),
    components(schemas(User, UserPayload, ValidationErrorSchema, FieldErrorSchema)),
    tags(
        (name = "users", description = "User record operations"),
        (name = "health", description = "Liveness and greeting endpoints")
    )
)]
pub struct ApiDoc;
