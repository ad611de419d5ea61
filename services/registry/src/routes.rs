//! Registry service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use utoipa::OpenApi;

use crate::{
    doc::{ApiDoc, ValidationErrorSchema},
    error::{ApiError, ApiResult},
    extract::CaseInsensitiveJson,
    middleware::{log_requests, require_authenticated_flag},
    models::{User, UserPayload},
    state::AppState,
    validation::validate_user,
};

/// Create the router for the registry service
///
/// The gate wraps the whole router, fallback included, so unmatched paths
/// under `/users` are rejected before they can 404.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/test", get(test_endpoint))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(require_authenticated_flag))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "user-registry"
    }))
}

/// Plain-text greeting
#[utoipa::path(
    get,
    path = "/test",
    tag = "health",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain"))
)]
pub async fn test_endpoint() -> &'static str {
    "Hello from test endpoint!"
}

/// OpenAPI description of this service
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Get all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(("authenticated" = String, Query, description = "Must be `true`")),
    responses(
        (status = 200, description = "All users in insertion order", body = [User]),
        (status = 401, description = "Access flag missing", body = String, content_type = "text/plain")
    )
)]
pub async fn get_users(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.user_repository.get_all().await)
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id"),
        ("authenticated" = String, Query, description = "Must be `true`")
    ),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 401, description = "Access flag missing", body = String, content_type = "text/plain"),
        (status = 404, description = "No user with this id", body = String, content_type = "text/plain")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_id(id)
        .await
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    params(("authenticated" = String, Query, description = "Must be `true`")),
    request_body(content = UserPayload, description = "Field names match without case"),
    responses(
        (status = 201, description = "Created; `Location` points at the new user", body = User),
        (status = 400, description = "Malformed JSON or rejected fields", body = ValidationErrorSchema),
        (status = 401, description = "Access flag missing", body = String, content_type = "text/plain")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    CaseInsensitiveJson(payload): CaseInsensitiveJson<UserPayload>,
) -> ApiResult<impl IntoResponse> {
    let new_user = validate_user(payload)?;
    let user = state.user_repository.create(new_user).await;
    let location = format!("/users/{}", user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    ))
}

/// Replace the fields of an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id"),
        ("authenticated" = String, Query, description = "Must be `true`")
    ),
    request_body(content = UserPayload, description = "Field names match without case"),
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Malformed JSON or rejected fields", body = ValidationErrorSchema),
        (status = 401, description = "Access flag missing", body = String, content_type = "text/plain"),
        (status = 404, description = "No user with this id", body = String, content_type = "text/plain")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CaseInsensitiveJson(payload): CaseInsensitiveJson<UserPayload>,
) -> ApiResult<impl IntoResponse> {
    let new_user = validate_user(payload)?;
    state
        .user_repository
        .update(id, new_user)
        .await
        .ok_or(ApiError::NotFound)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id"),
        ("authenticated" = String, Query, description = "Must be `true`")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Access flag missing", body = String, content_type = "text/plain"),
        (status = 404, description = "No user with this id", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    if state.user_repository.delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
