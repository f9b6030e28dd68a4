//! Account handlers

use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::users::{LoginRequest, RegisterRequest, UpdateProfileRequest, UserProfile};

use super::super::state::AppState;
use super::super::types::{
    ApiJson, ApiPath, ApiResult, Empty, ErrorBody, created, ok, ok_with_message,
};

/// Single account payload
#[derive(Debug, Serialize, ToSchema)]
pub struct UserData {
    pub user: UserProfile,
}

/// Account list payload
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListData {
    pub users: Vec<UserProfile>,
    pub total: usize,
}

/// Create an account
///
/// POST /api/users/register
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserData),
        (status = 400, description = "Missing field, bad email or password, or email taken", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<UserData> {
    let user = state.users.register(req).await?;
    created("Account created successfully", UserData { user })
}

/// Check email and password. No session is issued.
///
/// POST /api/users/login
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials valid", body = UserData),
        (status = 400, description = "Email or password missing", body = ErrorBody),
        (status = 401, description = "Invalid email or password", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<UserData> {
    let user = state.users.login(req).await?;
    ok_with_message("Logged in successfully", UserData { user })
}

/// GET /api/users/profile/{id}
#[utoipa::path(
    get,
    path = "/api/users/profile/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "Account found", body = UserData),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<UserData> {
    let user = state.users.get_profile(id).await?;
    ok(UserData { user })
}

/// PUT /api/users/profile/{id}
#[utoipa::path(
    put,
    path = "/api/users/profile/{id}",
    params(("id" = u64, Path, description = "User id")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserData),
        (status = 400, description = "Bad email or password, or email taken", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn update_user_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> ApiResult<UserData> {
    let user = state.users.update_profile(id, req).await?;
    ok_with_message("Profile updated successfully", UserData { user })
}

/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "Every account", body = UserListData)),
    tag = "Users"
)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<UserListData> {
    let users = state.users.list_users().await?;
    ok(UserListData {
        total: users.len(),
        users,
    })
}

/// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<Empty> {
    state.users.delete_user(id).await?;
    ok_with_message("User deleted successfully", Empty {})
}
