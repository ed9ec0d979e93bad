use axum::{extract::Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::common::Role;
use crate::domains::auth::login;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::routes::success;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

async fn login_as(role: Role, state: &AppState, body: LoginRequest) -> Result<Json<Value>, ApiError> {
    let result = login(role, &body.email, &body.password, &state.deps).await?;
    Ok(success(result))
}

pub async fn parent_login_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    login_as(Role::Parent, &state, body).await
}

pub async fn staff_login_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    login_as(Role::Staff, &state, body).await
}

pub async fn admin_login_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    login_as(Role::Admin, &state, body).await
}
