use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::common::{Capability, ChildId, DomainError};
use crate::domains::children::{add_child, Child, NewChild};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::{authorize, AuthUser};
use crate::server::routes::{success, success_with_message};

pub async fn add_child_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<NewChild>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    authorize(auth, Capability::ManageChildren)?;
    let child = add_child(input, &state.db_pool).await?;
    Ok((
        StatusCode::CREATED,
        success_with_message("Child added", child),
    ))
}

pub async fn list_children_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageChildren)?;
    let children = Child::find_all(&state.db_pool).await?;
    Ok(success(children))
}

pub async fn list_children_with_parents_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageChildren)?;
    let rows = Child::find_all_with_parents(&state.db_pool).await?;
    Ok(success(rows))
}

pub async fn delete_child_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(child_id): Path<ChildId>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageChildren)?;
    if !Child::delete(child_id, &state.db_pool).await? {
        return Err(DomainError::NotFound("Child").into());
    }
    Ok(success_with_message("Child deleted", child_id))
}
