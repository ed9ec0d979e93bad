use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::common::{Capability, ChildId};
use crate::domains::adoptions::{assign_child, set_adoption_status, AssignChild};
use crate::domains::children::{Child, ChildStatus};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::{authorize, AuthUser};
use crate::server::routes::{success, success_with_message};

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ChildStatus,
}

pub async fn assign_child_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<AssignChild>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageAdoptions)?;
    let child = assign_child(input, &state.db_pool).await?;
    Ok(success_with_message("Child assigned to parent", child))
}

pub async fn list_adoptions_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageAdoptions)?;
    let rows = Child::find_all_with_parents(&state.db_pool).await?;
    Ok(success(rows))
}

pub async fn update_adoption_status_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(child_id): Path<ChildId>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageAdoptions)?;
    let child = set_adoption_status(child_id, update.status, &state.db_pool).await?;
    Ok(success_with_message("Adoption status updated", child))
}
