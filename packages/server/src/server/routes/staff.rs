use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::Value;

use crate::common::Capability;
use crate::domains::staff::{create_staff, NewStaffMember, StaffMember};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::{authorize, AuthUser};
use crate::server::routes::{success, success_with_message};

pub async fn list_staff_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageStaff)?;
    let staff = StaffMember::find_all(&state.db_pool).await?;
    Ok(success(staff))
}

pub async fn create_staff_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<NewStaffMember>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    authorize(auth, Capability::ManageStaff)?;
    let staff = create_staff(
        input,
        state.deps.credential_hasher.as_ref(),
        &state.db_pool,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        success_with_message("Staff member added", staff),
    ))
}
