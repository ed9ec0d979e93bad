use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::Value;

use crate::common::Capability;
use crate::domains::admin::{create_admin, load_admin_dashboard, NewAdmin};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::{authorize, AuthUser};
use crate::server::routes::{success, success_with_message};

pub async fn create_admin_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<NewAdmin>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    authorize(auth, Capability::FullAdmin)?;
    let admin = create_admin(
        input,
        state.deps.credential_hasher.as_ref(),
        &state.db_pool,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        success_with_message("Admin created", admin),
    ))
}

pub async fn admin_dashboard_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::FullAdmin)?;
    let dashboard = load_admin_dashboard(&state.db_pool).await?;
    Ok(success(dashboard))
}
