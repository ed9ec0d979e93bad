use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::common::{Capability, ParentId, RescheduleRequestId, Role, StaffId};
use crate::domains::visits::{
    request_reschedule, review_reschedule, schedule_visit, NewRescheduleRequest,
    RescheduleDecision, RescheduleRequest, ScheduleVisit, Visit,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::{authorize, AuthUser};
use crate::server::routes::{success, success_with_message};

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: RescheduleDecision,
}

pub async fn schedule_visit_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<ScheduleVisit>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = authorize(auth, Capability::ManageVisits)?;
    let scheduled_by = (user.role == Role::Staff).then(|| StaffId::from_uuid(user.subject));
    let visit = schedule_visit(input, scheduled_by, &state.db_pool).await?;
    Ok((
        StatusCode::CREATED,
        success_with_message("Visit scheduled", visit),
    ))
}

pub async fn parent_visits_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = authorize(auth, Capability::ActAsParent)?;
    let visits = Visit::find_for_parent(ParentId::from_uuid(user.subject), &state.db_pool).await?;
    Ok(success(visits))
}

pub async fn request_reschedule_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<NewRescheduleRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = authorize(auth, Capability::ActAsParent)?;
    let request =
        request_reschedule(ParentId::from_uuid(user.subject), input, &state.db_pool).await?;
    Ok((
        StatusCode::CREATED,
        success_with_message("Reschedule request submitted", request),
    ))
}

pub async fn list_reschedule_requests_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageVisits)?;
    let requests = RescheduleRequest::find_pending(&state.db_pool).await?;
    Ok(success(requests))
}

pub async fn review_reschedule_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(request_id): Path<RescheduleRequestId>,
    Json(review): Json<ReviewRequest>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ManageVisits)?;
    let request = review_reschedule(request_id, review.status, &state.db_pool).await?;
    Ok(success_with_message("Reschedule request reviewed", request))
}
