use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{DomainError, ParentId, VisitId};
use crate::domains::visits::models::{RescheduleRequest, Visit};

#[derive(Debug, Clone, Deserialize)]
pub struct NewRescheduleRequest {
    pub visit_id: VisitId,
    pub requested_date: DateTime<Utc>,
    pub reason: String,
}

/// Parent asks to move one of their own visits. Another parent's visit is
/// reported as not found.
pub async fn request_reschedule(
    parent_id: ParentId,
    input: NewRescheduleRequest,
    pool: &PgPool,
) -> Result<RescheduleRequest, DomainError> {
    let reason = input.reason.trim();
    if reason.is_empty() {
        return Err(DomainError::invalid("A reason is required"));
    }
    if input.requested_date <= Utc::now() {
        return Err(DomainError::invalid("Requested date must be in the future"));
    }

    Visit::find_owned(input.visit_id, parent_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Visit"))?;

    let request =
        RescheduleRequest::insert(input.visit_id, input.requested_date, reason, pool).await?;

    info!(
        request_id = %request.id,
        visit_id = %request.visit_id,
        parent_id = %parent_id,
        "Reschedule requested"
    );
    Ok(request)
}
