use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{is_foreign_key_violation, DomainError, ParentId, StaffId};
use crate::domains::visits::models::{Visit, VisitType};

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleVisit {
    pub parent_id: ParentId,
    pub visit_type: VisitType,
    pub scheduled_date: DateTime<Utc>,
    pub staff_id: Option<StaffId>,
    pub purpose: Option<String>,
}

/// Schedule a visit for a parent. `scheduled_by` is recorded as the assigned
/// staff member when the request does not name one.
pub async fn schedule_visit(
    input: ScheduleVisit,
    scheduled_by: Option<StaffId>,
    pool: &PgPool,
) -> Result<Visit, DomainError> {
    let staff_id = input.staff_id.or(scheduled_by);
    let purpose = input
        .purpose
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let visit = Visit::insert(
        input.parent_id,
        input.visit_type,
        input.scheduled_date,
        staff_id,
        purpose,
        pool,
    )
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            DomainError::NotFound("Parent or staff member")
        } else {
            e.into()
        }
    })?;

    info!(
        visit_id = %visit.id,
        parent_id = %visit.parent_id,
        visit_type = ?visit.visit_type,
        "Visit scheduled"
    );
    Ok(visit)
}
