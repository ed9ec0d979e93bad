use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};

use crate::common::{DomainError, RescheduleRequestId};
use crate::domains::visits::models::{RequestStatus, RescheduleRequest, Visit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescheduleDecision {
    Approved,
    Rejected,
}

impl From<RescheduleDecision> for RequestStatus {
    fn from(decision: RescheduleDecision) -> Self {
        match decision {
            RescheduleDecision::Approved => RequestStatus::Approved,
            RescheduleDecision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Approve or reject a pending request.
///
/// Approval moves the visit to the requested date and marks it rescheduled in
/// the same transaction that closes the request. Already-reviewed requests are
/// a conflict.
pub async fn review_reschedule(
    id: RescheduleRequestId,
    decision: RescheduleDecision,
    pool: &PgPool,
) -> Result<RescheduleRequest, DomainError> {
    let mut tx = pool.begin().await?;

    let result = apply_decision(id, decision, &mut tx).await;
    match result {
        Ok(request) => {
            tx.commit().await?;
            info!(request_id = %id, decision = ?decision, visit_id = %request.visit_id, "Reschedule request reviewed");
            Ok(request)
        }
        Err(e) => {
            if let Err(rollback_error) = tx.rollback().await {
                warn!(request_id = %id, error = %rollback_error, "Rollback failed");
            }
            Err(e)
        }
    }
}

async fn apply_decision(
    id: RescheduleRequestId,
    decision: RescheduleDecision,
    conn: &mut PgConnection,
) -> Result<RescheduleRequest, DomainError> {
    let request = RescheduleRequest::lock(id, &mut *conn)
        .await?
        .ok_or(DomainError::NotFound("Reschedule request"))?;

    if request.status != RequestStatus::Pending {
        return Err(DomainError::Conflict(
            "Reschedule request has already been reviewed".to_string(),
        ));
    }

    if decision == RescheduleDecision::Approved
        && !Visit::reschedule(request.visit_id, request.requested_date, &mut *conn).await?
    {
        return Err(DomainError::NotFound("Visit"));
    }

    Ok(RescheduleRequest::set_status(id, decision.into(), &mut *conn).await?)
}
