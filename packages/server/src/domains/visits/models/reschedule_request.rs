use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ParentId, RescheduleRequestId, VisitId};
use crate::domains::visits::models::VisitType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct RescheduleRequest {
    pub id: RescheduleRequestId,
    pub visit_id: VisitId,
    pub requested_date: DateTime<Utc>,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Pending request joined with the visit and the requesting parent
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct RescheduleRequestDetail {
    pub id: RescheduleRequestId,
    pub visit_id: VisitId,
    pub requested_date: DateTime<Utc>,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub visit_type: VisitType,
    pub visit_date: DateTime<Utc>,
    pub parent_id: ParentId,
    pub parent_name: Option<String>,
    pub parent_email: String,
}

impl RescheduleRequest {
    pub async fn insert(
        visit_id: VisitId,
        requested_date: DateTime<Utc>,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO reschedule_requests (id, visit_id, requested_date, reason)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(RescheduleRequestId::new())
        .bind(visit_id)
        .bind(requested_date)
        .bind(reason)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_pending(pool: &PgPool) -> Result<Vec<RescheduleRequestDetail>> {
        sqlx::query_as::<_, RescheduleRequestDetail>(
            "SELECT
                r.id,
                r.visit_id,
                r.requested_date,
                r.reason,
                r.status,
                r.created_at,
                v.visit_type,
                v.scheduled_date AS visit_date,
                p.id AS parent_id,
                p.name AS parent_name,
                p.email AS parent_email
             FROM reschedule_requests r
             JOIN visits v ON r.visit_id = v.id
             JOIN parents p ON v.parent_id = p.id
             WHERE r.status = 'pending'
             ORDER BY r.created_at ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_pending(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reschedule_requests WHERE status = 'pending'",
        )
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Row-locked read; concurrent reviewers of the same request serialize here
    pub async fn lock(
        id: RescheduleRequestId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM reschedule_requests WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn set_status(
        id: RescheduleRequestId,
        status: RequestStatus,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE reschedule_requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(conn)
        .await
    }
}
