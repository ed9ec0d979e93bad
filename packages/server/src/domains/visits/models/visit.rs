use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ParentId, StaffId, VisitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "visit_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VisitType {
    HomeVisit,
    FollowUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "visit_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Visit {
    pub id: VisitId,
    pub parent_id: ParentId,
    pub visit_type: VisitType,
    pub scheduled_date: DateTime<Utc>,
    pub staff_id: Option<StaffId>,
    pub purpose: Option<String>,
    pub status: VisitStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Visit as shown to the parent, with the assigned case worker
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct VisitWithStaff {
    pub id: VisitId,
    pub visit_type: VisitType,
    pub scheduled_date: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: VisitStatus,
    pub staff_name: Option<String>,
    pub staff_email: Option<String>,
}

impl Visit {
    pub async fn insert(
        parent_id: ParentId,
        visit_type: VisitType,
        scheduled_date: DateTime<Utc>,
        staff_id: Option<StaffId>,
        purpose: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO visits (id, parent_id, visit_type, scheduled_date, staff_id, purpose)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(VisitId::new())
        .bind(parent_id)
        .bind(visit_type)
        .bind(scheduled_date)
        .bind(staff_id)
        .bind(purpose)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(id: VisitId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM visits WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Visit only if it belongs to this parent
    pub async fn find_owned(
        id: VisitId,
        parent_id: ParentId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM visits WHERE id = $1 AND parent_id = $2")
            .bind(id)
            .bind(parent_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_for_parent(parent_id: ParentId, pool: &PgPool) -> Result<Vec<VisitWithStaff>> {
        sqlx::query_as::<_, VisitWithStaff>(
            "SELECT
                v.id,
                v.visit_type,
                v.scheduled_date,
                v.purpose,
                v.status,
                s.name AS staff_name,
                s.email AS staff_email
             FROM visits v
             LEFT JOIN staff_members s ON v.staff_id = s.id
             WHERE v.parent_id = $1
             ORDER BY v.scheduled_date ASC",
        )
        .bind(parent_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_scheduled_for_parent(parent_id: ParentId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM visits
             WHERE parent_id = $1 AND status IN ('scheduled', 'rescheduled')",
        )
        .bind(parent_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Move the visit to a new date and mark it rescheduled
    pub async fn reschedule(
        id: VisitId,
        new_date: DateTime<Utc>,
        conn: &mut PgConnection,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "UPDATE visits
             SET scheduled_date = $2, status = 'rescheduled', updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(new_date)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
