use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ChildId, ParentId};

/// Adoption lifecycle. Claiming at registration leaves the status untouched;
/// staff move it to `pending` on assignment and `adopted` once finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "child_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChildStatus {
    #[default]
    Placed,
    Pending,
    Adopted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Case-insensitive; admin forms send "Male"/"FEMALE" etc.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Child {
    pub id: ChildId,
    pub parent_id: Option<ParentId>,
    pub caring_id: Option<String>,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub background: Option<String>,
    pub photo: String,
    pub placement_date: Option<NaiveDate>,
    pub adoption_date: Option<NaiveDate>,
    pub status: ChildStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the child/parent mapping shown in the adoptions view
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct ChildWithParent {
    pub child_id: ChildId,
    pub caring_id: Option<String>,
    pub child_name: String,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub status: ChildStatus,
    pub parent_id: Option<ParentId>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_contact: Option<String>,
    pub spouse_name: Option<String>,
    pub occupation: Option<String>,
    pub annual_income: Option<Decimal>,
    pub home_type: Option<String>,
}

/// The columns the claim step needs, read under a row lock
#[derive(sqlx::FromRow, Debug, Clone, Copy)]
pub struct ClaimCandidate {
    pub id: ChildId,
    pub parent_id: Option<ParentId>,
}

impl Child {
    pub async fn find_by_id(id: ChildId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM children WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM children ORDER BY created_at ASC, id ASC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_parent(parent_id: ParentId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM children WHERE parent_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(parent_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_all_with_parents(pool: &PgPool) -> Result<Vec<ChildWithParent>> {
        sqlx::query_as::<_, ChildWithParent>(
            "SELECT
                c.id AS child_id,
                c.caring_id,
                c.name AS child_name,
                c.gender,
                c.date_of_birth,
                c.status,
                p.id AS parent_id,
                p.name AS parent_name,
                p.email AS parent_email,
                p.contact AS parent_contact,
                p.spouse_name,
                p.occupation,
                p.annual_income,
                p.home_type
             FROM children c
             LEFT JOIN parents p ON c.parent_id = p.id
             ORDER BY c.created_at ASC, c.id ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Lock every child carrying this caring identifier (exact, case-sensitive).
    ///
    /// A concurrent claimer blocks here until the first transaction finishes,
    /// then sees the committed parent reference.
    pub async fn lock_by_caring_id(
        caring_id: &str,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Vec<ClaimCandidate>> {
        sqlx::query_as::<_, ClaimCandidate>(
            "SELECT id, parent_id FROM children WHERE caring_id = $1 ORDER BY id FOR UPDATE",
        )
        .bind(caring_id)
        .fetch_all(conn)
        .await
    }

    /// Set the parent reference only if the child is still unclaimed.
    ///
    /// Returns false when another parent got there first.
    pub async fn set_parent_if_unclaimed(
        id: ChildId,
        parent_id: ParentId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "UPDATE children
             SET parent_id = $2, updated_at = NOW()
             WHERE id = $1 AND parent_id IS NULL",
        )
        .bind(id)
        .bind(parent_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Administrative assignment: may re-assign, and moves status to `pending`.
    /// Returns None if the child does not exist.
    pub async fn assign_to_parent(
        id: ChildId,
        parent_id: ParentId,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE children
             SET parent_id = $2, status = 'pending', updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .fetch_optional(pool)
        .await
    }

    /// Returns None if the child does not exist
    pub async fn update_status(
        id: ChildId,
        status: ChildStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE children
             SET status = $2,
                 adoption_date = CASE
                     WHEN $2 = 'adopted'::child_status THEN COALESCE(adoption_date, CURRENT_DATE)
                     ELSE adoption_date
                 END,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Returns true if a row was deleted
    pub async fn delete(id: ChildId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM children WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM children")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn count_unclaimed(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM children WHERE parent_id IS NULL")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse_loose() {
        assert_eq!(Gender::parse_loose("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse_loose(" MALE "), Some(Gender::Male));
        assert_eq!(Gender::parse_loose("unknown"), None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ChildStatus::Adopted).unwrap(),
            "\"adopted\""
        );
        assert_eq!(ChildStatus::default(), ChildStatus::Placed);
    }
}
