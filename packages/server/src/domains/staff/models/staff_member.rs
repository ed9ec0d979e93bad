use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::StaffId;

pub const DEFAULT_ROLE_TITLE: &str = "Case Worker";
pub const DEFAULT_DEPARTMENT: &str = "Adoption Services";

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub role_title: String,
    pub department: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    pub async fn insert(
        name: &str,
        email: &str,
        password_hash: &str,
        phone: Option<&str>,
        role_title: &str,
        department: &str,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO staff_members (id, name, email, password_hash, phone, role_title, department)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(StaffId::new())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(role_title)
        .bind(department)
        .fetch_one(pool)
        .await
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM staff_members ORDER BY name ASC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn email_exists(email: &str, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM staff_members WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_active(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM staff_members WHERE active = true")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
